//! Integration tests for the chatlens load-bind-render pipeline
//!
//! These tests use fixture files in `tests/fixtures/` and read them through
//! the real file-backed source, so they cover loading, fallback, binding and
//! both renderers end to end.

use chatlens_core::charts::{ChartId, SequenceFill};
use chatlens_core::config::{LoaderConfig, SourcesConfig};
use chatlens_core::loader::{FetchSource, Loader, Origin, SourceLocation};
use chatlens_core::panels::{Block, PanelContent, PanelId};
use chatlens_core::render::{html, text};
use chatlens_core::{Dashboard, MetricsDocument, Page, Slot};
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn loader_for(metrics: PathBuf, explanations: PathBuf) -> Loader<FetchSource> {
    chatlens_core::logging::init_test();
    Loader::new(
        FetchSource::new().unwrap(),
        SourceLocation::Path(metrics),
        SourceLocation::Path(explanations),
    )
}

async fn load_and_bind(metrics: PathBuf, explanations: PathBuf) -> (Dashboard, Page) {
    let (dashboard, _report) = loader_for(metrics, explanations).load().await;
    let mut page = Page::new();
    dashboard.render(&mut page, &mut SequenceFill::new(vec![]));
    (dashboard, page)
}

// ============================================
// Loading
// ============================================

#[tokio::test]
async fn test_load_full_fixtures() {
    let (dashboard, report) = loader_for(
        fixture_path("website_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .load()
    .await;

    assert!(report.metrics.is_loaded());
    assert!(report.explanations.is_loaded());
    assert!(!dashboard.explanations.is_empty());

    let generated = dashboard.metrics.generated_at().expect("timestamp");
    assert_eq!(generated.format("%Y-%m-%d %H:%M").to_string(), "2025-11-02 21:14");
}

#[tokio::test]
async fn test_missing_files_fall_back() {
    let temp_dir = TempDir::new().unwrap();
    let (dashboard, report) = loader_for(
        temp_dir.path().join("website_metrics.json"),
        temp_dir.path().join("detailed_explanations.json"),
    )
    .load()
    .await;

    assert!(matches!(report.metrics, Origin::Substituted { .. }));
    assert!(matches!(report.explanations, Origin::Substituted { .. }));
    assert_eq!(dashboard, Dashboard::fallback());

    let summary = dashboard.summary();
    assert_eq!(
        [
            summary.conversations.as_str(),
            summary.messages.as_str(),
            summary.usage_days.as_str(),
            summary.tool_usage.as_str(),
            summary.average_length.as_str(),
            summary.tech_depth.as_str(),
        ],
        ["800", "13,146", "300", "43.4%", "16.4", "26.6"]
    );
}

#[tokio::test]
async fn test_invalid_json_on_disk_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let metrics = temp_dir.path().join("website_metrics.json");
    std::fs::write(&metrics, "{\"overview\": ").unwrap();

    let (dashboard, report) = loader_for(metrics, fixture_path("detailed_explanations.json"))
        .load()
        .await;

    assert!(!report.metrics.is_loaded());
    assert!(report.explanations.is_loaded());
    assert_eq!(dashboard.metrics, MetricsDocument::fallback());
    assert!(dashboard.explanations.time_analysis().is_some());
}

#[tokio::test]
async fn test_non_object_explanations_are_empty() {
    let temp_dir = TempDir::new().unwrap();
    let explanations = temp_dir.path().join("detailed_explanations.json");
    std::fs::write(&explanations, "[1, 2, 3]").unwrap();

    let (dashboard, page) = load_and_bind(fixture_path("website_metrics.json"), explanations).await;

    assert!(dashboard.explanations.is_empty());
    for id in PanelId::ALL {
        assert!(page.panel(id).is_none());
    }
}

#[tokio::test]
async fn test_loader_from_config() {
    let sources = SourcesConfig {
        metrics: fixture_path("partial_metrics.json").display().to_string(),
        explanations: fixture_path("detailed_explanations.json")
            .display()
            .to_string(),
    };
    let loader = Loader::from_config(
        FetchSource::new().unwrap(),
        &sources,
        &LoaderConfig { timeout_ms: 5000 },
    )
    .unwrap();

    let (dashboard, report) = loader.load().await;
    assert!(report.metrics.is_loaded());
    assert_eq!(dashboard.summary().conversations, "42");
}

// ============================================
// Binding
// ============================================

#[tokio::test]
async fn test_full_fixture_binding() {
    let (_, page) = load_and_bind(
        fixture_path("website_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .await;

    assert_eq!(page.text(Slot::TotalConversations), Some("812"));
    assert_eq!(page.text(Slot::TotalMessages), Some("14,021"));
    assert_eq!(page.text(Slot::UsageDays), Some("311"));
    assert_eq!(page.text(Slot::ToolUsage), Some("43.4%"));
    assert_eq!(page.text(Slot::AverageLength), Some("17.3"));
    assert_eq!(page.text(Slot::TechDepth), Some("27.1"));
    assert_eq!(page.text(Slot::DailyAvgConversations), Some("2.6"));
    assert_eq!(page.text(Slot::DailyAvgMessages), Some("45.1"));

    let time = page.chart(ChartId::Time).unwrap();
    assert_eq!(time.highlight, Some(21));
    assert_eq!(time.tooltip_at(21).as_deref(), Some("1204 messages"));

    let radar = page.chart(ChartId::Radar).unwrap();
    assert_eq!(radar.series.values, vec![27.1, 30.2, 62.0, 40.8, 16.1, 43.4]);

    let interaction = page.chart(ChartId::Interaction).unwrap();
    assert_eq!(interaction.series.values, vec![45.0, 30.0, 25.0]);
}

#[tokio::test]
async fn test_partial_metrics_default_per_leaf() {
    let (_, page) = load_and_bind(
        fixture_path("partial_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .await;

    assert_eq!(page.text(Slot::TotalConversations), Some("42"));
    assert_eq!(page.text(Slot::TotalMessages), Some("13,146"));
    assert_eq!(page.text(Slot::ToolUsage), Some("75.0%"));
    assert_eq!(page.text(Slot::AverageLength), Some("8.4"));
    assert_eq!(page.text(Slot::TechDepth), Some("26.6"));

    let technical = page.chart(ChartId::Technical).unwrap();
    assert_eq!(technical.series.values, vec![20.0, 14.8, 75.0, 16.1]);
    assert_eq!(technical.axis.as_ref().and_then(|a| a.max), Some(50.0));

    // Only hours 9 and 10 are recorded; the rest come from the filler.
    let time = page.chart(ChartId::Time).unwrap();
    assert_eq!(time.series.values[9], 30.0);
    assert_eq!(time.series.values[10], 55.0);
    assert_eq!(time.series.values[0], 0.0);
    assert_eq!(time.highlight, Some(10));
}

#[tokio::test]
async fn test_explanation_panels_skip_unknown_keys() {
    let (_, page) = load_and_bind(
        fixture_path("website_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .await;

    match page.panel(PanelId::TypeDetails).unwrap() {
        PanelContent::Fragments(fragments) => {
            assert_eq!(fragments.len(), 2);
            assert_eq!(
                fragments[0].blocks[0],
                Block::Heading {
                    text: "Technical Deep Dives".to_string()
                }
            );
            assert_eq!(
                fragments[1].blocks[0],
                Block::Heading {
                    text: "Creative Collaboration".to_string()
                }
            );
        }
        other => panic!("unexpected content {:?}", other),
    }

    match page.panel(PanelId::RadarDetails).unwrap() {
        PanelContent::Fragments(fragments) => {
            let headings: Vec<&Block> = fragments.iter().map(|f| &f.blocks[0]).collect();
            assert_eq!(
                headings,
                vec![
                    &Block::Heading {
                        text: "Tech Depth".to_string()
                    },
                    &Block::Heading {
                        text: "Tool Usage".to_string()
                    },
                ]
            );
        }
        other => panic!("unexpected content {:?}", other),
    }

    assert_eq!(
        page.panel(PanelId::TimeAnalysis),
        Some(&PanelContent::Text(
            "Activity peaks after 9pm and dips before dawn.".to_string()
        ))
    );
}

// ============================================
// Rendering
// ============================================

#[tokio::test]
async fn test_html_page_contains_bound_values() {
    let (_, page) = load_and_bind(
        fixture_path("website_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .await;
    let rendered = html::page(&page, "AI Usage Dashboard", Some("Data generated 2025-11-02"));

    assert!(rendered.starts_with("<!DOCTYPE html>"));
    assert!(rendered.contains("14,021"));
    assert!(rendered.contains("id=\"radarChart\""));
    assert!(rendered.contains("Algorithm: (code*0.4 + tool*0.3 + complex*0.3) / total"));
    assert!(rendered.contains("Data generated 2025-11-02"));
    assert!(!rendered.contains("Unknown axis."));
}

#[tokio::test]
async fn test_text_page_contains_bound_values() {
    let (_, page) = load_and_bind(
        fixture_path("website_metrics.json"),
        fixture_path("detailed_explanations.json"),
    )
    .await;
    let rendered = text::page(&page, "AI Usage Dashboard", None);

    assert!(rendered.contains("Conversations: 812"));
    assert!(rendered.contains("Messages: 14,021"));
    assert!(rendered.contains("ACTIVITY BY HOUR"));
    assert!(rendered.contains("[R modelling] [SQL tuning] [Python scripts]"));
    assert!(rendered.contains("- SQL: Warehouse queries"));
    assert!(!rendered.contains("chess"));
}
