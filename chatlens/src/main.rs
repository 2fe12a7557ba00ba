//! chatlens - AI Usage Dashboard CLI
//!
//! Loads the metrics and explanations documents, binds them into a
//! dashboard page and prints it to the terminal, as JSON, or as a
//! standalone HTML page.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chatlens_core::charts::{ChartId, RandomFill};
use chatlens_core::loader::{FetchSource, LoadReport, Loader, Origin};
use chatlens_core::panels::PanelId;
use chatlens_core::render::{html, text};
use chatlens_core::summary::DailyAverages;
use chatlens_core::{Config, Dashboard, Page};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TITLE: &str = "AI Usage Dashboard";

#[derive(Parser, Debug)]
#[command(name = "chatlens")]
#[command(about = "AI Usage Dashboard - metrics and explanations at a glance")]
#[command(version)]
struct Args {
    /// Metrics document (path or http(s) URL)
    #[arg(long)]
    metrics: Option<String>,

    /// Explanations document (path or http(s) URL)
    #[arg(long)]
    explanations: Option<String>,

    /// Upper bound on each fetch, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Export format (terminal, json, html)
    #[arg(long)]
    export: Option<String>,

    /// Seed for the filler used on hours without data
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = chatlens_core::logging::init(&config.logging).ok();

    if let Some(metrics) = args.metrics {
        config.sources.metrics = metrics;
    }
    if let Some(explanations) = args.explanations {
        config.sources.explanations = explanations;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.loader.timeout_ms = timeout_ms;
    }

    let export = args.export.as_deref().unwrap_or("terminal");
    if !matches!(export, "terminal" | "json" | "html") {
        anyhow::bail!(
            "Unknown export format: {}. Use 'terminal', 'json' or 'html'",
            export
        );
    }

    let source = FetchSource::new().context("failed to set up document fetching")?;
    let loader = Loader::from_config(source, &config.sources, &config.loader)
        .context("invalid source configuration")?;
    let (dashboard, report) = loader.load().await;

    tracing::info!(
        metrics_loaded = report.metrics.is_loaded(),
        explanations_loaded = report.explanations.is_loaded(),
        timeout = ?Duration::from_millis(config.loader.timeout_ms),
        "Dashboard loaded"
    );

    let page = bind(&dashboard, args.seed);
    let footer = footer(&dashboard, &report);

    match export {
        "json" => print_json(&dashboard, &page, &report)?,
        "html" => print!("{}", html::page(&page, TITLE, footer.as_deref())),
        _ => print!("{}", text::page(&page, TITLE, footer.as_deref())),
    }

    Ok(())
}

fn bind(dashboard: &Dashboard, seed: Option<u64>) -> Page {
    let mut page = Page::new();
    match seed {
        Some(seed) => {
            let mut fill = RandomFill::new(StdRng::seed_from_u64(seed));
            dashboard.render(&mut page, &mut fill);
        }
        None => dashboard.render(&mut page, &mut RandomFill::thread()),
    }
    page
}

fn footer(dashboard: &Dashboard, report: &LoadReport) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(generated) = dashboard.metrics.generated_at() {
        parts.push(format!("Data generated {}", generated.format("%Y-%m-%d %H:%M")));
    }
    if !report.metrics.is_loaded() {
        parts.push("Metrics unavailable, showing sample data".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

fn origin_json(origin: &Origin) -> serde_json::Value {
    match origin {
        Origin::Loaded { bytes } => serde_json::json!({"status": "loaded", "bytes": bytes}),
        Origin::Substituted { reason } => {
            serde_json::json!({"status": "fallback", "reason": reason})
        }
    }
}

fn print_json(dashboard: &Dashboard, page: &Page, report: &LoadReport) -> Result<()> {
    let json = serde_json::json!({
        "generated_at": dashboard
            .metrics
            .generated_at()
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()),
        "summary": dashboard.summary(),
        "daily_averages": DailyAverages::from_metrics(&dashboard.metrics),
        "charts": ChartId::ALL
            .into_iter()
            .filter_map(|id| page.chart(id))
            .collect::<Vec<_>>(),
        "panels": PanelId::ALL
            .into_iter()
            .filter_map(|id| {
                page.panel(id).map(|content| {
                    serde_json::json!({"id": id, "title": id.title(), "content": content})
                })
            })
            .collect::<Vec<_>>(),
        "sources": {
            "metrics": origin_json(&report.metrics),
            "explanations": origin_json(&report.explanations),
        },
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json).context("failed to serialize dashboard")?
    );
    Ok(())
}
