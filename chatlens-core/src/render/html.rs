//! HTML output.
//!
//! Panels become escaped markup using the dashboard's class names. Charts
//! become Chart.js configurations embedded as JSON; a short script attaches
//! the tooltip and tick callbacks that JSON cannot carry.

use serde_json::{json, Value};

use crate::charts::{ChartId, ChartKind, ChartSpec, LegendPosition};
use crate::panels::{Block, Fragment, PanelContent, PanelId};
use crate::surface::{Page, Slot};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Escape text for use in element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Markup for a panel's content.
pub fn panel(content: &PanelContent) -> String {
    match content {
        PanelContent::Text(text) => escape(text),
        PanelContent::Fragments(fragments) => fragments.iter().map(fragment).collect(),
    }
}

fn fragment(fragment: &Fragment) -> String {
    let mut html = format!("<div class=\"{}\">", fragment.class);
    for block in &fragment.blocks {
        match block {
            Block::Heading { text } => {
                html.push_str(&format!("<h4>{}</h4>", escape(text)));
            }
            Block::Paragraph { class: None, text } => {
                html.push_str(&format!("<p>{}</p>", escape(text)));
            }
            Block::Paragraph {
                class: Some(class),
                text,
            } => {
                html.push_str(&format!("<div class=\"{}\">{}</div>", class, escape(text)));
            }
            Block::Tags {
                container,
                item,
                items,
            } => {
                html.push_str(&format!("<div class=\"{}\">", container));
                for tag in items {
                    html.push_str(&format!("<span class=\"{}\">{}</span>", item, escape(tag)));
                }
                html.push_str("</div>");
            }
            Block::Definitions { items } => {
                html.push_str("<ul>");
                for (name, desc) in items {
                    html.push_str(&format!(
                        "<li><strong>{}:</strong> {}</li>",
                        escape(name),
                        escape(desc)
                    ));
                }
                html.push_str("</ul>");
            }
        }
    }
    html.push_str("</div>");
    html
}

/// Single color for the whole series, or one per point.
fn colors(values: &[String]) -> Value {
    match values {
        [single] => json!(single),
        many => json!(many),
    }
}

/// Chart.js configuration for a spec.
pub fn chart_config(spec: &ChartSpec) -> Value {
    let mut dataset = json!({
        "data": spec.series.values,
        "backgroundColor": colors(&spec.series.fill),
        "borderColor": colors(&spec.series.border),
        "borderWidth": 2,
    });
    if let Some(label) = &spec.series.label {
        dataset["label"] = json!(label);
    }
    match spec.kind {
        ChartKind::Line => {
            dataset["fill"] = json!(true);
            dataset["tension"] = json!(0.4);
            dataset["pointRadius"] = json!(4);
            dataset["pointHoverRadius"] = json!(6);
            dataset["pointBackgroundColor"] = json!(spec.series.border.first());
            dataset["pointBorderColor"] = json!("#fff");
        }
        ChartKind::Radar => {
            dataset["pointBackgroundColor"] = json!(spec.series.border.first());
            dataset["pointBorderColor"] = json!("#fff");
        }
        _ => {}
    }

    let legend = match spec.legend {
        LegendPosition::Hidden => json!({ "display": false }),
        LegendPosition::Right => legend_at("right"),
        LegendPosition::Bottom => legend_at("bottom"),
    };

    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": true,
        "plugins": { "legend": legend },
    });

    if let Some(axis) = &spec.axis {
        let mut ticks = json!({ "color": spec.tick_color });
        if let Some(step) = axis.step {
            ticks["stepSize"] = json!(step);
        }
        let mut value_axis = json!({
            "beginAtZero": axis.min == 0.0,
            "ticks": ticks,
            "grid": { "color": spec.grid_color },
        });
        if let Some(max) = axis.max {
            value_axis["max"] = json!(max);
        }

        if spec.kind == ChartKind::Radar {
            value_axis["pointLabels"] = json!({ "color": spec.tick_color, "font": { "size": 12 } });
            options["scales"] = json!({ "r": value_axis });
        } else {
            let mut x_ticks = json!({ "color": spec.tick_color });
            if spec.kind == ChartKind::Line {
                x_ticks["maxRotation"] = json!(45);
                x_ticks["minRotation"] = json!(45);
            }
            options["scales"] = json!({
                "y": value_axis,
                "x": { "ticks": x_ticks, "grid": { "color": spec.grid_color } },
            });
        }
    }

    json!({
        "type": spec.kind,
        "data": { "labels": spec.labels, "datasets": [dataset] },
        "options": options,
        "chatlens": {
            "tooltip": spec.tooltip,
            "tickSuffix": spec.axis.as_ref().and_then(|a| a.tick_suffix),
        },
    })
}

fn legend_at(position: &str) -> Value {
    json!({
        "position": position,
        "labels": { "color": "#cbd5e1", "font": { "size": 14 }, "padding": 15 },
    })
}

/// Panel shown under each chart.
fn panel_for(chart: ChartId) -> PanelId {
    match chart {
        ChartId::ConversationTypes => PanelId::TypeDetails,
        ChartId::Technical => PanelId::TechnicalDetails,
        ChartId::Time => PanelId::TimeAnalysis,
        ChartId::Interaction => PanelId::InteractionDetails,
        ChartId::Radar => PanelId::RadarDetails,
    }
}

const SUMMARY_SLOTS: [Slot; 8] = [
    Slot::TotalConversations,
    Slot::TotalMessages,
    Slot::UsageDays,
    Slot::ToolUsage,
    Slot::AverageLength,
    Slot::TechDepth,
    Slot::DailyAvgConversations,
    Slot::DailyAvgMessages,
];

/// Complete standalone page for a bound [`Page`].
pub fn page(page: &Page, title: &str, footer: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n<script src=\"{}\"></script>\n<style>{}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<header><h1>{}</h1></header>\n",
        escape(title),
        CHART_JS,
        STYLE,
        escape(title)
    ));

    html.push_str("<section class=\"metrics-grid\">\n");
    for slot in SUMMARY_SLOTS {
        if let Some(value) = page.text(slot) {
            html.push_str(&format!(
                "<div class=\"metric-card\"><div class=\"metric-value\" id=\"{}\">{}</div>\
                 <div class=\"metric-label\">{}</div></div>\n",
                slot.element_id(),
                escape(value),
                slot.caption()
            ));
        }
    }
    html.push_str("</section>\n");

    let mut configs = serde_json::Map::new();
    for id in ChartId::ALL {
        let spec = page.chart(id);
        let panel_id = panel_for(id);
        let details = page.panel(panel_id);
        if spec.is_none() && details.is_none() {
            continue;
        }

        html.push_str("<section class=\"chart-card\">\n");
        if let Some(spec) = spec {
            let slot = Slot::Chart(id);
            html.push_str(&format!(
                "<h2>{}</h2>\n<canvas id=\"{}\"></canvas>\n",
                escape(&spec.title),
                slot.element_id()
            ));
            configs.insert(slot.element_id().to_string(), chart_config(spec));
        }
        if let Some(details) = details {
            html.push_str(&format!(
                "<div class=\"details\"><h3>{}</h3><div id=\"{}\">{}</div></div>\n",
                panel_id.title(),
                Slot::Panel(panel_id).element_id(),
                panel(details)
            ));
        }
        html.push_str("</section>\n");
    }

    if let Some(footer) = footer {
        html.push_str(&format!("<footer>{}</footer>\n", escape(footer)));
    }
    html.push_str("</div>\n");

    // Keep a literal "</script>" inside the data from closing the tag early.
    let data = Value::Object(configs).to_string().replace("</", "<\\/");
    html.push_str(&format!(
        "<script>\nconst CHARTS = {};\n{}</script>\n</body>\n</html>\n",
        data, SCRIPT
    ));
    html
}

const SCRIPT: &str = r#"function tooltipLabel(rule, ctx) {
  const value = ctx.parsed && typeof ctx.parsed === 'object'
    ? (ctx.parsed.r !== undefined ? ctx.parsed.r : ctx.parsed.y)
    : ctx.parsed;
  switch (rule) {
    case 'label_percent': return ctx.label + ': ' + value + '%';
    case 'conversation_share': return value + '% of conversations used this capability';
    case 'message_count': return value + ' messages';
    default: return Number(value).toFixed(1);
  }
}
for (const [id, config] of Object.entries(CHARTS)) {
  const el = document.getElementById(id);
  if (!el) continue;
  const extra = config.chatlens;
  delete config.chatlens;
  config.options.plugins.tooltip = {
    callbacks: { label: (ctx) => tooltipLabel(extra.tooltip, ctx) }
  };
  if (extra.tickSuffix && config.options.scales && config.options.scales.y) {
    config.options.scales.y.ticks.callback = (v) => v + extra.tickSuffix;
  }
  new Chart(el, config);
}
"#;

const STYLE: &str = r#"
body { margin: 0; background: #0f172a; color: #e2e8f0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; }
.container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
header h1 { margin: 0 0 1.5rem; font-size: 2rem; }
.metrics-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
.metric-card, .chart-card { background: #1e293b; border: 1px solid #334155; border-radius: 12px; padding: 1.25rem; }
.metric-value { font-size: 1.75rem; font-weight: 700; color: #a5b4fc; }
.metric-label { color: #94a3b8; font-size: 0.85rem; margin-top: 0.25rem; }
.chart-card { margin-bottom: 1.5rem; }
.chart-card h2 { margin-top: 0; font-size: 1.2rem; }
.details h3 { font-size: 1rem; color: #94a3b8; }
.keyword-tag, .category-item { display: inline-block; background: #334155; border-radius: 999px; padding: 0.15rem 0.6rem; margin: 0.15rem; font-size: 0.8rem; }
.category-item { border-radius: 6px; }
.interpretation { color: #cbd5e1; }
.algorithm { color: #94a3b8; font-family: monospace; font-size: 0.85rem; margin-top: 0.25rem; }
footer { color: #64748b; font-size: 0.8rem; margin-top: 2rem; text-align: center; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{self, SequenceFill};
    use crate::dashboard::Dashboard;
    use crate::explanations::ExplanationsDocument;
    use crate::metrics::MetricsDocument;
    use serde_json::json;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"R & Python"</b>"#),
            "&lt;b&gt;&quot;R &amp; Python&quot;&lt;/b&gt;"
        );
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_panel_markup_is_escaped() {
        let doc = ExplanationsDocument::from_value(json!({
            "conversation_types_details": {
                "business": {"description": "<script>x</script>", "keywords": ["PPT", "a&b"]}
            }
        }));
        let content = crate::panels::conversation_types(&doc).unwrap().content;
        let html = panel(&content);
        assert!(html.starts_with("<div class=\"type-item\"><h4>Business Documents</h4>"));
        assert!(html.contains("<p>&lt;script&gt;x&lt;/script&gt;</p>"));
        assert!(html.contains("<span class=\"keyword-tag\">a&amp;b</span>"));
    }

    #[test]
    fn test_text_panel_is_verbatim_but_escaped() {
        let html = panel(&PanelContent::Text("Peaks at 9 < 10".to_string()));
        assert_eq!(html, "Peaks at 9 &lt; 10");
    }

    #[test]
    fn test_bar_config_keeps_raw_values_and_cap() {
        let doc = MetricsDocument::from_value(json!({
            "technical": {"tool": {"conversation_percentage": 75}}
        }));
        let config = chart_config(&charts::technical(&doc));
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["datasets"][0]["data"][2], 75.0);
        assert_eq!(config["options"]["scales"]["y"]["max"], 50.0);
        assert_eq!(config["chatlens"]["tickSuffix"], "%");
        assert_eq!(config["options"]["plugins"]["legend"]["display"], false);
    }

    #[test]
    fn test_radar_config_uses_radial_scale() {
        let config = chart_config(&charts::radar(&MetricsDocument::fallback()));
        assert_eq!(config["options"]["scales"]["r"]["ticks"]["stepSize"], 20.0);
        assert_eq!(config["options"]["scales"]["r"]["max"], 100.0);
        assert!(config["options"]["scales"].get("y").is_none());
        assert_eq!(config["chatlens"]["tooltip"], "one_decimal");
    }

    #[test]
    fn test_page_contains_slots() {
        let mut bound = Page::new();
        let dashboard = Dashboard::new(
            MetricsDocument::fallback(),
            ExplanationsDocument::from_value(json!({"time_analysis": "</script>"})),
        );
        dashboard.render(&mut bound, &mut SequenceFill::new(vec![]));

        let html = page(&bound, "Usage", Some("generated"));
        assert!(html.contains("id=\"total-msgs\">13,146</div>"));
        assert!(html.contains("<canvas id=\"radarChart\"></canvas>"));
        assert!(html.contains("<div id=\"timeAnalysisText\">&lt;/script&gt;</div>"));
        assert!(!html.contains("id=\"radarDetails\""));
        assert!(html.contains("<footer>generated</footer>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
