//! Plain terminal output.

use crate::charts::{ChartId, ChartSpec};
use crate::format;
use crate::panels::{Block, PanelContent, PanelId};
use crate::surface::{Page, Slot};

const BAR_WIDTH: usize = 30;

/// Horizontal bars, one row per point.
///
/// With an axis cap the bars are scaled to the cap and anything past it is
/// cut off and marked with `>`; otherwise they are scaled to the largest
/// value. Negative values draw as empty bars.
pub fn chart(spec: &ChartSpec) -> String {
    let cap = spec
        .axis
        .as_ref()
        .and_then(|a| a.max)
        .unwrap_or_else(|| spec.series.values.iter().copied().fold(0.0, f64::max));
    let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let suffix = spec.axis.as_ref().and_then(|a| a.tick_suffix).unwrap_or("");

    let mut out = String::new();
    for (i, (label, value)) in spec.points().enumerate() {
        let filled = if cap > 0.0 {
            ((value.max(0.0) / cap) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let overflow = filled > BAR_WIDTH;
        out.push_str(&format!(
            "   {:<width$}  {:<bar_width$}{} {}{}",
            label,
            "█".repeat(filled.min(BAR_WIDTH)),
            if overflow { ">" } else { " " },
            format::plain_number(value),
            suffix,
            width = label_width,
            bar_width = BAR_WIDTH,
        ));
        if spec.highlight == Some(i) {
            out.push_str("  ◆ peak");
        }
        out.push('\n');
    }
    out
}

/// Panel content as indented lines.
pub fn panel(content: &PanelContent) -> String {
    let fragments = match content {
        PanelContent::Text(text) => return format!("   {}\n", text),
        PanelContent::Fragments(fragments) => fragments,
    };

    let mut out = String::new();
    for block in fragments.iter().flat_map(|f| &f.blocks) {
        match block {
            Block::Heading { text } => out.push_str(&format!("   ▸ {}\n", text)),
            Block::Paragraph { text, .. } => out.push_str(&format!("     {}\n", text)),
            Block::Tags { items, .. } if !items.is_empty() => {
                out.push_str(&format!("     [{}]\n", items.join("] [")));
            }
            Block::Tags { .. } => {}
            Block::Definitions { items } => {
                for (name, desc) in items {
                    out.push_str(&format!("     - {}: {}\n", name, desc));
                }
            }
        }
    }
    out
}

fn panel_for(chart: ChartId) -> PanelId {
    match chart {
        ChartId::ConversationTypes => PanelId::TypeDetails,
        ChartId::Technical => PanelId::TechnicalDetails,
        ChartId::Time => PanelId::TimeAnalysis,
        ChartId::Interaction => PanelId::InteractionDetails,
        ChartId::Radar => PanelId::RadarDetails,
    }
}

/// Whole page for the terminal.
pub fn page(page: &Page, title: &str, footer: Option<&str>) -> String {
    let rule = "─".repeat(60);
    let mut out = format!("\n╭{rule}╮\n│{:^60}│\n╰{rule}╯\n\n", title);

    out.push_str("SUMMARY\n");
    let pairs = [
        (Slot::TotalConversations, Slot::TotalMessages),
        (Slot::UsageDays, Slot::ToolUsage),
        (Slot::AverageLength, Slot::TechDepth),
        (Slot::DailyAvgConversations, Slot::DailyAvgMessages),
    ];
    let cell = |slot: Slot| {
        page.text(slot)
            .map(|value| format!("{}: {}", slot.caption(), value))
    };
    for (left, right) in pairs {
        match (cell(left), cell(right)) {
            (Some(l), Some(r)) => out.push_str(&format!("   {:<36} {}\n", l, r)),
            (Some(only), None) | (None, Some(only)) => out.push_str(&format!("   {}\n", only)),
            (None, None) => {}
        }
    }
    out.push('\n');

    for id in ChartId::ALL {
        if let Some(spec) = page.chart(id) {
            out.push_str(&format!("{}\n", spec.title.to_uppercase()));
            out.push_str(&chart(spec));
            out.push('\n');
        }
        let panel_id = panel_for(id);
        if let Some(details) = page.panel(panel_id) {
            out.push_str(&format!("   {}\n", panel_id.title()));
            out.push_str(&panel(details));
            out.push('\n');
        }
    }

    if let Some(footer) = footer {
        out.push_str(&format!("{}\n", footer));
    }
    out
}
