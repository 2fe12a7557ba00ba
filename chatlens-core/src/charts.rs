//! Chart specifications built from the metrics document.
//!
//! Each builder is a pure function of the [`MetricsDocument`] (plus, for the
//! time-of-day chart, a source of filler values). The resulting [`ChartSpec`]
//! says nothing about pixels: it carries labels, one series of numbers with
//! the same length as the labels, and display hints for whatever plotting
//! library draws it.

use rand::Rng;
use serde::Serialize;

use crate::format;
use crate::metrics::{
    Capability, Category, InteractionMode, MetricsDocument, RadarAxis, HOURS_PER_DAY,
};

const PRIMARY: &str = "#6366f1";
const TICK_COLOR: &str = "#cbd5e1";
const GRID_COLOR: &str = "#334155";

/// Stable identifier of each chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    ConversationTypes,
    Technical,
    Time,
    Interaction,
    Radar,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::ConversationTypes,
        ChartId::Technical,
        ChartId::Time,
        ChartId::Interaction,
        ChartId::Radar,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
    Pie,
    Radar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Hidden,
    Right,
    Bottom,
}

/// How a tooltip turns a data point into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipFormat {
    /// `"{label}: {value}%"`
    LabelPercent,
    /// `"{value}% of conversations used this capability"`
    ConversationShare,
    /// `"{value} messages"`
    MessageCount,
    /// Value to one decimal place
    OneDecimal,
}

impl TooltipFormat {
    pub fn format(&self, label: &str, value: f64) -> String {
        match self {
            TooltipFormat::LabelPercent => {
                format!("{}: {}%", label, format::plain_number(value))
            }
            TooltipFormat::ConversationShare => format!(
                "{}% of conversations used this capability",
                format::plain_number(value)
            ),
            TooltipFormat::MessageCount => {
                format!("{} messages", format::plain_number(value))
            }
            TooltipFormat::OneDecimal => format::one_decimal(value),
        }
    }
}

/// Value axis bounds. `max` caps the display only; data is never clamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub min: f64,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub tick_suffix: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: Option<String>,
    pub values: Vec<f64>,
    /// One color per point, or a single color for the whole series.
    pub fill: Vec<String>,
    pub border: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Series,
    pub axis: Option<Axis>,
    pub tooltip: TooltipFormat,
    pub legend: LegendPosition,
    /// Index of the point to call out, when the chart has one.
    pub highlight: Option<usize>,
    pub tick_color: &'static str,
    pub grid_color: &'static str,
}

impl ChartSpec {
    /// Tooltip text for the point at `index`.
    pub fn tooltip_at(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.series.values.get(index)?;
        Some(self.tooltip.format(label, *value))
    }

    /// `(label, value)` pairs in display order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.series.values.iter().copied())
    }
}

fn colors(values: &[&str]) -> Vec<String> {
    values.iter().map(|c| c.to_string()).collect()
}

/// Supplies per-hour values for hours the document has no data for.
///
/// These values are a stand-in for "no data", not a metric.
pub trait HourlyFill {
    fn fill(&mut self, hour: usize) -> f64;
}

/// Random integer in `[0, 100)` per missing hour.
pub struct RandomFill<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomFill<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomFill<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> HourlyFill for RandomFill<R> {
    fn fill(&mut self, _hour: usize) -> f64 {
        self.rng.gen_range(0..100) as f64
    }
}

/// Replays a fixed sequence, then zeros once it runs out.
pub struct SequenceFill {
    values: std::vec::IntoIter<f64>,
}

impl SequenceFill {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into().into_iter(),
        }
    }
}

impl HourlyFill for SequenceFill {
    fn fill(&mut self, _hour: usize) -> f64 {
        self.values.next().unwrap_or(0.0)
    }
}

/// Conversation type distribution. Values are shown as given, even when
/// they do not add up to 100.
pub fn conversation_types(doc: &MetricsDocument) -> ChartSpec {
    let types = doc.conversation_types();
    ChartSpec {
        id: ChartId::ConversationTypes,
        kind: ChartKind::Doughnut,
        title: "Conversation Types".to_string(),
        labels: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
        series: Series {
            label: None,
            values: types.percentages.to_vec(),
            fill: colors(&[PRIMARY, "#8b5cf6", "#ec4899", "#10b981", "#f59e0b"]),
            border: colors(&["#1e293b"]),
        },
        axis: None,
        tooltip: TooltipFormat::LabelPercent,
        legend: LegendPosition::Right,
        highlight: None,
        tick_color: TICK_COLOR,
        grid_color: GRID_COLOR,
    }
}

/// Capability usage bars.
///
/// The axis stops at 50%. Values above that are passed through untouched and
/// left for the renderer to cut off.
pub fn technical(doc: &MetricsDocument) -> ChartSpec {
    let usage = doc.technical();
    ChartSpec {
        id: ChartId::Technical,
        kind: ChartKind::Bar,
        title: "Capability Usage".to_string(),
        labels: Capability::ALL.iter().map(|c| c.label().to_string()).collect(),
        series: Series {
            label: Some("Share of conversations (%)".to_string()),
            values: usage.conversation_percentages.to_vec(),
            fill: colors(&[
                "rgba(99, 102, 241, 0.8)",
                "rgba(236, 72, 153, 0.8)",
                "rgba(16, 185, 129, 0.8)",
                "rgba(245, 158, 11, 0.8)",
            ]),
            border: colors(&[PRIMARY, "#ec4899", "#10b981", "#f59e0b"]),
        },
        axis: Some(Axis {
            min: 0.0,
            max: Some(50.0),
            step: None,
            tick_suffix: Some("%"),
        }),
        tooltip: TooltipFormat::ConversationShare,
        legend: LegendPosition::Hidden,
        highlight: None,
        tick_color: TICK_COLOR,
        grid_color: GRID_COLOR,
    }
}

/// Messages per hour of day, `"0:00"` through `"23:00"`.
///
/// Hours missing from the document are filled from `fill`. The busiest hour
/// (first one on ties) is reported as the highlight.
pub fn time_of_day(doc: &MetricsDocument, fill: &mut dyn HourlyFill) -> ChartSpec {
    let dist = doc.hourly_distribution();
    let values: Vec<f64> = dist
        .hours
        .iter()
        .enumerate()
        .map(|(hour, value)| value.unwrap_or_else(|| fill.fill(hour)))
        .collect();

    let peak = values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i);

    ChartSpec {
        id: ChartId::Time,
        kind: ChartKind::Line,
        title: "Activity by Hour".to_string(),
        labels: (0..HOURS_PER_DAY).map(|h| format!("{}:00", h)).collect(),
        series: Series {
            label: Some("Messages".to_string()),
            values,
            fill: colors(&["rgba(99, 102, 241, 0.1)"]),
            border: colors(&[PRIMARY]),
        },
        axis: Some(Axis {
            min: 0.0,
            max: None,
            step: None,
            tick_suffix: None,
        }),
        tooltip: TooltipFormat::MessageCount,
        legend: LegendPosition::Hidden,
        highlight: peak,
        tick_color: TICK_COLOR,
        grid_color: GRID_COLOR,
    }
}

/// Interaction mode split.
pub fn interaction(doc: &MetricsDocument) -> ChartSpec {
    let modes = doc.interaction_modes();
    ChartSpec {
        id: ChartId::Interaction,
        kind: ChartKind::Pie,
        title: "Interaction Modes".to_string(),
        labels: InteractionMode::ALL
            .iter()
            .map(|m| m.label().to_string())
            .collect(),
        series: Series {
            label: None,
            values: InteractionMode::ALL.iter().map(|m| modes.get(*m)).collect(),
            fill: colors(&[
                "rgba(99, 102, 241, 0.8)",
                "rgba(139, 92, 246, 0.8)",
                "rgba(236, 72, 153, 0.8)",
            ]),
            border: colors(&[PRIMARY, "#8b5cf6", "#ec4899"]),
        },
        axis: None,
        tooltip: TooltipFormat::LabelPercent,
        legend: LegendPosition::Bottom,
        highlight: None,
        tick_color: TICK_COLOR,
        grid_color: GRID_COLOR,
    }
}

/// Capability radar on a fixed 0-100 scale.
///
/// The last two axes reuse the multimodal and tool shares from the
/// capability usage section.
pub fn radar(doc: &MetricsDocument) -> ChartSpec {
    let indices = doc.personality();
    let usage = doc.technical();
    let values = RadarAxis::ALL
        .iter()
        .map(|axis| match axis {
            RadarAxis::TechDepth => indices.tech_depth,
            RadarAxis::CreativeExploration => indices.creative_exploration,
            RadarAxis::WorkflowIntegration => indices.workflow_integration,
            RadarAxis::IterativeOptimization => indices.iterative_optimization,
            RadarAxis::MultimodalUsage => usage.get(Capability::Multimodal),
            RadarAxis::ToolUsage => usage.get(Capability::Tool),
        })
        .collect();

    ChartSpec {
        id: ChartId::Radar,
        kind: ChartKind::Radar,
        title: "Capability Profile".to_string(),
        labels: RadarAxis::ALL.iter().map(|a| a.label().to_string()).collect(),
        series: Series {
            label: Some("Index".to_string()),
            values,
            fill: colors(&["rgba(99, 102, 241, 0.2)"]),
            border: colors(&[PRIMARY]),
        },
        axis: Some(Axis {
            min: 0.0,
            max: Some(100.0),
            step: Some(20.0),
            tick_suffix: None,
        }),
        tooltip: TooltipFormat::OneDecimal,
        legend: LegendPosition::Hidden,
        highlight: None,
        tick_color: TICK_COLOR,
        grid_color: GRID_COLOR,
    }
}

/// All five charts in dashboard order.
pub fn build_all(doc: &MetricsDocument, fill: &mut dyn HourlyFill) -> Vec<ChartSpec> {
    vec![
        conversation_types(doc),
        technical(doc),
        time_of_day(doc, fill),
        interaction(doc),
        radar(doc),
    ]
}
