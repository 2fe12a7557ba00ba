//! Typed view over the aggregate usage metrics document.
//!
//! The document is kept as the raw JSON tree it was loaded from. Nothing is
//! validated up front; every consumer reads through [`MetricsDocument::value_or`],
//! which degrades a missing leaf (or any missing ancestor) to a literal default.
//!
//! A leaf is absent when its key is missing, `null`, or not a JSON number.
//! A numeric zero is a real reading and is kept.

use chrono::{DateTime, NaiveDateTime};
use serde_json::{json, Value};

use crate::error::Result;

/// Number of hour-of-day buckets in the activity distribution.
pub const HOURS_PER_DAY: usize = 24;

/// Conversation categories shown in the distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Technical,
    Business,
    Creative,
    Learning,
    Daily,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Business,
        Category::Creative,
        Category::Learning,
        Category::Daily,
    ];

    /// Key used in both documents.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Business => "business",
            Category::Creative => "creative",
            Category::Learning => "learning",
            Category::Daily => "daily",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technical => "Technical Deep Dives",
            Category::Business => "Business Documents",
            Category::Creative => "Creative Collaboration",
            Category::Learning => "Knowledge Learning",
            Category::Daily => "Everyday Questions",
        }
    }

    /// Percentage used when the document has none.
    pub fn default_percentage(&self) -> f64 {
        match self {
            Category::Technical => 57.9,
            Category::Business => 6.9,
            Category::Creative => 16.1,
            Category::Learning => 15.0,
            Category::Daily => 5.0,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Assistant capabilities tracked per conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Code,
    Image,
    Tool,
    Multimodal,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Code,
        Capability::Image,
        Capability::Tool,
        Capability::Multimodal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Capability::Code => "code",
            Capability::Image => "image",
            Capability::Tool => "tool",
            Capability::Multimodal => "multimodal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Capability::Code => "Code",
            Capability::Image => "Images",
            Capability::Tool => "Tools",
            Capability::Multimodal => "Multimodal",
        }
    }

    pub fn default_percentage(&self) -> f64 {
        match self {
            Capability::Code => 20.0,
            Capability::Image => 14.8,
            Capability::Tool => 43.4,
            Capability::Multimodal => 16.1,
        }
    }
}

/// How the user and assistant split the work in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    Collaborative,
    Guidance,
    Qa,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 3] = [
        InteractionMode::Collaborative,
        InteractionMode::Guidance,
        InteractionMode::Qa,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            InteractionMode::Collaborative => "collaborative",
            InteractionMode::Guidance => "guidance",
            InteractionMode::Qa => "qa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Collaborative => "Collaborative",
            InteractionMode::Guidance => "Guidance",
            InteractionMode::Qa => "Q&A",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// Axes of the capability radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarAxis {
    TechDepth,
    CreativeExploration,
    WorkflowIntegration,
    IterativeOptimization,
    MultimodalUsage,
    ToolUsage,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 6] = [
        RadarAxis::TechDepth,
        RadarAxis::CreativeExploration,
        RadarAxis::WorkflowIntegration,
        RadarAxis::IterativeOptimization,
        RadarAxis::MultimodalUsage,
        RadarAxis::ToolUsage,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RadarAxis::TechDepth => "tech_depth",
            RadarAxis::CreativeExploration => "creative_exploration",
            RadarAxis::WorkflowIntegration => "workflow_integration",
            RadarAxis::IterativeOptimization => "iterative_optimization",
            RadarAxis::MultimodalUsage => "multimodal_usage",
            RadarAxis::ToolUsage => "tool_usage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::TechDepth => "Tech Depth",
            RadarAxis::CreativeExploration => "Creative Exploration",
            RadarAxis::WorkflowIntegration => "Workflow Integration",
            RadarAxis::IterativeOptimization => "Iterative Optimization",
            RadarAxis::MultimodalUsage => "Multimodal Usage",
            RadarAxis::ToolUsage => "Tool Usage",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

/// Headline counts. Every field is defaulted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_conversations: f64,
    pub total_messages: f64,
    pub usage_days: f64,
    pub daily_avg_conversations: f64,
    pub daily_avg_messages: f64,
}

/// Per-category conversation share, in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTypes {
    pub percentages: [f64; 5],
}

impl ConversationTypes {
    pub fn get(&self, category: Category) -> f64 {
        self.percentages[category as usize]
    }
}

/// Per-capability conversation share, in [`Capability::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalUsage {
    pub conversation_percentages: [f64; 4],
}

impl TechnicalUsage {
    pub fn get(&self, capability: Capability) -> f64 {
        self.conversation_percentages[capability as usize]
    }
}

/// Interaction mode split.
///
/// Defaulted as one group: when the document carries an `interaction_modes`
/// object its fields are taken as they are, otherwise all three default.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionModes {
    pub collaborative: f64,
    pub guidance: f64,
    pub qa: f64,
}

impl InteractionModes {
    pub const DEFAULT: InteractionModes = InteractionModes {
        collaborative: 40.0,
        guidance: 35.0,
        qa: 25.0,
    };

    pub fn get(&self, mode: InteractionMode) -> f64 {
        match mode {
            InteractionMode::Collaborative => self.collaborative,
            InteractionMode::Guidance => self.guidance,
            InteractionMode::Qa => self.qa,
        }
    }
}

/// Personality indices feeding the radar.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityIndices {
    pub tech_depth: f64,
    pub creative_exploration: f64,
    pub workflow_integration: f64,
    pub iterative_optimization: f64,
}

/// Messages per hour of day. `None` where the document has no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyDistribution {
    pub hours: [Option<f64>; HOURS_PER_DAY],
}

impl HourlyDistribution {
    /// Number of hours with a recorded value.
    pub fn recorded(&self) -> usize {
        self.hours.iter().filter(|h| h.is_some()).count()
    }
}

/// Aggregate usage metrics, read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsDocument {
    raw: Value,
}

impl MetricsDocument {
    /// Wrap an already-parsed JSON value. Any shape is accepted.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse a JSON document. Only syntax is checked.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    /// Fully populated document used when the real one cannot be loaded.
    pub fn fallback() -> Self {
        Self::from_value(json!({
            "overview": {
                "total_conversations": 800,
                "total_messages": 13146,
                "usage_days": 300,
                "daily_avg_conversations": 3.4,
                "daily_avg_messages": 53.2
            },
            "conversation_types": {
                "technical": { "percentage": 57.9 },
                "business": { "percentage": 6.9 },
                "creative": { "percentage": 16.1 },
                "learning": { "percentage": 15.0 },
                "daily": { "percentage": 5.0 }
            },
            "technical": {
                "code": { "conversation_percentage": 20.0 },
                "image": { "conversation_percentage": 14.8 },
                "tool": { "conversation_percentage": 43.4 },
                "multimodal": { "conversation_percentage": 16.1 }
            },
            "interaction": {
                "conversation_length": { "average": 16.4 },
                "interaction_modes": { "collaborative": 40, "guidance": 35, "qa": 25 }
            },
            "personality": {
                "indices": {
                    "tech_depth": 26.6,
                    "creative_exploration": 30.9,
                    "workflow_integration": 61.4
                },
                "iterative_optimization": { "percentage": 40.0 }
            },
            "time_patterns": {
                "active_hours": { "hourly_distribution": {} }
            }
        }))
    }

    /// Walk `path` through nested objects. Any non-object ancestor ends the walk.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.raw, |node, key| node.as_object()?.get(*key))
    }

    /// Numeric leaf at `path`, if present.
    pub fn number(&self, path: &[&str]) -> Option<f64> {
        self.lookup(path).and_then(Value::as_f64)
    }

    /// Numeric leaf at `path`, or `default` when it or any ancestor is absent.
    pub fn value_or(&self, path: &[&str], default: f64) -> f64 {
        self.number(path).unwrap_or(default)
    }

    /// When the metrics were computed, if the document says so.
    ///
    /// Accepts RFC 3339 as well as offset-less ISO 8601 timestamps.
    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        let text = self.lookup(&["generated_at"])?.as_str()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
            return Some(ts.naive_local());
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    pub fn overview(&self) -> Overview {
        Overview {
            total_conversations: self.value_or(&["overview", "total_conversations"], 800.0),
            total_messages: self.value_or(&["overview", "total_messages"], 13146.0),
            usage_days: self.value_or(&["overview", "usage_days"], 300.0),
            daily_avg_conversations: self
                .value_or(&["overview", "daily_avg_conversations"], 3.4),
            daily_avg_messages: self.value_or(&["overview", "daily_avg_messages"], 53.2),
        }
    }

    pub fn conversation_types(&self) -> ConversationTypes {
        ConversationTypes {
            percentages: Category::ALL.map(|c| {
                self.value_or(
                    &["conversation_types", c.key(), "percentage"],
                    c.default_percentage(),
                )
            }),
        }
    }

    pub fn technical(&self) -> TechnicalUsage {
        TechnicalUsage {
            conversation_percentages: Capability::ALL.map(|c| {
                self.value_or(
                    &["technical", c.key(), "conversation_percentage"],
                    c.default_percentage(),
                )
            }),
        }
    }

    /// Average messages per conversation.
    pub fn average_conversation_length(&self) -> f64 {
        self.value_or(&["interaction", "conversation_length", "average"], 16.4)
    }

    pub fn interaction_modes(&self) -> InteractionModes {
        match self.lookup(&["interaction", "interaction_modes"]) {
            Some(Value::Object(modes)) => {
                let field = |mode: InteractionMode| {
                    modes.get(mode.key()).and_then(Value::as_f64).unwrap_or(0.0)
                };
                InteractionModes {
                    collaborative: field(InteractionMode::Collaborative),
                    guidance: field(InteractionMode::Guidance),
                    qa: field(InteractionMode::Qa),
                }
            }
            _ => InteractionModes::DEFAULT,
        }
    }

    pub fn personality(&self) -> PersonalityIndices {
        PersonalityIndices {
            tech_depth: self.value_or(&["personality", "indices", "tech_depth"], 26.6),
            creative_exploration: self
                .value_or(&["personality", "indices", "creative_exploration"], 30.9),
            workflow_integration: self
                .value_or(&["personality", "indices", "workflow_integration"], 61.4),
            iterative_optimization: self
                .value_or(&["personality", "iterative_optimization", "percentage"], 40.0),
        }
    }

    /// Hour-of-day message counts, keyed `"0"`..`"23"` in the document.
    pub fn hourly_distribution(&self) -> HourlyDistribution {
        let dist = self
            .lookup(&["time_patterns", "active_hours", "hourly_distribution"])
            .and_then(Value::as_object);

        let mut hours = [None; HOURS_PER_DAY];
        if let Some(dist) = dist {
            for (hour, slot) in hours.iter_mut().enumerate() {
                *slot = dist.get(&hour.to_string()).and_then(Value::as_f64);
            }
        }
        HourlyDistribution { hours }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(value: Value) -> MetricsDocument {
        MetricsDocument::from_value(value)
    }

    #[test]
    fn test_value_or_walks_nested_objects() {
        let d = doc(json!({"a": {"b": {"c": 4.5}}}));
        assert_eq!(d.value_or(&["a", "b", "c"], 1.0), 4.5);
        assert_eq!(d.value_or(&["a", "b", "missing"], 1.0), 1.0);
        assert_eq!(d.value_or(&["a", "missing", "c"], 2.0), 2.0);
        assert_eq!(d.value_or(&["missing"], 3.0), 3.0);
    }

    #[test]
    fn test_value_or_treats_wrong_types_as_absent() {
        let d = doc(json!({"a": {"b": "12"}, "x": [1, 2], "n": null}));
        assert_eq!(d.value_or(&["a", "b"], 1.0), 1.0);
        assert_eq!(d.value_or(&["x", "0"], 7.0), 7.0);
        assert_eq!(d.value_or(&["n"], 9.0), 9.0);
        assert_eq!(d.value_or(&["a", "b", "c"], 5.0), 5.0);
    }

    #[test]
    fn test_zero_is_kept() {
        let d = doc(json!({"overview": {"usage_days": 0}}));
        assert_eq!(d.overview().usage_days, 0.0);
    }

    #[test]
    fn test_non_object_root_degrades_to_defaults() {
        let d = doc(json!([1, 2, 3]));
        assert_eq!(d.overview().total_conversations, 800.0);
        assert_eq!(d.conversation_types().get(Category::Daily), 5.0);
        assert_eq!(d.hourly_distribution().recorded(), 0);
    }

    #[test]
    fn test_overview_defaults_per_field() {
        let d = doc(json!({"overview": {"total_conversations": 12, "daily_avg_messages": 9.5}}));
        let o = d.overview();
        assert_eq!(o.total_conversations, 12.0);
        assert_eq!(o.total_messages, 13146.0);
        assert_eq!(o.usage_days, 300.0);
        assert_eq!(o.daily_avg_conversations, 3.4);
        assert_eq!(o.daily_avg_messages, 9.5);
    }

    #[test]
    fn test_conversation_types_partial_section() {
        let d = doc(json!({
            "conversation_types": {
                "technical": {"percentage": 70.0},
                "business": {},
                "creative": {"percentage": 1.5, "count": 12}
            }
        }));
        let t = d.conversation_types();
        assert_eq!(t.percentages, [70.0, 6.9, 1.5, 15.0, 5.0]);
    }

    #[test]
    fn test_technical_partial_section() {
        let d = doc(json!({"technical": {"tool": {"conversation_percentage": 75}}}));
        let t = d.technical();
        assert_eq!(t.get(Capability::Tool), 75.0);
        assert_eq!(t.get(Capability::Code), 20.0);
        assert_eq!(t.get(Capability::Image), 14.8);
        assert_eq!(t.get(Capability::Multimodal), 16.1);
    }

    #[test]
    fn test_interaction_modes_group_default() {
        let d = doc(json!({"interaction": {"conversation_length": {"average": 3.0}}}));
        assert_eq!(d.interaction_modes(), InteractionModes::DEFAULT);
        assert_eq!(d.average_conversation_length(), 3.0);
    }

    #[test]
    fn test_interaction_modes_taken_as_is_when_present() {
        let d = doc(json!({"interaction": {"interaction_modes": {"collaborative": 70, "qa": 30}}}));
        let modes = d.interaction_modes();
        assert_eq!(modes.collaborative, 70.0);
        // No per-field default inside a present group
        assert_eq!(modes.guidance, 0.0);
        assert_eq!(modes.qa, 30.0);
    }

    #[test]
    fn test_personality_defaults_per_field() {
        let d = doc(json!({
            "personality": {
                "indices": {"creative_exploration": 50.0},
                "iterative_optimization": {"conversations": 4}
            }
        }));
        let p = d.personality();
        assert_eq!(p.tech_depth, 26.6);
        assert_eq!(p.creative_exploration, 50.0);
        assert_eq!(p.workflow_integration, 61.4);
        assert_eq!(p.iterative_optimization, 40.0);
    }

    #[test]
    fn test_hourly_distribution_reads_string_keys() {
        let d = doc(json!({
            "time_patterns": {"active_hours": {"hourly_distribution": {"0": 5, "13": 120, "30": 9}}}
        }));
        let h = d.hourly_distribution();
        assert_eq!(h.hours[0], Some(5.0));
        assert_eq!(h.hours[13], Some(120.0));
        assert_eq!(h.hours[1], None);
        assert_eq!(h.recorded(), 2);
    }

    #[test]
    fn test_fallback_is_fully_populated() {
        let d = MetricsDocument::fallback();
        assert_eq!(d.number(&["overview", "total_messages"]), Some(13146.0));
        assert_eq!(
            d.number(&["technical", "code", "conversation_percentage"]),
            Some(20.0)
        );
        assert_eq!(
            d.number(&["personality", "iterative_optimization", "percentage"]),
            Some(40.0)
        );
        assert_eq!(d.interaction_modes(), InteractionModes::DEFAULT);
        assert_eq!(d.hourly_distribution().recorded(), 0);
    }

    #[test]
    fn test_generated_at_formats() {
        let naive = doc(json!({"generated_at": "2025-01-05T12:34:56.123456"}));
        assert!(naive.generated_at().is_some());

        let rfc = doc(json!({"generated_at": "2025-01-05T12:34:56+08:00"}));
        assert!(rfc.generated_at().is_some());

        assert!(doc(json!({"generated_at": "yesterday"})).generated_at().is_none());
        assert!(doc(json!({})).generated_at().is_none());
    }

    #[test]
    fn test_key_lookups() {
        assert_eq!(Category::from_key("creative"), Some(Category::Creative));
        assert_eq!(Category::from_key("gaming"), None);
        assert_eq!(InteractionMode::from_key("qa"), Some(InteractionMode::Qa));
        assert_eq!(RadarAxis::from_key("tool_usage"), Some(RadarAxis::ToolUsage));
    }
}
