//! Headline summary values.

use serde::Serialize;

use crate::format;
use crate::metrics::{Capability, MetricsDocument};
use crate::surface::{Slot, SlotContent, Surface};

/// The six display strings at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// e.g. `"800"`
    pub conversations: String,
    /// e.g. `"13,146"`
    pub messages: String,
    /// e.g. `"300"`
    pub usage_days: String,
    /// e.g. `"43.4%"`
    pub tool_usage: String,
    /// e.g. `"16.4"`
    pub average_length: String,
    /// e.g. `"26.6"`
    pub tech_depth: String,
}

impl Summary {
    /// Bind the summary from a metrics document. Each value defaults on its own.
    pub fn from_metrics(doc: &MetricsDocument) -> Self {
        let overview = doc.overview();
        Self {
            conversations: format::whole(overview.total_conversations).to_string(),
            messages: format::group_thousands(format::whole(overview.total_messages)),
            usage_days: format::whole(overview.usage_days).to_string(),
            tool_usage: format::percent(doc.technical().get(Capability::Tool)),
            average_length: format::one_decimal(doc.average_conversation_length()),
            tech_depth: format::one_decimal(doc.personality().tech_depth),
        }
    }

    /// `(slot, value)` pairs in display order.
    pub fn entries(&self) -> [(Slot, &str); 6] {
        [
            (Slot::TotalConversations, self.conversations.as_str()),
            (Slot::TotalMessages, self.messages.as_str()),
            (Slot::UsageDays, self.usage_days.as_str()),
            (Slot::ToolUsage, self.tool_usage.as_str()),
            (Slot::AverageLength, self.average_length.as_str()),
            (Slot::TechDepth, self.tech_depth.as_str()),
        ]
    }

    pub fn apply(&self, surface: &mut dyn Surface) {
        for (slot, value) in self.entries() {
            surface.slot(slot).write(SlotContent::Text(value.to_string()));
        }
    }
}

/// Secondary per-day averages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAverages {
    pub conversations: String,
    pub messages: String,
}

impl DailyAverages {
    pub fn from_metrics(doc: &MetricsDocument) -> Self {
        let overview = doc.overview();
        Self {
            conversations: format::one_decimal(overview.daily_avg_conversations),
            messages: format::one_decimal(overview.daily_avg_messages),
        }
    }

    pub fn apply(&self, surface: &mut dyn Surface) {
        surface
            .slot(Slot::DailyAvgConversations)
            .write(SlotContent::Text(self.conversations.clone()));
        surface
            .slot(Slot::DailyAvgMessages)
            .write(SlotContent::Text(self.messages.clone()));
    }
}
