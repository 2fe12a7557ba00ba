//! Output slots.
//!
//! Bound values are written into named slots on a [`Surface`]. Asking for a
//! slot the surface does not have yields an empty [`SlotHandle`] whose write
//! does nothing, so binders never check for existence themselves.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::charts::{ChartId, ChartSpec};
use crate::panels::{PanelContent, PanelId};

/// Logical output locations on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    TotalConversations,
    TotalMessages,
    UsageDays,
    ToolUsage,
    AverageLength,
    TechDepth,
    DailyAvgConversations,
    DailyAvgMessages,
    Chart(ChartId),
    Panel(PanelId),
}

impl Slot {
    /// Every slot the dashboard knows about.
    pub fn all() -> Vec<Slot> {
        let mut slots = vec![
            Slot::TotalConversations,
            Slot::TotalMessages,
            Slot::UsageDays,
            Slot::ToolUsage,
            Slot::AverageLength,
            Slot::TechDepth,
            Slot::DailyAvgConversations,
            Slot::DailyAvgMessages,
        ];
        slots.extend(ChartId::ALL.into_iter().map(Slot::Chart));
        slots.extend(PanelId::ALL.into_iter().map(Slot::Panel));
        slots
    }

    /// Caption shown next to a summary value.
    pub fn caption(&self) -> &'static str {
        match self {
            Slot::TotalConversations => "Conversations",
            Slot::TotalMessages => "Messages",
            Slot::UsageDays => "Days of Use",
            Slot::ToolUsage => "Tool Usage",
            Slot::AverageLength => "Avg. Conversation Length",
            Slot::TechDepth => "Tech Depth Index",
            Slot::DailyAvgConversations => "Conversations / Day",
            Slot::DailyAvgMessages => "Messages / Day",
            Slot::Chart(_) => "Chart",
            Slot::Panel(id) => id.title(),
        }
    }

    /// Stable element id used by the HTML page.
    pub fn element_id(&self) -> &'static str {
        match self {
            Slot::TotalConversations => "total-convs",
            Slot::TotalMessages => "total-msgs",
            Slot::UsageDays => "usage-days",
            Slot::ToolUsage => "tool-usage",
            Slot::AverageLength => "avg-length",
            Slot::TechDepth => "tech-depth",
            Slot::DailyAvgConversations => "daily-avg-convs",
            Slot::DailyAvgMessages => "daily-avg-msgs",
            Slot::Chart(ChartId::ConversationTypes) => "conversationTypesChart",
            Slot::Chart(ChartId::Technical) => "technicalChart",
            Slot::Chart(ChartId::Time) => "timeChart",
            Slot::Chart(ChartId::Interaction) => "interactionChart",
            Slot::Chart(ChartId::Radar) => "radarChart",
            Slot::Panel(PanelId::TypeDetails) => "typeDetails",
            Slot::Panel(PanelId::TechnicalDetails) => "technicalDetails",
            Slot::Panel(PanelId::TimeAnalysis) => "timeAnalysisText",
            Slot::Panel(PanelId::InteractionDetails) => "interactionDetails",
            Slot::Panel(PanelId::RadarDetails) => "radarDetails",
        }
    }
}

/// What a slot can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SlotContent {
    Text(String),
    Chart(ChartSpec),
    Panel(PanelContent),
}

/// Write access to one slot, or nothing if the slot is missing.
pub struct SlotHandle<'a> {
    target: Option<&'a mut Option<SlotContent>>,
}

impl<'a> SlotHandle<'a> {
    pub fn new(target: &'a mut Option<SlotContent>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Handle for a slot that does not exist.
    pub fn missing() -> Self {
        Self { target: None }
    }

    pub fn is_present(&self) -> bool {
        self.target.is_some()
    }

    /// Replace the slot's content. Returns `false` if the slot is missing.
    pub fn write(self, content: SlotContent) -> bool {
        match self.target {
            Some(target) => {
                *target = Some(content);
                true
            }
            None => false,
        }
    }
}

/// Anything bound values can be written into.
pub trait Surface {
    fn slot(&mut self, slot: Slot) -> SlotHandle<'_>;
}

/// In-memory surface. Slots not registered on the page are missing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    slots: BTreeMap<Slot, Option<SlotContent>>,
}

impl Page {
    /// Page with every known slot present and empty.
    pub fn new() -> Self {
        Self::with_slots(Slot::all())
    }

    /// Page with only the given slots present.
    pub fn with_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slots: slots.into_iter().map(|s| (s, None)).collect(),
        }
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.slots.get(&slot)?.as_ref()
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        match self.get(slot)? {
            SlotContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn chart(&self, id: ChartId) -> Option<&ChartSpec> {
        match self.get(Slot::Chart(id))? {
            SlotContent::Chart(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&PanelContent> {
        match self.get(Slot::Panel(id))? {
            SlotContent::Panel(content) => Some(content),
            _ => None,
        }
    }

    /// Filled slots in slot order.
    pub fn filled(&self) -> impl Iterator<Item = (Slot, &SlotContent)> + '_ {
        self.slots
            .iter()
            .filter_map(|(slot, content)| Some((*slot, content.as_ref()?)))
    }
}

impl Surface for Page {
    fn slot(&mut self, slot: Slot) -> SlotHandle<'_> {
        match self.slots.get_mut(&slot) {
            Some(target) => SlotHandle::new(target),
            None => SlotHandle::missing(),
        }
    }
}
