//! Explanation panels.
//!
//! One binder per panel. A binder looks up its own section of the
//! [`ExplanationsDocument`] and returns `None` when it is absent, so the
//! caller leaves that panel alone. Within a section only the keys the
//! dashboard knows about are rendered, in document order; anything else is
//! skipped.

use serde::Serialize;

use crate::explanations::{Descriptions, ExplanationsDocument};
use crate::metrics::{Category, InteractionMode, RadarAxis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    TypeDetails,
    TechnicalDetails,
    TimeAnalysis,
    InteractionDetails,
    RadarDetails,
}

impl PanelId {
    pub const ALL: [PanelId; 5] = [
        PanelId::TypeDetails,
        PanelId::TechnicalDetails,
        PanelId::TimeAnalysis,
        PanelId::InteractionDetails,
        PanelId::RadarDetails,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::TypeDetails => "Conversation Types in Detail",
            PanelId::TechnicalDetails => "Technical Usage in Detail",
            PanelId::TimeAnalysis => "Time Analysis",
            PanelId::InteractionDetails => "Interaction Modes in Detail",
            PanelId::RadarDetails => "Reading the Radar",
        }
    }
}

/// One piece of a fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        text: String,
    },
    Paragraph {
        class: Option<&'static str>,
        text: String,
    },
    /// Short labels shown side by side.
    Tags {
        container: &'static str,
        item: &'static str,
        items: Vec<String>,
    },
    /// Bulleted `name: description` list.
    Definitions {
        items: Vec<(String, String)>,
    },
}

/// A self-contained item inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub class: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PanelContent {
    /// Literal text, shown verbatim.
    Text(String),
    Fragments(Vec<Fragment>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub content: PanelContent,
}

fn heading(text: impl Into<String>) -> Block {
    Block::Heading { text: text.into() }
}

fn paragraph(class: Option<&'static str>, text: impl Into<String>) -> Block {
    Block::Paragraph {
        class,
        text: text.into(),
    }
}

/// Conversation categories: heading, description, keyword tags.
pub fn conversation_types(doc: &ExplanationsDocument) -> Option<Panel> {
    let entries = doc.conversation_types_details()?;
    let fragments = entries
        .into_iter()
        .filter_map(|(key, detail)| {
            let category = Category::from_key(&key)?;
            Some(Fragment {
                class: "type-item",
                blocks: vec![
                    heading(category.label()),
                    paragraph(None, detail.description),
                    Block::Tags {
                        container: "keywords",
                        item: "keyword-tag",
                        items: detail.keywords,
                    },
                ],
            })
        })
        .collect();

    Some(Panel {
        id: PanelId::TypeDetails,
        content: PanelContent::Fragments(fragments),
    })
}

/// Languages, tools and modalities, each only when the document has it.
pub fn technical(doc: &ExplanationsDocument) -> Option<Panel> {
    let details = doc.technical_details()?;
    let mut fragments = Vec::new();

    if let Some(languages) = details.languages {
        fragments.push(definition_list("Programming Languages", languages));
    }
    if let Some(tools) = details.tools {
        fragments.push(definition_list("Tool Usage", tools));
    }
    if let Some(modalities) = details.modalities {
        // Modality names are not shown, only what they were used for.
        let mut blocks = vec![heading("Multimodal Applications")];
        blocks.extend(modalities.into_iter().map(|(_, desc)| paragraph(None, desc)));
        fragments.push(Fragment {
            class: "technical-detail-item",
            blocks,
        });
    }

    Some(Panel {
        id: PanelId::TechnicalDetails,
        content: PanelContent::Fragments(fragments),
    })
}

fn definition_list(title: &str, items: Descriptions) -> Fragment {
    Fragment {
        class: "technical-detail-item",
        blocks: vec![heading(title), Block::Definitions { items }],
    }
}

/// The time narrative, verbatim.
pub fn time_analysis(doc: &ExplanationsDocument) -> Option<Panel> {
    let text = doc.time_analysis()?;
    Some(Panel {
        id: PanelId::TimeAnalysis,
        content: PanelContent::Text(text.to_string()),
    })
}

/// Interaction modes: `"Mode (description)"` heading and the top categories.
pub fn interaction(doc: &ExplanationsDocument) -> Option<Panel> {
    let entries = doc.interaction_details()?;
    let fragments = entries
        .into_iter()
        .filter_map(|(key, detail)| {
            let mode = InteractionMode::from_key(&key)?;
            Some(Fragment {
                class: "interaction-detail-item",
                blocks: vec![
                    heading(format!("{} ({})", mode.label(), detail.description)),
                    Block::Tags {
                        container: "category-list",
                        item: "category-item",
                        items: detail.top3_categories,
                    },
                ],
            })
        })
        .collect();

    Some(Panel {
        id: PanelId::InteractionDetails,
        content: PanelContent::Fragments(fragments),
    })
}

/// Radar axes: heading, interpretation, algorithm line.
pub fn radar(doc: &ExplanationsDocument) -> Option<Panel> {
    let entries = doc.radar_explanations()?;
    let fragments = entries
        .into_iter()
        .filter_map(|(key, explanation)| {
            let axis = RadarAxis::from_key(&key)?;
            Some(Fragment {
                class: "radar-detail-item",
                blocks: vec![
                    heading(axis.label()),
                    paragraph(Some("interpretation"), explanation.interpretation),
                    paragraph(
                        Some("algorithm"),
                        format!("Algorithm: {}", explanation.algorithm),
                    ),
                ],
            })
        })
        .collect();

    Some(Panel {
        id: PanelId::RadarDetails,
        content: PanelContent::Fragments(fragments),
    })
}

/// Every panel whose section is present. Empty for an empty document.
pub fn build_all(doc: &ExplanationsDocument) -> Vec<Panel> {
    if doc.is_empty() {
        return Vec::new();
    }
    [
        conversation_types(doc),
        technical(doc),
        time_analysis(doc),
        interaction(doc),
        radar(doc),
    ]
    .into_iter()
    .flatten()
    .collect()
}
