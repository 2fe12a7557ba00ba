//! The loaded dashboard state and its binding onto a surface.

use crate::charts::{self, ChartSpec, HourlyFill};
use crate::explanations::ExplanationsDocument;
use crate::metrics::MetricsDocument;
use crate::panels::{self, Panel};
use crate::summary::{DailyAverages, Summary};
use crate::surface::{Slot, SlotContent, Surface};

/// Both documents, fixed for the lifetime of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub metrics: MetricsDocument,
    pub explanations: ExplanationsDocument,
}

impl Dashboard {
    pub fn new(metrics: MetricsDocument, explanations: ExplanationsDocument) -> Self {
        Self {
            metrics,
            explanations,
        }
    }

    /// Dashboard built entirely from fallback data.
    pub fn fallback() -> Self {
        Self::new(MetricsDocument::fallback(), ExplanationsDocument::empty())
    }

    pub fn summary(&self) -> Summary {
        Summary::from_metrics(&self.metrics)
    }

    pub fn charts(&self, fill: &mut dyn HourlyFill) -> Vec<ChartSpec> {
        charts::build_all(&self.metrics, fill)
    }

    pub fn panels(&self) -> Vec<Panel> {
        panels::build_all(&self.explanations)
    }

    /// Write summary values, charts and any explanation panels into `surface`.
    ///
    /// Panels whose section is missing are not written, so whatever the
    /// surface already held there stays.
    pub fn render(&self, surface: &mut dyn Surface, fill: &mut dyn HourlyFill) {
        self.summary().apply(surface);
        DailyAverages::from_metrics(&self.metrics).apply(surface);

        for spec in self.charts(fill) {
            surface
                .slot(Slot::Chart(spec.id))
                .write(SlotContent::Chart(spec));
        }

        let panels = self.panels();
        tracing::debug!(panels = panels.len(), "Binding explanation panels");
        for panel in panels {
            surface
                .slot(Slot::Panel(panel.id))
                .write(SlotContent::Panel(panel.content));
        }
    }
}
