//! # chatlens-core
//!
//! Core library for chatlens - an AI usage analytics dashboard.
//!
//! This library provides:
//! - Typed, defaulting views over the metrics and explanations documents
//! - A loader that always yields a renderable dashboard
//! - Summary, chart-spec and explanation-panel binders
//! - Output slots plus HTML and terminal renderers
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction:
//! - **Load:** both documents are fetched once; failures fall back
//! - **Bind:** pure functions turn the documents into display values
//! - **Render:** bound values are written into named slots on a surface
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatlens_core::charts::RandomFill;
//! use chatlens_core::loader::{FetchSource, Loader};
//! use chatlens_core::{Config, Page};
//!
//! # async fn run() -> chatlens_core::Result<()> {
//! let config = Config::load()?;
//! let loader = Loader::from_config(FetchSource::new()?, &config.sources, &config.loader)?;
//! let (dashboard, _report) = loader.load().await;
//!
//! let mut page = Page::new();
//! dashboard.render(&mut page, &mut RandomFill::thread());
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use explanations::ExplanationsDocument;
pub use metrics::MetricsDocument;
pub use summary::Summary;
pub use surface::{Page, Slot, SlotContent, Surface};

// Public modules
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod explanations;
pub mod format;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod panels;
pub mod render;
pub mod summary;
pub mod surface;
