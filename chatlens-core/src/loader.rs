//! Document loading.
//!
//! Both documents are fetched once, concurrently, each bounded by the
//! configured timeout. A failed metrics fetch is replaced by the complete
//! fallback document and a failed explanations fetch by an empty one, so a
//! load always produces a [`Dashboard`]. Nothing is retried.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{LoaderConfig, SourcesConfig};
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::explanations::ExplanationsDocument;
use crate::metrics::MetricsDocument;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    Path(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::Resource("empty source location".to_string()));
        }
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(SourceLocation::Url(location.to_string()))
        } else {
            Ok(SourceLocation::Path(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Transport for document bodies.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, location: &SourceLocation) -> Result<String>;
}

/// Reads files from disk and fetches URLs over HTTP.
pub struct FetchSource {
    http_client: reqwest::Client,
}

impl FetchSource {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("chatlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl DocumentSource for FetchSource {
    async fn fetch(&self, location: &SourceLocation) -> Result<String> {
        match location {
            SourceLocation::Path(path) => Ok(tokio::fs::read_to_string(path).await?),
            SourceLocation::Url(url) => {
                let http_error = |message: String| Error::Http {
                    resource: url.clone(),
                    message,
                };

                let response = self
                    .http_client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| http_error(format!("HTTP request failed: {}", e)))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(http_error(format!("server returned {}", status)));
                }

                response
                    .text()
                    .await
                    .map_err(|e| http_error(format!("failed to read body: {}", e)))
            }
        }
    }
}

/// How a document made it into the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Fetched and parsed from its source.
    Loaded { bytes: usize },
    /// Replaced after the fetch or parse failed.
    Substituted { reason: String },
}

impl Origin {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Origin::Loaded { .. })
    }
}

/// Per-document outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub metrics: Origin,
    pub explanations: Origin,
}

/// Fetches and parses the two dashboard documents.
pub struct Loader<S> {
    source: S,
    metrics: SourceLocation,
    explanations: SourceLocation,
    timeout: Duration,
}

impl<S: DocumentSource> Loader<S> {
    pub fn new(source: S, metrics: SourceLocation, explanations: SourceLocation) -> Self {
        Self {
            source,
            metrics,
            explanations,
            timeout: LoaderConfig::default().timeout(),
        }
    }

    /// Build a loader from the `[sources]` and `[loader]` config sections.
    pub fn from_config(source: S, sources: &SourcesConfig, loader: &LoaderConfig) -> Result<Self> {
        loader.validate()?;
        Ok(Self::new(
            source,
            SourceLocation::parse(&sources.metrics)?,
            SourceLocation::parse(&sources.explanations)?,
        )
        .with_timeout(loader.timeout()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load both documents. Never fails; see [`LoadReport`] for what happened.
    pub async fn load(&self) -> (Dashboard, LoadReport) {
        let (metrics, explanations) = tokio::join!(self.load_metrics(), self.load_explanations());
        let (metrics, metrics_origin) = metrics;
        let (explanations, explanations_origin) = explanations;

        (
            Dashboard::new(metrics, explanations),
            LoadReport {
                metrics: metrics_origin,
                explanations: explanations_origin,
            },
        )
    }

    async fn load_metrics(&self) -> (MetricsDocument, Origin) {
        let parsed = self
            .fetch_text(&self.metrics)
            .await
            .and_then(|text| Ok((MetricsDocument::parse(&text)?, text.len())));

        match parsed {
            Ok((doc, bytes)) => {
                tracing::info!(resource = %self.metrics, bytes, "Loaded metrics document");
                (doc, Origin::Loaded { bytes })
            }
            Err(e) => {
                tracing::warn!(
                    resource = %self.metrics,
                    error = %e,
                    "Failed to load metrics, using fallback data"
                );
                (
                    MetricsDocument::fallback(),
                    Origin::Substituted {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    async fn load_explanations(&self) -> (ExplanationsDocument, Origin) {
        let parsed = self
            .fetch_text(&self.explanations)
            .await
            .and_then(|text| Ok((ExplanationsDocument::parse(&text)?, text.len())));

        match parsed {
            Ok((doc, bytes)) => {
                tracing::info!(resource = %self.explanations, bytes, "Loaded explanations document");
                (doc, Origin::Loaded { bytes })
            }
            Err(e) => {
                tracing::warn!(
                    resource = %self.explanations,
                    error = %e,
                    "Failed to load explanations, panels will be hidden"
                );
                (
                    ExplanationsDocument::empty(),
                    Origin::Substituted {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    async fn fetch_text(&self, location: &SourceLocation) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.source.fetch(location)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                resource: location.to_string(),
                limit_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}
