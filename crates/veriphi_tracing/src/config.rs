//! Subscriber configuration.
//!
//! [`TracingConfig`] installs a global `tracing-subscriber` registry with an
//! [`EnvFilter`] and one formatting layer. Installation is a one-shot global
//! operation: [`init`](TracingConfig::init) ignores an already-installed
//! subscriber, [`try_init`](TracingConfig::try_init) reports it.
//!
//! # Example
//!
//! ```
//! use veriphi_tracing::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! // Development: pretty output with debug level and span enter/exit events
//! let dev = TracingConfig::default()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .with_span_events(true);
//!
//! // Production: JSON output with per-target levels
//! let prod = TracingConfig::default()
//!     .with_format(TracingFormat::Json)
//!     .with_env_filter("veriphi=info,veriphi::events=debug");
//!
//! assert_eq!(dev.level, Level::DEBUG);
//! assert_eq!(prod.format, TracingFormat::Json);
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::TracingError;

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Maximum log level, used when no filter directive is set.
    pub level: Level,
    /// Output format.
    pub format: TracingFormat,
    /// Filter directive (e.g., `"veriphi=debug,hyper=warn"`).
    pub env_filter: Option<String>,
    /// Whether to include span enter/exit events.
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a filter directive string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Builds the filter, rejecting malformed directives.
    pub fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter).map_err(|err| TracingError::InvalidFilter {
                filter: filter.clone(),
                reason: err.to_string(),
            }),
            None => Ok(EnvFilter::new(self.level.as_str())),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        }
    }

    /// Installs the global subscriber.
    ///
    /// A malformed filter directive falls back to [`level`](Self::level); an
    /// already-installed subscriber is left in place.
    pub fn init(&self) {
        let filter = self
            .build_filter()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str()));
        // Note: errors only when a subscriber is already installed
        self.install(filter).ok();
    }

    /// Installs the global subscriber, reporting every failure.
    pub fn try_init(&self) -> Result<(), TracingError> {
        let filter = self.build_filter()?;
        self.install(filter)
    }

    fn install(&self, filter: EnvFilter) -> Result<(), TracingError> {
        let span_events = self.span_events();
        let registry = tracing_subscriber::registry().with(filter);

        let installed = match self.format {
            TracingFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init(),
        };
        installed.map_err(|err| TracingError::AlreadyInitialized(err.to_string()))?;

        tracing::info!(
            level = %self.level,
            format = ?self.format,
            "veriphi tracing initialized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, TracingFormat::Pretty);
        assert!(config.env_filter.is_none());
        assert!(!config.span_events);
    }

    #[test]
    fn builder_pattern() {
        let config = TracingConfig::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json)
            .with_env_filter("veriphi=trace")
            .with_span_events(true);

        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, TracingFormat::Json);
        assert_eq!(config.env_filter.as_deref(), Some("veriphi=trace"));
        assert_eq!(config.span_events(), FmtSpan::ENTER | FmtSpan::EXIT);
    }

    #[test]
    fn build_filter_rejects_malformed_directive() {
        let config = TracingConfig::new().with_env_filter("veriphi=[[[");
        let err = config.build_filter().expect_err("directive should not parse");
        assert!(matches!(err, TracingError::InvalidFilter { ref filter, .. } if filter == "veriphi=[[["));
    }

    #[test]
    fn build_filter_defaults_to_level() {
        let config = TracingConfig::new().with_level(Level::WARN);
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn second_try_init_reports_existing_subscriber() {
        let config = TracingConfig::new().with_format(TracingFormat::Compact);
        // The first install may race other tests in this binary; only the
        // second outcome is deterministic.
        let _ = config.try_init();
        assert!(matches!(
            config.try_init(),
            Err(TracingError::AlreadyInitialized(_))
        ));
    }
}
