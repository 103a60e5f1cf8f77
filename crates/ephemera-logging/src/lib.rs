//! Structured logging setup for Ephemera
//!
//! The store crates only emit `tracing` events. This crate installs a
//! subscriber for them the same way in every host binary and test suite.
//!
//! # Features
//!
//! - **JSONL Output**: Structured JSON lines format for log aggregation (default)
//! - **Pretty Output**: Human-readable console output for development
//! - **Per-Target Levels**: Raise or lower verbosity for a single crate
//!
//! # Quick Start
//!
//! ```ignore
//! use ephemera_logging::{LogConfig, SubscriberBuilder};
//!
//! // Simple setup with defaults (JSONL to console)
//! SubscriberBuilder::new().init();
//!
//! // Development mode with pretty output and store internals at trace level
//! SubscriberBuilder::new()
//!     .with_config(LogConfig::development().with_target("ephemera_storage", "trace"))
//!     .init();
//! ```

pub mod config;

pub use config::{ConsoleConfig, JsonlConfig, LogConfig};

use thiserror::Error;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A level or target directive could not be parsed
    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    /// A global subscriber is already installed
    #[error("Subscriber already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Builder for configuring and initializing the logging subscriber
///
/// By default, console output uses JSONL format. Use `LogConfig::development()`
/// for human-readable pretty output during development.
pub struct SubscriberBuilder {
    config: LogConfig,
}

impl SubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Build the level filter from the configuration alone
    fn config_filter(&self) -> Result<EnvFilter, LoggingError> {
        let mut filter = EnvFilter::try_new(&self.config.default_level)
            .map_err(|e| LoggingError::InvalidDirective(e.to_string()))?;

        for (target, level) in &self.config.targets {
            let directive: Directive = format!("{target}={level}")
                .parse()
                .map_err(|e: ParseError| LoggingError::InvalidDirective(e.to_string()))?;
            filter = filter.add_directive(directive);
        }

        Ok(filter)
    }

    /// Initialize the subscriber globally
    ///
    /// `RUST_LOG` takes precedence over the configured levels when set.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured directive is invalid or a global
    /// subscriber has already been set.
    pub fn try_init(self) -> Result<(), LoggingError> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => self.config_filter()?,
        };

        let console = &self.config.console;
        let jsonl = &self.config.jsonl;

        let pretty_layer = (console.enabled && console.pretty).then(|| {
            tracing_subscriber::fmt::layer()
                .with_ansi(console.ansi)
                .with_target(true)
        });

        let json_layer = (console.enabled && !console.pretty).then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(jsonl.include_current_span)
                .with_span_list(jsonl.include_spans)
                .flatten_event(jsonl.flatten_events)
                .with_file(jsonl.include_location)
                .with_line_number(jsonl.include_location)
        });

        Registry::default()
            .with(env_filter)
            .with(pretty_layer)
            .with(json_layer)
            .try_init()?;

        tracing::debug!(
            default_level = %self.config.default_level,
            pretty = self.config.console.pretty,
            "Logging initialized"
        );
        Ok(())
    }

    /// Initialize the subscriber globally
    ///
    /// # Panics
    ///
    /// Panics if a directive is invalid or a global subscriber has already
    /// been set.
    pub fn init(self) {
        if let Err(e) = self.try_init() {
            panic!("Failed to initialize logging: {e}");
        }
    }
}

impl Default for SubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize logging with default settings (JSONL to console)
pub fn init_default() {
    SubscriberBuilder::new().init();
}

/// Initialize logging for development (verbose, pretty console output)
pub fn init_development() {
    SubscriberBuilder::new()
        .with_config(LogConfig::development())
        .init();
}

/// Initialize logging for testing (minimal output)
///
/// Safe to call from every test: later calls are ignored.
pub fn init_testing() {
    let _ = SubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .try_init();
}
