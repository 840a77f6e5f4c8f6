//! Logging for polyface
//!
//! Storage and allocator events go through `tracing` under the
//! `polyface::storage` and `polyface::alloc` targets. Applications that do not
//! install their own subscriber can call [`init_logging`] with a [`LogConfig`],
//! which may be loaded from TOML.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use tracing::{debug, trace, warn};

/// Minimum level, serializable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with timestamps
    #[default]
    Pretty,
    /// Compact format for production
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    /// Daily rotated files
    File { directory: String, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Emit span open/close events
    pub span_events: bool,
    /// Extra filter directives (e.g., "polyface::storage=trace")
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Install a global subscriber for `config`
///
/// Returns the writer guard; keep it alive until shutdown so buffered lines
/// are flushed. Returns `None` if a global subscriber is already set.
pub fn init_logging(config: LogConfig) -> Option<WorkerGuard> {
    let filter = build_filter(&config);

    let (writer, guard) = match &config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File { directory, prefix } => {
            tracing_appender::non_blocking(rolling::daily(directory, prefix))
        }
    };

    let spans = span_events_config(config.span_events);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .pretty()
            .with_span_events(spans)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_writer(writer)
            .compact()
            .with_span_events(spans)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(writer)
            .json()
            .with_span_events(spans)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init().ok()?;
    Some(guard)
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let level: Level = config.level.into();
    let base_filter = EnvFilter::from_default_env().add_directive(level.into());

    match &config.filter {
        Some(filter_str) => filter_str
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .fold(base_filter, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(_) => {
                    warn!("Invalid filter directive: {}", directive);
                    filter
                }
            }),
        None => base_filter,
    }
}

fn span_events_config(enabled: bool) -> FmtSpan {
    if enabled {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Log a value placed into storage
#[inline]
pub fn log_storage_init(strategy: &'static str, interface: &'static str, size: usize) {
    trace!(
        target: "polyface::storage",
        strategy,
        interface,
        size,
        "value placed in storage"
    );
}

/// Log storage teardown
#[inline]
pub fn log_storage_release(strategy: &'static str, interface: &'static str, size: usize) {
    trace!(
        target: "polyface::storage",
        strategy,
        interface,
        size,
        "storage released"
    );
}

/// Log an allocator refusing a block
#[inline]
pub fn log_alloc_failure(interface: &'static str, size: usize, align: usize) {
    warn!(
        target: "polyface::alloc",
        interface,
        size,
        align,
        "allocation failed"
    );
}

/// Log a bump arena being added
#[inline]
pub fn log_arena_grow(size: usize, arenas: usize) {
    debug!(
        target: "polyface::alloc",
        size,
        arenas,
        "arena acquired"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let config = LogConfig::new()
            .with_level(LogLevel::Debug)
            .with_format(LogFormat::Json)
            .with_span_events(true)
            .with_filter("polyface=trace");

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.span_events);
        assert_eq!(config.filter.as_deref(), Some("polyface=trace"));
    }

    #[test]
    fn test_config_from_toml() {
        let config = LogConfig::from_toml_str(
            r#"
            level = "trace"
            format = "compact"
            filter = "polyface::storage=trace"

            [output]
            kind = "file"
            directory = "/tmp/polyface"
            prefix = "dispatch"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(
            config.output,
            LogOutput::File { directory: "/tmp/polyface".into(), prefix: "dispatch".into() }
        );
        assert!(!config.span_events);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LogConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = LogConfig::from_toml_str("level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logging.toml");
        std::fs::write(&path, "level = \"warn\"\nformat = \"json\"\nspan_events = true\n").unwrap();

        let config = LogConfig::from_file(&path).expect("config file");
        assert_eq!(
            config,
            LogConfig::new().with_level(LogLevel::Warn).with_format(LogFormat::Json).with_span_events(true)
        );

        let missing = LogConfig::from_file(temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }

    #[test]
    fn test_init_logging_to_file_once() {
        let temp = TempDir::new().unwrap();
        let directory = temp.path().to_string_lossy().into_owned();
        let config = LogConfig::new()
            .with_format(LogFormat::Compact)
            .with_output(LogOutput::File { directory, prefix: "dispatch".into() })
            .with_filter("polyface=debug");

        let guard = init_logging(config.clone()).expect("first subscriber");
        log_arena_grow(65536, 1);

        // Only one global subscriber may exist
        assert!(init_logging(config).is_none());
        drop(guard);

        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|name| name.starts_with("dispatch")), "{names:?}");
    }

    #[test]
    fn test_logging_functions() {
        // These should not panic without a subscriber
        log_storage_init("owned", "Sender", 16);
        log_storage_release("owned", "Sender", 16);
        log_alloc_failure("Sender", 16, 8);
        log_arena_grow(65536, 1);
    }
}
