//! src/logging.rs
//! ============================================================================
//! File-only tracing setup. The terminal belongs to the TUI, so every event
//! goes to a rolling log file under `log_dir` in a compact, sequence-numbered
//! line format.

use std::{
    fs,
    path::PathBuf,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use chrono::Local;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::Metadata;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    filter::{Directive, LevelFilter},
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    #[default]
    Daily,
}

impl From<LogRotation> for Rotation {
    fn from(value: LogRotation) -> Self {
        match value {
            LogRotation::Never => Self::NEVER,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub max_log_files: usize,
    pub rotation: LogRotation,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: CompactString::const_new("linkdeck"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`. Keep the returned guard alive
    /// for the whole run, dropping it flushes the background writer.
    pub fn init_tracing(config: &LoggerConfig) -> Result<WorkerGuard, LoggingError> {
        validate_config(config)?;
        fs::create_dir_all(&config.log_dir)?;

        let file: RollingFileAppender = RollingFileAppender::builder()
            .rotation(config.rotation.into())
            .filename_prefix(config.log_file_prefix.as_str())
            .filename_suffix("log")
            .max_log_files(config.max_log_files)
            .build(&config.log_dir)
            .map_err(|e| LoggingError::ConfigError(e.to_string()))?;

        let (writer, guard) = tracing_appender::non_blocking(file);

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(env_filter(&config.log_level)?);

        tracing_subscriber::registry()
            .with(file_layer)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        Ok(guard)
    }
}

/// The configured level is the base filter and `RUST_LOG` refines it.
pub fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let spec = filter_spec(level, rust_log.as_deref())?;
    Ok(EnvFilter::builder().parse_lossy(spec))
}

/// Joins the configured directives with `RUST_LOG`. A bare level in
/// `RUST_LOG` replaces the configured one; targeted directives are added.
fn filter_spec(level: &str, rust_log: Option<&str>) -> Result<String, LoggingError> {
    for part in level.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        Directive::from_str(part).map_err(|e| {
            LoggingError::ConfigError(format!("invalid log level '{level}': {e}"))
        })?;
    }

    let Some(env) = rust_log.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(level.to_string());
    };
    let sets_global_level = env
        .split(',')
        .any(|part| LevelFilter::from_str(part.trim()).is_ok());

    Ok(if sets_global_level {
        env.to_string()
    } else {
        format!("{level},{env}")
    })
}

fn validate_config(config: &LoggerConfig) -> Result<(), LoggingError> {
    if config.log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidLogDirectory(
            "log_dir must not be empty".to_string(),
        ));
    }
    if config.log_file_prefix.is_empty() {
        return Err(LoggingError::ConfigError(
            "log_file_prefix must not be empty".to_string(),
        ));
    }
    if config.max_log_files == 0 {
        return Err(LoggingError::ConfigError(
            "max_log_files must be at least 1".to_string(),
        ));
    }
    Ok(())
}

static SEQ: AtomicUsize = AtomicUsize::new(1);

/// Custom formatter: `[SEQ] TIME LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        // monotonically-increasing sequence number
        let seq: usize = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {} {:5} [{}:{} {}] ",
            Local::now().format("%H:%M:%S%.3f"),
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&LoggerConfig::default()).is_ok());
    }

    #[test]
    fn zero_log_files_rejected() {
        let config = LoggerConfig {
            max_log_files: 0,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(LoggingError::ConfigError(_))
        ));
    }

    #[test]
    fn rust_log_level_overrides_configured_level() {
        assert_eq!(filter_spec("info", None).unwrap(), "info");
        assert_eq!(filter_spec("info", Some("  ")).unwrap(), "info");
        assert_eq!(filter_spec("info", Some("debug")).unwrap(), "debug");
        assert_eq!(
            filter_spec("info", Some("reqwest=trace")).unwrap(),
            "info,reqwest=trace"
        );
        assert_eq!(
            filter_spec("warn", Some("hyper=off,trace")).unwrap(),
            "hyper=off,trace"
        );
    }

    #[test]
    fn rust_log_debug_enables_debug_events() {
        let spec = filter_spec("info", Some("debug")).unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(EnvFilter::builder().parse_lossy(spec)),
        );
        let debug_on = tracing::subscriber::with_default(subscriber, || {
            tracing::enabled!(tracing::Level::DEBUG)
        });
        assert!(debug_on);

        let spec = filter_spec("info", None).unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(EnvFilter::builder().parse_lossy(spec)),
        );
        let (info_on, debug_on) = tracing::subscriber::with_default(subscriber, || {
            (
                tracing::enabled!(tracing::Level::INFO),
                tracing::enabled!(tracing::Level::DEBUG),
            )
        });
        assert!(info_on);
        assert!(!debug_on);
    }

    #[test]
    fn bad_level_is_reported() {
        assert!(env_filter("info").is_ok());
        assert!(matches!(
            env_filter("linkdeck=nope"),
            Err(LoggingError::ConfigError(_))
        ));
    }
}
