//! # Logging
//!
//! `tracing` subscriber setup for the `quill` binary.
//!
//! Log output goes to stderr so that command results on stdout stay clean
//! for scripts. An optional file layer writes to a daily-rolling log file.
//!
//! ## Level Resolution
//!
//! 1. `RUST_LOG`, if set and valid
//! 2. `-v` flags on the command line (`-v` info, `-vv` debug, `-vvv` trace)
//! 3. `[logging] level` in the config file (default `warn`)
//!
//! ## Example
//!
//! ```no_run
//! use quill::logging::{init_logging, LogConfig, LogFormat, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Debug,
//!     format: LogFormat::Compact,
//!     ..Default::default()
//! };
//! let _guard = init_logging(&config).expect("logging init");
//!
//! tracing::debug!("ready");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use quill_core::config::LoggingConfig;
use quill_core::config_loader::expand_path;
use tracing::Level;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// LogError
// ============================================================================

/// Errors raised while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file or its directory could not be created.
    #[error("failed to create log file: {0}")]
    FileCreation(String),

    /// A global subscriber is already installed.
    #[error("failed to initialize logging: {0}")]
    SubscriberInit(String),

    /// A level, format or file name is not usable.
    #[error("invalid log configuration: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// LogLevel / LogFormat
// ============================================================================

/// Minimum severity of logged events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Debug and above.
    Debug,
    /// Info and above.
    Info,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Convert to a tracing [`Level`].
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// The directive used in an [`EnvFilter`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LogError::InvalidConfig(format!("unknown log level: {other}"))),
        }
    }
}

/// Output format of log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line, human-readable.
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(LogError::InvalidConfig(format!(
                "unknown log format: {other}"
            ))),
        }
    }
}

// ============================================================================
// LogConfig
// ============================================================================

/// Resolved logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level when `RUST_LOG` is not set.
    pub level: LogLevel,

    /// Output format for stderr and the log file.
    pub format: LogFormat,

    /// Daily-rolling log file, in addition to stderr.
    pub file_path: Option<PathBuf>,
}

impl LogConfig {
    /// Combines the `[logging]` config section with the `-v` count.
    ///
    /// A non-zero verbosity overrides the configured level.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] for an unknown level or format, or
    /// a file path whose `~` cannot be expanded.
    pub fn from_settings(settings: &LoggingConfig, verbosity: u8) -> Result<Self, LogError> {
        let level = if verbosity > 0 {
            verbosity_to_level(verbosity)
        } else {
            settings.level.parse()?
        };

        let file_path = settings
            .file
            .as_deref()
            .map(|file| expand_path(file).map_err(|e| LogError::InvalidConfig(e.to_string())))
            .transpose()?;

        Ok(Self {
            level,
            format: settings.format.parse()?,
            file_path,
        })
    }
}

/// Keeps the background file writer alive.
///
/// Buffered file output is flushed when this is dropped, so hold it until
/// the end of `main`.
pub struct LogGuard {
    guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl LogGuard {
    /// Whether a log file is being written.
    #[must_use]
    pub const fn has_file(&self) -> bool {
        self.guard.is_some()
    }
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard")
            .field("has_file_guard", &self.guard.is_some())
            .finish()
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`LogError::FileCreation`] if the log directory cannot be created,
/// [`LogError::InvalidConfig`] for an unusable file name and
/// [`LogError::SubscriberInit`] if a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, LogError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.as_str()))
        .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

    let (file_writer, guard) = match config.file_path.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(rolling_appender(path)?);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .with(file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false)))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .with(file_writer.map(|w| fmt::layer().json().with_writer(w)))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .with(file_writer.map(|w| fmt::layer().compact().with_writer(w).with_ansi(false)))
            .try_init(),
    };
    result.map_err(|e| LogError::SubscriberInit(e.to_string()))?;

    Ok(LogGuard { guard })
}

fn rolling_appender(path: &Path) -> Result<RollingFileAppender, LogError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .map_err(|e| LogError::FileCreation(format!("{}: {e}", dir.display())))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::InvalidConfig(format!("no file name in {}", path.display())))?;

    Ok(tracing_appender::rolling::daily(dir, file_name))
}

/// Maps the `-v` count to a level: none is warn, then info, debug, trace.
#[must_use]
pub const fn verbosity_to_level(verbosity: u8) -> LogLevel {
    match verbosity {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}
