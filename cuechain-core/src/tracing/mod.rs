//! Structured logging for chain editing
//!
//! The core only emits `tracing` events and spans. Binaries decide where they
//! go by calling [`init_tracing`] once at startup. Span names used by the
//! engine are collected in [`span_names`] so log consumers can filter on
//! stable strings.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Set once the global subscriber has been installed
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Configuration the subscriber was installed with
static TRACING_CONFIG: OnceLock<TracingConfig> = OnceLock::new();

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// The subscriber or filter could not be built
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing already initialized
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be created
    #[error("Failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Errors and warnings, including rejected edits
    Warn,
    /// Informational messages (default)
    #[default]
    Info,
    /// Per-operation detail: moves, pastes, skipped stale ids
    Debug,
    /// Everything
    Trace,
}

impl TracingLevel {
    /// Converts to the `tracing` crate's level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Level for a count of `-v` flags (0 = warn)
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Output destination for log lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard output
    Stdout,
    /// Standard error
    #[default]
    Stderr,
    /// A log file, truncated on startup
    File {
        /// Path to the log file
        path: PathBuf,
    },
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Log level for the `cuechain` targets
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Whether to include thread ids in each line
    pub thread_ids: bool,
    /// Custom `EnvFilter` directive (overrides `level` if set)
    pub filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: TracingLevel::Info,
            output: TracingOutput::Stderr,
            thread_ids: false,
            filter: None,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Enables or disables thread ids
    #[must_use]
    pub const fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.thread_ids = enabled;
        self
    }

    /// Sets a custom filter directive
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Debug level on stdout, for working on the engine itself
    #[must_use]
    pub const fn development() -> Self {
        Self {
            level: TracingLevel::Debug,
            output: TracingOutput::Stdout,
            thread_ids: true,
            filter: None,
        }
    }

    /// The filter directive this configuration installs
    #[must_use]
    pub fn filter_directive(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| format!("cuechain={}", self.level))
    }
}

/// Installs the global subscriber
///
/// Call once at startup. Later calls fail with `AlreadyInitialized`.
///
/// # Errors
///
/// Returns an error if tracing is already initialized, the filter directive
/// is malformed, the log file cannot be created, or another subscriber was
/// installed behind this module's back.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }
    let _ = TRACING_CONFIG.set(config.clone());

    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    match &config.output {
        TracingOutput::Stdout => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.thread_ids)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.thread_ids)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        TracingOutput::File { path } => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_thread_ids(config.thread_ids)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()
        }
    }
    .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, "Tracing initialized");
    Ok(())
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}

/// Gets the configuration tracing was initialized with
#[must_use]
pub fn get_tracing_config() -> Option<&'static TracingConfig> {
    TRACING_CONFIG.get()
}

/// Creates an info-level span with the given name and fields
///
/// # Examples
///
/// ```
/// use cuechain_core::trace_operation;
/// use cuechain_core::tracing::span_names;
///
/// let span = trace_operation!(span_names::GROUP_CREATE, item_count = 2);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        ::tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        ::tracing::info_span!($name, $($field)*)
    };
}

/// Creates a debug-level span, for operations that run per pointer event
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        ::tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        ::tracing::debug_span!($name, $($field)*)
    };
}

/// Standard span names
pub mod span_names {
    /// Moving the drag set onto a target
    pub const DRAG_DROP: &str = "drag.drop";
    /// Wrapping items into a new group
    pub const GROUP_CREATE: &str = "group.create";
    /// Splicing a group's children into its parent
    pub const GROUP_UNGROUP: &str = "group.ungroup";
    /// Pasting the clipboard
    pub const CLIPBOARD_PASTE: &str = "clipboard.paste";
    /// Deleting the selection
    pub const SELECTION_DELETE: &str = "selection.delete";
    /// Loading editor settings
    pub const CONFIG_LOAD: &str = "config.load";
    /// Saving editor settings
    pub const CONFIG_SAVE: &str = "config.save";
}
