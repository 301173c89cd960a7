//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::annotator::DEFAULT_SKIP_FRAMES;
use crate::logger::{Level, LevelSet};
use crate::stack::boundary::{default_markers, FrameMarker};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Stack annotation settings.
    pub hook: HookConfig,

    /// Output settings for the tracing subscriber.
    pub logging: LoggingConfig,
}

/// Stack annotator configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HookConfig {
    /// Levels that receive the `caller` field.
    pub caller_levels: LevelSet,

    /// Levels that receive the `stack` field.
    pub stack_levels: LevelSet,

    /// Frames dropped from the top of the captured stack before
    /// boundary filtering.
    pub skip_frames: usize,

    /// Markers identifying logging-framework frames.
    pub boundary: Vec<FrameMarker>,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            caller_levels: LevelSet::all(),
            stack_levels: LevelSet::from([Level::Panic, Level::Fatal, Level::Error]),
            skip_frames: DEFAULT_SKIP_FRAMES,
            boundary: default_markers(),
        }
    }
}

/// Subscriber output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,

    /// Minimum level accepted by the logger.
    pub level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            level: Level::Info,
        }
    }
}
