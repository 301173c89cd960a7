//! Call-stack annotation for structured log entries.
//!
//! A [`StackAnnotator`] is a logger [`Hook`] that captures the call stack
//! when an entry fires, drops the logging framework's own frames and
//! attaches a `caller` frame and/or the remaining `stack` to the entry,
//! depending on the entry's level.
//!
//! ```no_run
//! use stack_annotator::{Logger, Level, StackAnnotator};
//!
//! let mut logger = Logger::new(Level::Info);
//! logger.add_hook(StackAnnotator::standard());
//! logger.with_field("user", "alice").error("payment declined");
//! ```

pub mod annotator;
pub mod config;
pub mod logger;
pub mod observability;
pub mod stack;

pub use annotator::{ReloadableHook, StackAnnotator};
pub use config::{AppConfig, HookConfig};
pub use logger::{Entry, Hook, HookError, Level, LevelSet, Logger};
pub use stack::{Stack, StackFrame, StackWalker};
