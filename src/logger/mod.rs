//! Minimal structured logger that dispatches entries through hooks.
//!
//! # Data Flow
//! ```text
//! Logger::log / EntryBuilder::log
//!     → level gate (entries below the logger level are dropped)
//!     → hooks.rs (LevelHooks::fire, hooks may mutate fields)
//!     → tracing event (message + fields as JSON)
//! ```
//!
//! # Design Decisions
//! - Hooks run synchronously on the emitting thread
//! - A failing hook is reported and never blocks the entry
//! - Output is delegated to `tracing`; formatting is the subscriber's job

pub mod entry;
pub mod hooks;
pub mod level;

use std::sync::Arc;

pub use entry::{Entry, Fields, Value, CALLER_KEY, STACK_KEY};
pub use hooks::{Hook, HookError, LevelHooks};
pub use level::{Level, LevelSet, ParseLevelError};

macro_rules! level_methods {
    (&self; $($name:ident => $level:expr),* $(,)?) => {
        $(
            pub fn $name(&self, message: impl Into<String>) {
                self.log($level, message)
            }
        )*
    };
    (self; $($name:ident => $level:expr),* $(,)?) => {
        $(
            pub fn $name(self, message: impl Into<String>) {
                self.log($level, message)
            }
        )*
    };
}

/// Structured logger with per-level hooks.
#[derive(Debug, Clone)]
pub struct Logger {
    level: Level,
    hooks: LevelHooks,
}

impl Logger {
    /// Create a logger that emits entries at `level` and above.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            hooks: LevelHooks::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn add_hook<H: Hook + 'static>(&mut self, hook: H) {
        self.hooks.add(Arc::new(hook));
    }

    pub fn add_shared_hook(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.add(hook);
    }

    pub fn hooks(&self) -> &LevelHooks {
        &self.hooks
    }

    /// Start an entry carrying a pre-set field.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> EntryBuilder<'_> {
        EntryBuilder::new(self).with_field(key, value)
    }

    /// Start an entry carrying pre-set fields.
    pub fn with_fields(&self, fields: Fields) -> EntryBuilder<'_> {
        EntryBuilder::new(self).with_fields(fields)
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.emit(Entry::new(level, message));
    }

    level_methods! {
        &self;
        trace => Level::Trace,
        debug => Level::Debug,
        info => Level::Info,
        warn => Level::Warn,
        error => Level::Error,
        fatal => Level::Fatal,
        panic => Level::Panic,
    }

    fn emit(&self, mut entry: Entry) {
        if entry.level < self.level {
            return;
        }

        let level = entry.level;
        if let Err(e) = self.hooks.fire(level, &mut entry) {
            tracing::warn!(level = %level, error = %e, "Failed to fire hook");
        }

        write_entry(&entry);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

/// An entry under construction with pre-set fields.
#[derive(Debug)]
pub struct EntryBuilder<'a> {
    logger: &'a Logger,
    fields: Fields,
}

impl<'a> EntryBuilder<'a> {
    fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            fields: Fields::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn log(self, level: Level, message: impl Into<String>) {
        self.logger
            .emit(Entry::new(level, message).with_fields(self.fields));
    }

    level_methods! {
        self;
        trace => Level::Trace,
        debug => Level::Debug,
        info => Level::Info,
        warn => Level::Warn,
        error => Level::Error,
        fatal => Level::Fatal,
        panic => Level::Panic,
    }
}

fn write_entry(entry: &Entry) {
    let fields = entry.fields_json();
    let level = entry.level;
    let message = entry.message.as_str();

    match level {
        Level::Trace => tracing::trace!(fields = %fields, "{}", message),
        Level::Debug => tracing::debug!(fields = %fields, "{}", message),
        Level::Info => tracing::info!(fields = %fields, "{}", message),
        Level::Warn => tracing::warn!(fields = %fields, "{}", message),
        // tracing has no levels above ERROR.
        Level::Error | Level::Fatal | Level::Panic => {
            tracing::error!(level = %level, fields = %fields, "{}", message)
        }
    }
}
