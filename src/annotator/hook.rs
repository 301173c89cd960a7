//! The stack-annotating hook.

use std::fmt;
use std::sync::Arc;

use crate::config::HookConfig;
use crate::logger::{Entry, Hook, HookError, Level, LevelSet, CALLER_KEY, STACK_KEY};
use crate::stack::{BacktraceWalker, Boundary, StackWalker};

/// Frames skipped before boundary filtering: the walker's own frame and
/// the `fire` frame.
pub const DEFAULT_SKIP_FRAMES: usize = 2;

/// Attaches `caller` and/or `stack` fields to log entries.
///
/// Registers for every level; which fields get written is decided per
/// entry from `caller_levels` and `stack_levels`.
#[derive(Clone)]
pub struct StackAnnotator {
    caller_levels: LevelSet,
    stack_levels: LevelSet,
    skip_frames: usize,
    boundary: Boundary,
    walker: Arc<dyn StackWalker>,
}

impl StackAnnotator {
    /// Create an annotator with the default walker, skip depth and boundary.
    ///
    /// Empty sets are fine and simply disable the corresponding field.
    pub fn new(caller_levels: impl Into<LevelSet>, stack_levels: impl Into<LevelSet>) -> Self {
        Self {
            caller_levels: caller_levels.into(),
            stack_levels: stack_levels.into(),
            skip_frames: DEFAULT_SKIP_FRAMES,
            boundary: Boundary::default(),
            walker: Arc::new(BacktraceWalker),
        }
    }

    /// `caller` on every level, `stack` on Panic, Fatal and Error.
    pub fn standard() -> Self {
        Self::new(
            LevelSet::all(),
            [Level::Panic, Level::Fatal, Level::Error],
        )
    }

    /// Build an annotator from loaded configuration, using the live walker.
    pub fn from_config(config: &HookConfig) -> Self {
        Self {
            caller_levels: config.caller_levels,
            stack_levels: config.stack_levels,
            skip_frames: config.skip_frames,
            boundary: Boundary::new(&config.boundary),
            walker: Arc::new(BacktraceWalker),
        }
    }

    /// Replace the stack-walking collaborator.
    pub fn with_walker(mut self, walker: impl StackWalker + 'static) -> Self {
        self.walker = Arc::new(walker);
        self
    }

    /// Override how many frames the walker drops before boundary filtering.
    pub fn with_skip_frames(mut self, skip_frames: usize) -> Self {
        self.skip_frames = skip_frames;
        self
    }

    /// Override the markers that identify logging-framework frames.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn caller_levels(&self) -> LevelSet {
        self.caller_levels
    }

    pub fn stack_levels(&self) -> LevelSet {
        self.stack_levels
    }

    pub fn skip_frames(&self) -> usize {
        self.skip_frames
    }
}

impl Hook for StackAnnotator {
    fn levels(&self) -> LevelSet {
        LevelSet::all()
    }

    #[inline(never)]
    fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
        let frames = self.boundary.trim(self.walker.callers(self.skip_frames));

        let Some(caller) = frames.first() else {
            tracing::trace!(level = %entry.level, "No application frames on stack");
            return Ok(());
        };

        if self.caller_levels.contains(entry.level) {
            entry
                .fields
                .insert(CALLER_KEY.to_string(), caller.clone().into());
        }

        if self.stack_levels.contains(entry.level) {
            entry.fields.insert(STACK_KEY.to_string(), frames.into());
        }

        Ok(())
    }
}

impl Default for StackAnnotator {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for StackAnnotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackAnnotator")
            .field("caller_levels", &self.caller_levels)
            .field("stack_levels", &self.stack_levels)
            .field("skip_frames", &self.skip_frames)
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}
