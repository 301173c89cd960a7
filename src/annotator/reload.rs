//! Hot-swappable annotator.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::annotator::StackAnnotator;
use crate::config::HookConfig;
use crate::logger::{Entry, Hook, HookError, LevelSet};

/// A hook whose annotator can be replaced while loggers keep running.
///
/// Each annotator stays immutable; reload swaps the whole instance.
#[derive(Clone)]
pub struct ReloadableHook {
    current: Arc<ArcSwap<StackAnnotator>>,
}

impl ReloadableHook {
    /// Wrap `annotator` as the initial configuration.
    pub fn new(annotator: StackAnnotator) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(annotator)),
        }
    }

    /// Snapshot of the active annotator.
    pub fn current(&self) -> Arc<StackAnnotator> {
        self.current.load_full()
    }

    /// Swap in `annotator`; fires already in progress finish on the old one.
    pub fn replace(&self, annotator: StackAnnotator) {
        self.current.store(Arc::new(annotator));
    }

    /// Rebuild the annotator from `config` and swap it in.
    pub fn apply(&self, config: &HookConfig) {
        self.replace(StackAnnotator::from_config(config));
        tracing::info!(
            caller_levels = ?config.caller_levels,
            stack_levels = ?config.stack_levels,
            skip_frames = config.skip_frames,
            "Stack annotator reconfigured"
        );
    }
}

impl Hook for ReloadableHook {
    fn levels(&self) -> LevelSet {
        LevelSet::all()
    }

    fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
        self.current.load().fire(entry)
    }
}
