//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use stack_annotator::logger::{Entry, Hook, HookError, LevelSet};

/// Hook that records every entry it sees, after earlier hooks ran.
#[derive(Clone, Default)]
pub struct RecordingHook {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn last(&self) -> Entry {
        self.entries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no entry recorded")
    }
}

impl Hook for RecordingHook {
    fn levels(&self) -> LevelSet {
        LevelSet::all()
    }

    fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Hook that always fails.
#[allow(dead_code)]
pub struct FailingHook;

impl Hook for FailingHook {
    fn levels(&self) -> LevelSet {
        LevelSet::all()
    }

    fn fire(&self, _entry: &mut Entry) -> Result<(), HookError> {
        Err(HookError::Failed("sink offline".into()))
    }
}
