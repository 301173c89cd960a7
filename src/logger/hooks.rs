//! Hook contract and per-level hook registry.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::logger::{Entry, Level, LevelSet};

/// Errors a hook may report back to the logger.
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook could not process the entry.
    #[error("hook failed: {0}")]
    Failed(String),
}

/// Extension point invoked synchronously for every emitted entry whose
/// level is in [`Hook::levels`].
pub trait Hook: Send + Sync {
    /// Levels this hook wants to observe.
    fn levels(&self) -> LevelSet;

    /// Inspect or enrich the entry before it is written.
    fn fire(&self, entry: &mut Entry) -> Result<(), HookError>;
}

impl<H: Hook + ?Sized> Hook for Arc<H> {
    fn levels(&self) -> LevelSet {
        (**self).levels()
    }

    fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
        (**self).fire(entry)
    }
}

/// Hooks indexed by the levels they registered for.
#[derive(Default, Clone)]
pub struct LevelHooks {
    hooks: HashMap<Level, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under every level it asks for.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels().iter() {
            self.hooks.entry(level).or_default().push(Arc::clone(&hook));
        }
    }

    /// Number of hooks registered for `level`.
    pub fn count(&self, level: Level) -> usize {
        self.hooks.get(&level).map_or(0, Vec::len)
    }

    /// Run every hook registered for `level`, in registration order.
    ///
    /// A failing hook does not stop the ones after it; the first error is
    /// returned once all have run.
    pub fn fire(&self, level: Level, entry: &mut Entry) -> Result<(), HookError> {
        let Some(hooks) = self.hooks.get(&level) else {
            return Ok(());
        };

        let mut first_err = None;
        for hook in hooks {
            if let Err(e) = hook.fire(entry) {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for LevelHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for level in Level::ALL {
            let count = self.count(level);
            if count > 0 {
                map.entry(&level, &count);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Tagging {
        levels: LevelSet,
        tag: &'static str,
        fail: bool,
        seen: Mutex<Vec<Level>>,
    }

    impl Tagging {
        fn new(levels: LevelSet, tag: &'static str) -> Self {
            Self {
                levels,
                tag,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Hook for Tagging {
        fn levels(&self) -> LevelSet {
            self.levels
        }

        fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
            self.seen.lock().unwrap().push(entry.level);
            entry.fields.insert(self.tag.to_string(), true.into());
            if self.fail {
                return Err(HookError::Failed(self.tag.to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_hooks_only_fire_for_registered_levels() {
        let hook = Arc::new(Tagging::new(LevelSet::from([Level::Error]), "tagged"));
        let mut hooks = LevelHooks::new();
        hooks.add(hook.clone());

        let mut info = Entry::new(Level::Info, "fine");
        hooks.fire(Level::Info, &mut info).unwrap();
        assert!(info.fields.is_empty());

        let mut error = Entry::new(Level::Error, "bad");
        hooks.fire(Level::Error, &mut error).unwrap();
        assert!(error.fields.contains_key("tagged"));
        assert_eq!(*hook.seen.lock().unwrap(), vec![Level::Error]);
    }

    #[test]
    fn test_failing_hook_does_not_stop_others() {
        let mut failing = Tagging::new(LevelSet::all(), "first");
        failing.fail = true;
        let mut hooks = LevelHooks::new();
        hooks.add(Arc::new(failing));
        hooks.add(Arc::new(Tagging::new(LevelSet::all(), "second")));

        let mut entry = Entry::new(Level::Warn, "careful");
        let err = hooks.fire(Level::Warn, &mut entry).unwrap_err();
        assert_eq!(err.to_string(), "hook failed: first");
        assert!(entry.fields.contains_key("second"));
    }

    #[test]
    fn test_count_per_level() {
        let mut hooks = LevelHooks::new();
        hooks.add(Arc::new(Tagging::new(LevelSet::all(), "a")));
        hooks.add(Arc::new(Tagging::new(LevelSet::from([Level::Panic]), "b")));
        assert_eq!(hooks.count(Level::Trace), 1);
        assert_eq!(hooks.count(Level::Panic), 2);
    }
}
