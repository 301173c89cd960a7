//! Hot reload of the hook configuration.
//!
//! The parent directory is watched rather than the file itself: editors
//! that save by writing a temp file and renaming it over the original
//! replace the inode, which a file-level watch would lose.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::annotator::ReloadableHook;
use crate::config::loader::{load_config, ConfigError};

/// Load `path` and, if it is valid, swap the resulting annotator into `hook`.
///
/// On error the current annotator is left in place.
pub fn reload(path: &Path, hook: &ReloadableHook) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    hook.apply(&config.hook);
    Ok(())
}

/// Reconfigures a [`ReloadableHook`] whenever its config file changes.
pub struct ConfigWatcher {
    path: PathBuf,
    hook: ReloadableHook,
    poll_interval: Duration,
}

impl ConfigWatcher {
    /// Create a watcher for `path` that feeds `hook`.
    pub fn new(path: &Path, hook: ReloadableHook) -> Self {
        Self {
            path: path.to_path_buf(),
            hook,
            poll_interval: Duration::from_secs(2),
        }
    }

    /// Poll interval for backends without native change notification.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn watch_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = self.watch_dir();
        let file_name: Option<OsString> = self.path.file_name().map(|n| n.to_os_string());
        let path = self.path.clone();
        let hook = self.hook;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = %e, "Config watch error");
                        return;
                    }
                };

                if !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }
                let touches_config = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == file_name.as_deref());
                if !touches_config {
                    return;
                }

                tracing::debug!(path = ?path, kind = ?event.kind, "Config file changed");
                if let Err(e) = reload(&path, &hook) {
                    tracing::warn!(
                        path = ?path,
                        error = %e,
                        "Config reload failed, keeping current annotator"
                    );
                }
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::StackAnnotator;
    use crate::logger::{Level, LevelSet};
    use std::fs;
    use std::time::Instant;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stack-annotator-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn wait_for(hook: &ReloadableHook, expected: LevelSet) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if hook.current().stack_levels() == expected {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }

    #[test]
    fn test_reload_applies_valid_file() {
        let dir = scratch_dir("reload-valid");
        let path = dir.join("annotator.toml");
        fs::write(&path, "[hook]\nstack_levels = [\"warn\"]\nskip_frames = 3\n").unwrap();

        let hook = ReloadableHook::new(StackAnnotator::standard());
        reload(&path, &hook).unwrap();

        assert_eq!(hook.current().stack_levels(), LevelSet::from([Level::Warn]));
        assert_eq!(hook.current().skip_frames(), 3);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reload_keeps_annotator_on_bad_file() {
        let dir = scratch_dir("reload-invalid");
        let path = dir.join("annotator.toml");
        let hook = ReloadableHook::new(StackAnnotator::standard());
        let before = hook.current().stack_levels();

        fs::write(&path, "[hook\nstack_levels = ").unwrap();
        assert!(matches!(reload(&path, &hook), Err(ConfigError::Parse(_))));

        fs::write(&path, "[hook]\nskip_frames = 999\n").unwrap();
        assert!(matches!(reload(&path, &hook), Err(ConfigError::Validation(_))));

        assert!(matches!(
            reload(&dir.join("missing.toml"), &hook),
            Err(ConfigError::Io(_))
        ));

        assert_eq!(hook.current().stack_levels(), before);
        assert_eq!(hook.current().skip_frames(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_watch_dir_of_bare_file_name() {
        let hook = ReloadableHook::new(StackAnnotator::standard());
        let watcher = ConfigWatcher::new(Path::new("annotator.toml"), hook);
        assert_eq!(watcher.watch_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_watcher_picks_up_rewrite_and_rename() {
        let dir = scratch_dir("watch");
        let path = dir.join("annotator.toml");
        fs::write(&path, "[hook]\nstack_levels = [\"error\"]\n").unwrap();

        let hook = ReloadableHook::new(StackAnnotator::standard());
        let _watcher = ConfigWatcher::new(&path, hook.clone())
            .with_poll_interval(Duration::from_millis(100))
            .run()
            .unwrap();

        // In-place rewrite.
        fs::write(&path, "[hook]\nstack_levels = [\"warn\"]\n").unwrap();
        assert!(wait_for(&hook, LevelSet::from([Level::Warn])));

        // Editor-style save: write elsewhere, rename over the original.
        let staged = dir.join("annotator.toml.tmp");
        fs::write(&staged, "[hook]\nstack_levels = [\"debug\", \"info\"]\n").unwrap();
        fs::rename(&staged, &path).unwrap();
        assert!(wait_for(&hook, LevelSet::from([Level::Debug, Level::Info])));

        // Unrelated files in the same directory are ignored.
        fs::write(dir.join("other.toml"), "[hook]\nstack_levels = []\n").unwrap();
        std::thread::sleep(Duration::from_millis(500));
        assert_eq!(
            hook.current().stack_levels(),
            LevelSet::from([Level::Debug, Level::Info])
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
