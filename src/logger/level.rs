//! Severity levels and level sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Log severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    /// Every level, in severity order.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// A set of levels stored as a bitmask.
///
/// `Copy` and immutable in practice, so it can be shared across threads
/// without synchronisation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b0111_1111)
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    pub fn insert(&mut self, level: Level) {
        self.0 |= level.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in severity order.
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|l| self.contains(*l))
    }
}

impl fmt::Debug for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        let mut set = LevelSet::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

impl From<&[Level]> for LevelSet {
    fn from(levels: &[Level]) -> Self {
        levels.iter().copied().collect()
    }
}

impl<const N: usize> From<[Level; N]> for LevelSet {
    fn from(levels: [Level; N]) -> Self {
        levels.into_iter().collect()
    }
}

impl Serialize for LevelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for LevelSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let levels = Vec::<Level>::deserialize(deserializer)?;
        Ok(levels.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Fatal < Level::Panic);
        assert_eq!(Level::ALL.iter().max(), Some(&Level::Panic));
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("ERROR".parse::<Level>(), Ok(Level::Error));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert!("loud".parse::<Level>().is_err());
        assert_eq!(Level::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_level_set_membership() {
        let set = LevelSet::from([Level::Panic, Level::Fatal, Level::Error]);
        assert!(set.contains(Level::Error));
        assert!(!set.contains(Level::Warn));
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Level::Error, Level::Fatal, Level::Panic]
        );

        assert!(LevelSet::empty().is_empty());
        assert_eq!(LevelSet::all().len(), Level::ALL.len());
        assert!(Level::ALL.iter().all(|l| LevelSet::all().contains(*l)));
    }

    #[test]
    fn test_level_set_from_toml_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            levels: LevelSet,
        }

        let w: Wrapper = toml::from_str(r#"levels = ["info", "panic"]"#).unwrap();
        assert_eq!(w.levels, LevelSet::from([Level::Info, Level::Panic]));
    }
}
