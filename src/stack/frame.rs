//! Call-site descriptors.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A single call site, as resolved by a [`StackWalker`](super::StackWalker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Source file, when debug info is available.
    pub file: Option<String>,

    /// Line number (0 when unknown).
    pub line: u32,

    /// Demangled function path without the trailing hash.
    pub function: String,
}

impl StackFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line,
            function: function.into(),
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.file.as_deref().unwrap_or("?"),
            self.line,
            self.function
        )
    }
}

/// Ordered frames, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack(Vec<StackFrame>);

impl Stack {
    pub fn new(frames: Vec<StackFrame>) -> Self {
        Self(frames)
    }

    pub fn into_frames(self) -> Vec<StackFrame> {
        self.0
    }
}

impl Deref for Stack {
    type Target = [StackFrame];

    fn deref(&self) -> &[StackFrame] {
        &self.0
    }
}

impl From<Vec<StackFrame>> for Stack {
    fn from(frames: Vec<StackFrame>) -> Self {
        Self(frames)
    }
}

impl FromIterator<StackFrame> for Stack {
    fn from_iter<I: IntoIterator<Item = StackFrame>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}
