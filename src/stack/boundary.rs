//! Framework/application boundary detection.
//!
//! # Responsibilities
//! - Decide whether a frame belongs to the logging framework
//! - Trim leading framework frames from a captured stack
//!
//! # Design Decisions
//! - Matching is case-insensitive: file markers match anywhere in the path,
//!   function markers only at the start of a path segment
//! - Only the leading run of framework frames is removed; once an
//!   application frame is found, everything after it is kept untouched
//! - Markers are plain data so they can come from config

use serde::{Deserialize, Serialize};

use crate::stack::Stack;

/// Function-path marker for frames inside this crate (logger dispatch,
/// hook registry, annotator).
pub const CRATE_MARKER: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Identifies a logging-framework frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "pattern", rename_all = "lowercase")]
pub enum FrameMarker {
    /// Substring of the source file path.
    File(String),
    /// Path prefix inside the demangled function name. Matches only where
    /// a path segment starts, so `log::` does not match `catalog::`.
    Function(String),
}

impl FrameMarker {
    pub fn pattern(&self) -> &str {
        match self {
            FrameMarker::File(p) | FrameMarker::Function(p) => p,
        }
    }
}

/// Default markers: this crate only. The walker drops the unwinder's frames.
pub fn default_markers() -> Vec<FrameMarker> {
    vec![FrameMarker::Function(CRATE_MARKER.to_string())]
}

/// True if `pattern` occurs in `function` at the start of a path segment:
/// at index 0 or right after `<`, `&`, a space or `:`.
fn matches_segment(function: &str, pattern: &str) -> bool {
    function.match_indices(pattern).any(|(idx, _)| {
        idx == 0
            || matches!(
                function.as_bytes()[idx - 1],
                b'<' | b'&' | b' ' | b':'
            )
    })
}

/// Compiled set of markers with lowercased patterns.
#[derive(Debug, Clone)]
pub struct Boundary {
    files: Vec<String>,
    functions: Vec<String>,
}

impl Boundary {
    pub fn new(markers: &[FrameMarker]) -> Self {
        let mut files = Vec::new();
        let mut functions = Vec::new();
        for marker in markers {
            match marker {
                FrameMarker::File(p) => files.push(p.to_lowercase()),
                FrameMarker::Function(p) => functions.push(p.to_lowercase()),
            }
        }
        Self { files, functions }
    }

    /// Returns true if the frame belongs to the logging framework.
    pub fn is_internal(&self, file: Option<&str>, function: &str) -> bool {
        if !self.functions.is_empty() {
            let function = function.to_lowercase();
            if self
                .functions
                .iter()
                .any(|p| matches_segment(&function, p))
            {
                return true;
            }
        }
        match file {
            Some(file) if !self.files.is_empty() => {
                let file = file.to_lowercase();
                self.files.iter().any(|p| file.contains(p.as_str()))
            }
            _ => false,
        }
    }

    /// Drop the leading framework frames.
    ///
    /// Returns an empty stack when every frame is internal.
    pub fn trim(&self, stack: Stack) -> Stack {
        let mut frames = stack.into_frames();
        let first_app = frames
            .iter()
            .position(|f| !self.is_internal(f.file.as_deref(), &f.function));

        match first_app {
            Some(idx) => frames.split_off(idx).into(),
            None => Stack::default(),
        }
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(&default_markers())
    }
}
