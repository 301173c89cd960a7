//! Call-stack capture and filtering.
//!
//! # Data Flow
//! ```text
//! walker.rs (capture live stack, skip N frames)
//!     → boundary.rs (drop leading logging-framework frames)
//!     → Stack (innermost application frame first)
//! ```
//!
//! # Design Decisions
//! - Capture is behind the `StackWalker` trait so the annotator can be
//!   driven by synthetic stacks in tests
//! - A stack is built fresh per call and never cached

pub mod boundary;
pub mod frame;
pub mod walker;

pub use boundary::{Boundary, FrameMarker};
pub use frame::{Stack, StackFrame};
pub use walker::{BacktraceWalker, StackWalker};
