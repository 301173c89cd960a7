//! Call-stack annotation hook.
//!
//! # Responsibilities
//! - Capture the stack when an entry fires
//! - Strip logging-framework frames
//! - Attach `caller` and/or `stack` fields according to the entry's level
//!
//! # Design Decisions
//! - Best effort: `fire` never returns an error
//! - Configuration is immutable; reload replaces the whole annotator
//! - Registers for every level, gates fields internally

pub mod hook;
pub mod reload;

pub use hook::{StackAnnotator, DEFAULT_SKIP_FRAMES};
pub use reload::ReloadableHook;
