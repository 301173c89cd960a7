//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Bound the skip depth
//! - Reject boundary markers that would match every frame
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Empty level sets are valid; they disable a field
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Deepest skip accepted; anything beyond would skip past `main`.
pub const MAX_SKIP_FRAMES: usize = 64;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("hook.skip_frames = {0} exceeds maximum {max}", max = MAX_SKIP_FRAMES)]
    SkipTooDeep(usize),

    #[error("hook.boundary[{0}] has an empty pattern")]
    EmptyMarker(usize),

    #[error("logging.filter must not be empty")]
    EmptyFilter,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.hook.skip_frames > MAX_SKIP_FRAMES {
        errors.push(ValidationError::SkipTooDeep(config.hook.skip_frames));
    }

    for (idx, marker) in config.hook.boundary.iter().enumerate() {
        if marker.pattern().trim().is_empty() {
            errors.push(ValidationError::EmptyMarker(idx));
        }
    }

    if config.logging.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
