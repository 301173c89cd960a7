//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Logger (after hooks)
//!     → tracing events
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
