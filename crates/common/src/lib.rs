//! Parallax Common Utilities
//!
//! Shared infrastructure for all tilt card crates:
//! - Error types and result aliases
//! - Monotonic clock and sample rate gating
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
