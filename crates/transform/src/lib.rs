//! Parallax Transform
//!
//! Maps the latest device motion sample to the card's render parameters:
//! - **Tilt:** pitch past a threshold tips the card back, roll turns it sideways
//! - **Blob drift:** the light blob follows pitch vertically and gravity horizontally
//! - **State:** an explicit latest-sample holder the transform reads from
//!
//! This crate is pure computation. All inputs are data; all outputs are data.

pub mod state;
pub mod tilt;

pub use state::MotionState;
pub use tilt::{tilt, visual_state, TiltParams};
