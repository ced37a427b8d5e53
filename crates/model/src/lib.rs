//! Parallax Data Model
//!
//! Plain data shared by every stage of the effect:
//! - [`MotionSample`]: one immutable attitude/gravity reading
//! - [`VisualState`]: the render parameters derived from a sample
//! - [`CardLayout`]: fixed presentation constants of the card and blob
//! - Motion trace files: JSONL recordings of sample streams

pub mod layout;
pub mod motion;
pub mod trace;
pub mod visual;

pub use layout::{Axis3, CardLayout, ContentMode};
pub use motion::{Attitude, GravityVector, MotionSample, TimestampNs};
pub use trace::{parse_trace, serialize_trace, Trace, TraceError, TraceHeader};
pub use visual::VisualState;
