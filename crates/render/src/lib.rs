//! Parallax Render
//!
//! Turns visual state into per-frame render instructions and hosts the
//! card view that ties the motion subscription to the transform.
//!
//! ```text
//! MotionBackend ──► MotionUpdates ──► TiltCardView ──► FrameComposition
//!                    (latest wins)    (MotionState)         │
//!                                                           ▼
//!                                                  Compositor::apply
//!                                      card: clip ─ shadow ─ rotate(pitch) ─ rotate(roll)
//!                                      blob: circle ─ blur ─ offset ─ mask(rotated card)
//! ```

pub mod compositor;
pub mod export;
pub mod view;

pub use compositor::{compose, CommandLog, Compositor, FrameComposition, NodeId, RenderOp};
pub use view::TiltCardView;
