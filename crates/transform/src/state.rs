//! Latest-sample holder.
//!
//! The only mutable state of the effect. One writer (the sample stream)
//! replaces the held sample; one reader (the render pass) evaluates the
//! transform against whatever is held at frame time.

use parallax_model::{MotionSample, VisualState};

use crate::tilt::{visual_state, TiltParams};

/// Holds the most recent motion sample, if any.
#[derive(Debug, Clone, Default)]
pub struct MotionState {
    latest: Option<MotionSample>,
    samples_seen: u64,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held sample.
    pub fn update(&mut self, sample: MotionSample) {
        if let Some(prev) = self.latest {
            if sample.timestamp_ns < prev.timestamp_ns {
                tracing::trace!(
                    prev_ns = prev.timestamp_ns,
                    next_ns = sample.timestamp_ns,
                    "Motion sample arrived out of order; latest still wins"
                );
            }
        }
        self.latest = Some(sample);
        self.samples_seen += 1;
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&MotionSample> {
        self.latest.as_ref()
    }

    /// Forget the held sample, returning to the flat state.
    pub fn clear(&mut self) {
        self.latest = None;
    }

    /// Total samples received since creation.
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Evaluate the transform for the held sample.
    pub fn visual_state(&self, params: &TiltParams) -> VisualState {
        visual_state(self.latest.as_ref(), params)
    }
}
