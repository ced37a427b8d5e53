//! Tilt and blob-offset mapping.
//!
//! ```text
//! rotation_x = -min(max_tilt, excess(pitch) * 100/π)
//! rotation_y =  min(max_tilt, roll * 100/π)
//! blob_y     =  excess(pitch) * 600/π
//! blob_x     =  gravity.x * 500
//!
//! excess(pitch) = pitch - threshold  when pitch > threshold, else 0
//! ```
//!
//! `max_tilt` caps degrees directly even though the other terms run
//! through the 100/π scale, and `rotation_y` is only capped from above:
//! a strong negative roll turns the card arbitrarily far. Both are kept
//! as-is.

use std::f64::consts::PI;

use parallax_model::{MotionSample, VisualState};
use serde::{Deserialize, Serialize};

/// Constants of the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltParams {
    /// Pitch (radians) below which the card stays upright.
    pub pitch_threshold: f64,
    /// Cap on either rotation, in degrees.
    pub max_tilt_deg: f64,
    /// Radians to tilt degrees.
    pub rotation_scale: f64,
    /// Radians of pitch excess to vertical blob offset.
    pub blob_y_scale: f64,
    /// Gravity x component to horizontal blob offset.
    pub blob_x_scale: f64,
}

impl TiltParams {
    pub const DEFAULT: TiltParams = TiltParams {
        pitch_threshold: 35.0 * PI / 180.0,
        max_tilt_deg: 20.0,
        rotation_scale: 100.0 / PI,
        blob_y_scale: 600.0 / PI,
        blob_x_scale: 500.0,
    };

    /// Pitch beyond the threshold, or 0 at and below it.
    ///
    /// NaN compares false and yields 0.
    pub fn pitch_excess(&self, pitch: f64) -> f64 {
        if pitch > self.pitch_threshold {
            pitch - self.pitch_threshold
        } else {
            0.0
        }
    }
}

impl Default for TiltParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Map one sample to its visual state.
pub fn tilt(sample: &MotionSample, params: &TiltParams) -> VisualState {
    let excess = params.pitch_excess(sample.pitch());

    let rotation_x_deg = if excess > 0.0 {
        -(excess * params.rotation_scale).min(params.max_tilt_deg)
    } else {
        0.0
    };

    VisualState {
        rotation_x_deg,
        rotation_y_deg: (sample.roll() * params.rotation_scale).min(params.max_tilt_deg),
        blob_offset_x: sample.gravity_x() * params.blob_x_scale,
        blob_offset_y: excess * params.blob_y_scale,
    }
}

/// Visual state for the latest sample, or the flat default when there is none.
pub fn visual_state(sample: Option<&MotionSample>, params: &TiltParams) -> VisualState {
    sample
        .map(|s| tilt(s, params))
        .unwrap_or(VisualState::ZERO)
}
