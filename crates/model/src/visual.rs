//! Render parameters derived from a motion sample.

use serde::{Deserialize, Serialize};

/// Rotation and blob placement for one frame.
///
/// Rotations are degrees, offsets are points relative to the card center.
/// The default is the flat, centered state shown before any sample arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualState {
    /// Rotation about the pitch axis, never positive.
    pub rotation_x_deg: f64,
    /// Rotation about the vertical axis, capped above only.
    pub rotation_y_deg: f64,
    pub blob_offset_x: f64,
    pub blob_offset_y: f64,
}

impl VisualState {
    /// Flat card, centered blob.
    pub const ZERO: VisualState = VisualState {
        rotation_x_deg: 0.0,
        rotation_y_deg: 0.0,
        blob_offset_x: 0.0,
        blob_offset_y: 0.0,
    };

    /// Whether this is the flat, centered state.
    pub fn is_flat(&self) -> bool {
        *self == Self::ZERO
    }
}
