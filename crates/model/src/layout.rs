//! Fixed presentation constants of the card and its light blob.

use serde::{Deserialize, Serialize};

/// A rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axis3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// How the card's image is scaled into the card bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Scale to cover the card, cropping overflow.
    Fill,
    /// Scale to fit inside the card.
    Fit,
}

/// Geometry and styling of the tilt card.
///
/// The pitch rotation is applied about the diagonal `(1, 1, 0)` axis, then
/// the roll rotation about `(0, 1, 0)`. The blob's mask receives the same
/// two rotations so the light stays inside the card's outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    /// Card edge length in points (the card is square).
    pub card_size: f64,
    /// Image scaling within the card.
    pub content_mode: ContentMode,
    pub corner_radius: f64,
    /// Black drop shadow radius, no offset.
    pub shadow_radius: f64,
    pub blob_diameter: f64,
    pub blob_blur_radius: f64,
    /// White fill opacity of the blob.
    pub blob_opacity: f64,
    pub pitch_axis: Axis3,
    pub roll_axis: Axis3,
}

impl CardLayout {
    pub const DEFAULT: CardLayout = CardLayout {
        card_size: 350.0,
        content_mode: ContentMode::Fill,
        corner_radius: 20.0,
        shadow_radius: 10.0,
        blob_diameter: 80.0,
        blob_blur_radius: 40.0,
        blob_opacity: 0.6,
        pitch_axis: Axis3::new(1.0, 1.0, 0.0),
        roll_axis: Axis3::new(0.0, 1.0, 0.0),
    };
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
