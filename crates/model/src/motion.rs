//! Device motion samples.
//!
//! Angles are radians, gravity components are in g (each in `[-1.0, 1.0]`
//! for a device at rest).

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since the motion source started.
pub type TimestampNs = u64;

/// Device orientation as Euler angles (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    /// Rotation around the device's side axis.
    pub pitch: f64,
    /// Rotation around the device's front-back axis.
    pub roll: f64,
    /// Rotation around the vertical axis.
    pub yaw: f64,
}

/// Component of device-relative acceleration attributable to gravity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GravityVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A single motion reading. Immutable once produced; a newer sample
/// replaces an older one rather than amending it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Monotonic nanoseconds since the source started.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    pub attitude: Attitude,

    pub gravity: GravityVector,
}

impl MotionSample {
    pub fn new(timestamp_ns: TimestampNs, attitude: Attitude, gravity: GravityVector) -> Self {
        Self {
            timestamp_ns,
            attitude,
            gravity,
        }
    }

    /// Sample carrying only the three values the effect reads.
    pub fn from_angles(pitch: f64, roll: f64, gravity_x: f64) -> Self {
        Self {
            timestamp_ns: 0,
            attitude: Attitude {
                pitch,
                roll,
                yaw: 0.0,
            },
            gravity: GravityVector {
                x: gravity_x,
                y: 0.0,
                z: 0.0,
            },
        }
    }

    /// Same as [`MotionSample::from_angles`] with angles in degrees.
    pub fn from_degrees(pitch_deg: f64, roll_deg: f64, gravity_x: f64) -> Self {
        Self::from_angles(pitch_deg.to_radians(), roll_deg.to_radians(), gravity_x)
    }

    /// Copy of this sample restamped at `timestamp_ns`.
    pub fn at(self, timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            ..self
        }
    }

    pub fn pitch(&self) -> f64 {
        self.attitude.pitch
    }

    pub fn roll(&self) -> f64 {
        self.attitude.roll
    }

    pub fn gravity_x(&self) -> f64 {
        self.gravity.x
    }

    /// Timestamp as fractional seconds.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_degrees_converts_to_radians() {
        let sample = MotionSample::from_degrees(40.0, 10.0, 0.3);
        assert!((sample.pitch() - 0.698_131_7).abs() < 1e-6);
        assert!((sample.roll() - 0.174_532_9).abs() < 1e-6);
        assert_eq!(sample.gravity_x(), 0.3);
        assert_eq!(sample.attitude.yaw, 0.0);
    }

    #[test]
    fn test_json_shape() {
        let sample = MotionSample::from_angles(0.5, -0.25, 0.1).at(16_666_666);
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"t\":16666666"));
        assert!(json.contains("\"attitude\":{\"pitch\":0.5,\"roll\":-0.25,\"yaw\":0.0}"));
        assert!(json.contains("\"gravity\":{\"x\":0.1,"));
    }

    #[test]
    fn test_restamp_keeps_readings() {
        let sample = MotionSample::from_angles(0.7, 0.1, -0.2);
        let later = sample.at(1_500_000_000);
        assert_eq!(later.attitude, sample.attitude);
        assert_eq!(later.gravity, sample.gravity);
        assert!((later.timestamp_secs() - 1.5).abs() < 1e-9);
    }
}
