//! Motion backend implementations.
//!
//! Each backend provides a different source of attitude/gravity samples.

use std::f64::consts::PI;
use std::path::Path;

use parallax_common::clock::{MotionClock, RateController};
use parallax_common::config::BackendKind;
use parallax_common::error::{ParallaxError, ParallaxResult};
use parallax_model::{Attitude, GravityVector, MotionSample, TimestampNs};

use crate::trace_file::read_trace;
use crate::MotionBackend;

/// Centre of the synthetic pitch sweep (degrees).
const SYNTH_PITCH_CENTER_DEG: f64 = 45.0;
/// Half-range of the synthetic pitch sweep; carries pitch across the 35° threshold.
const SYNTH_PITCH_SWING_DEG: f64 = 20.0;
const SYNTH_PITCH_HZ: f64 = 0.25;
const SYNTH_ROLL_SWING_DEG: f64 = 25.0;
const SYNTH_ROLL_HZ: f64 = 0.4;

/// Generated oscillating tilt, as if the device were being rocked in the hand.
///
/// Samples are a pure function of elapsed time; live polling stamps them
/// with a monotonic clock and gates them to the configured rate.
pub struct SyntheticBackend {
    clock: MotionClock,
    rate: RateController,
}

impl SyntheticBackend {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            clock: MotionClock::start(),
            rate: RateController::new(rate_hz),
        }
    }

    /// The sample this backend produces `timestamp_ns` after it starts.
    pub fn sample_at(timestamp_ns: TimestampNs) -> MotionSample {
        let t = MotionClock::ns_to_secs(timestamp_ns);
        let pitch = (SYNTH_PITCH_CENTER_DEG
            + SYNTH_PITCH_SWING_DEG * (2.0 * PI * SYNTH_PITCH_HZ * t).sin())
        .to_radians();
        let roll = (SYNTH_ROLL_SWING_DEG * (2.0 * PI * SYNTH_ROLL_HZ * t).sin()).to_radians();

        MotionSample::new(
            timestamp_ns,
            Attitude {
                pitch,
                roll,
                yaw: 0.0,
            },
            gravity_from_attitude(pitch, roll),
        )
    }

    /// A fixed-length run of samples at `rate_hz`, starting at t = 0.
    ///
    /// Negative lengths yield no samples; non-finite lengths are rejected.
    pub fn generate(rate_hz: u32, seconds: f64) -> ParallaxResult<Vec<MotionSample>> {
        if !seconds.is_finite() {
            return Err(ParallaxError::motion(format!(
                "trace length must be finite, got {seconds}"
            )));
        }
        let rate = RateController::new(rate_hz);
        let count = (seconds.max(0.0) * rate_hz.max(1) as f64).round() as u64;
        Ok((0..count)
            .map(|i| Self::sample_at(i * rate.interval_ns()))
            .collect())
    }
}

impl MotionBackend for SyntheticBackend {
    fn poll(&mut self) -> ParallaxResult<Option<MotionSample>> {
        let now = self.clock.elapsed_ns();
        if self.rate.should_tick(now) {
            Ok(Some(Self::sample_at(now)))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Gravity as seen by a device at the given attitude, in g.
pub fn gravity_from_attitude(pitch: f64, roll: f64) -> GravityVector {
    GravityVector {
        x: roll.sin() * pitch.cos(),
        y: -pitch.sin(),
        z: -roll.cos() * pitch.cos(),
    }
}

/// Playback of a recorded motion trace, one sample per poll.
pub struct ReplayBackend {
    samples: Vec<MotionSample>,
    index: usize,
    source: String,
}

impl ReplayBackend {
    /// Load a trace file.
    pub fn open(path: &Path) -> ParallaxResult<Self> {
        let trace = read_trace(path)?;
        tracing::info!(
            path = %path.display(),
            samples = trace.samples.len(),
            "Loaded motion trace"
        );
        let source = trace
            .header
            .map(|h| h.source)
            .unwrap_or_else(|| "unknown".to_string());
        Ok(Self {
            samples: trace.samples,
            index: 0,
            source,
        })
    }

    /// Name of the backend that originally recorded the trace.
    pub fn recorded_source(&self) -> &str {
        &self.source
    }

    /// Samples not yet played.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.index
    }
}

impl MotionBackend for ReplayBackend {
    fn poll(&mut self) -> ParallaxResult<Option<MotionSample>> {
        let sample = self.samples.get(self.index).copied();
        if sample.is_some() {
            self.index += 1;
        }
        Ok(sample)
    }

    fn name(&self) -> &str {
        "replay"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_finished(&self) -> bool {
        self.index >= self.samples.len()
    }
}

/// Stub backend for testing: preloaded samples, or no device motion at all.
pub struct StubBackend {
    samples: Vec<MotionSample>,
    index: usize,
    available: bool,
}

impl StubBackend {
    /// Create a stub backend with pre-loaded samples.
    pub fn new(samples: Vec<MotionSample>) -> Self {
        Self {
            samples,
            index: 0,
            available: true,
        }
    }

    /// A source on a device without motion hardware.
    pub fn unavailable() -> Self {
        Self {
            samples: vec![],
            index: 0,
            available: false,
        }
    }
}

impl MotionBackend for StubBackend {
    fn poll(&mut self) -> ParallaxResult<Option<MotionSample>> {
        if self.index < self.samples.len() {
            let sample = self.samples[self.index];
            self.index += 1;
            Ok(Some(sample))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_finished(&self) -> bool {
        self.index >= self.samples.len()
    }
}

/// Build the backend for `kind`.
///
/// Anything that cannot be set up degrades to a source without device
/// motion, which leaves the card flat.
pub fn detect_backend(kind: BackendKind, trace: Option<&Path>, rate_hz: u32) -> Box<dyn MotionBackend> {
    match kind {
        BackendKind::Synthetic => {
            tracing::info!(rate_hz, "Using synthetic motion backend");
            Box::new(SyntheticBackend::new(rate_hz))
        }
        BackendKind::Replay => match trace {
            Some(path) => match ReplayBackend::open(path) {
                Ok(backend) => Box::new(backend),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to open motion trace, device motion unavailable");
                    Box::new(StubBackend::unavailable())
                }
            },
            None => {
                tracing::warn!("Replay backend requested without a trace file, device motion unavailable");
                Box::new(StubBackend::unavailable())
            }
        },
        BackendKind::None => {
            tracing::info!("Device motion disabled");
            Box::new(StubBackend::unavailable())
        }
    }
}
