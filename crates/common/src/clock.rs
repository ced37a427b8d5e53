//! Clock and sample rate utilities.
//!
//! Motion samples are stamped with nanoseconds elapsed since a monotonic
//! epoch captured when the source starts. This module provides:
//! - Capturing the epoch
//! - Converting between nanoseconds, seconds and update intervals
//! - Gating a fast poll loop down to a fixed sample rate

use std::time::{Duration, Instant};

/// A clock that provides monotonic timestamps relative to a fixed epoch
/// (the moment the motion source started).
#[derive(Debug, Clone)]
pub struct MotionClock {
    /// The instant sampling started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl MotionClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since the epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

/// Delivery interval for a sample rate. A rate of zero is treated as 1 Hz;
/// the interval never drops below one nanosecond.
pub fn interval_for_hz(hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / hz.max(1) as u64).max(Duration::from_nanos(1))
}

/// Rate controller that decides when the next sample is due.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self::with_interval(interval_for_hz(target_hz))
    }

    /// Create a controller with an explicit interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            target_interval_ns: (interval.as_nanos() as u64).max(1),
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}
