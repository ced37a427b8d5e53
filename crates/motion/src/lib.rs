//! Parallax Motion
//!
//! Produces device motion samples and delivers them to a consumer as an
//! explicit subscription. Uses a pluggable backend architecture:
//!
//! - **Synthetic:** generated oscillating tilt (no hardware needed)
//! - **Replay:** playback of a recorded motion trace
//! - **Stub:** preloaded samples, or a source that reports no device motion
//!
//! Delivery is latest-wins: a reader that falls behind only ever sees the
//! newest sample, never a backlog.

pub mod backends;
pub mod trace_file;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parallax_common::clock::interval_for_hz;
use parallax_common::error::{ParallaxError, ParallaxResult};
use parallax_model::MotionSample;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default sample delivery rate (Hz).
pub const DEFAULT_UPDATE_RATE_HZ: u32 = 60;

/// Trait for motion sources.
pub trait MotionBackend: Send {
    /// Poll for the next sample. Returns `None` if no sample is ready.
    fn poll(&mut self) -> ParallaxResult<Option<MotionSample>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether this source can produce device motion at all.
    fn is_available(&self) -> bool;

    /// Whether the source has run dry and will never produce another sample.
    fn is_finished(&self) -> bool {
        false
    }
}

type SharedBackend = Arc<Mutex<Box<dyn MotionBackend>>>;

/// Owns a motion backend and hands out update subscriptions.
pub struct MotionManager {
    backend: SharedBackend,
    backend_name: String,
    update_interval: Duration,
    active: Option<Arc<AtomicBool>>,
}

impl MotionManager {
    /// Create a manager around `backend`, delivering at 60 Hz.
    pub fn new(backend: Box<dyn MotionBackend>) -> Self {
        let backend_name = backend.name().to_string();
        Self {
            backend: Arc::new(Mutex::new(backend)),
            backend_name,
            update_interval: interval_for_hz(DEFAULT_UPDATE_RATE_HZ),
            active: None,
        }
    }

    /// Whether the backend can deliver device motion.
    pub fn is_device_motion_available(&self) -> bool {
        lock_backend(&self.backend).is_available()
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Set the delivery interval used by the next `start_updates` call.
    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval.max(Duration::from_micros(100));
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Whether a subscription handed out by this manager is still running.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|flag| !flag.load(Ordering::SeqCst))
    }

    /// Start periodic delivery on the current tokio runtime.
    ///
    /// Fails when device motion is unavailable or a previous subscription
    /// is still running. Must be called from within a runtime.
    pub fn start_updates(&mut self) -> ParallaxResult<MotionUpdates> {
        if !self.is_device_motion_available() {
            return Err(ParallaxError::unavailable(format!(
                "backend '{}' reports no device motion",
                self.backend_name
            )));
        }
        if self.is_active() {
            return Err(ParallaxError::motion("motion updates already started"));
        }

        let (sender, receiver) = watch::channel(None);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(sample_loop(
            self.backend.clone(),
            self.update_interval,
            sender,
            stop_flag.clone(),
        ));

        tracing::info!(
            backend = %self.backend_name,
            interval_us = self.update_interval.as_micros() as u64,
            "Motion updates started"
        );

        self.active = Some(stop_flag.clone());
        Ok(MotionUpdates {
            receiver,
            stop_flag,
            task: Some(task),
        })
    }
}

async fn sample_loop(
    backend: SharedBackend,
    interval: Duration,
    sender: watch::Sender<Option<MotionSample>>,
    stop_flag: Arc<AtomicBool>,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut delivered = 0u64;

    while !stop_flag.load(Ordering::Relaxed) {
        ticker.tick().await;

        let polled = {
            let mut backend = lock_backend(&backend);
            if backend.is_finished() {
                tracing::debug!(backend = %backend.name(), "Motion source finished");
                break;
            }
            backend.poll()
        };

        match polled {
            Ok(Some(sample)) => {
                if sender.send(Some(sample)).is_err() {
                    break;
                }
                delivered += 1;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Motion backend poll failed");
            }
        }
    }

    stop_flag.store(true, Ordering::SeqCst);
    tracing::debug!(delivered, "Motion sample loop exited");
    delivered
}

fn lock_backend(backend: &SharedBackend) -> std::sync::MutexGuard<'_, Box<dyn MotionBackend>> {
    backend.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A running motion subscription. Dropping it stops delivery.
pub struct MotionUpdates {
    receiver: watch::Receiver<Option<MotionSample>>,
    stop_flag: Arc<AtomicBool>,
    task: Option<JoinHandle<u64>>,
}

impl MotionUpdates {
    /// Wait for a sample newer than the last one observed.
    ///
    /// Returns `None` once the source has finished or been stopped.
    pub async fn next(&mut self) -> Option<MotionSample> {
        loop {
            self.receiver.changed().await.ok()?;
            let sample = *self.receiver.borrow_and_update();
            if sample.is_some() {
                return sample;
            }
        }
    }

    /// The newest sample if it has not been observed yet. Never waits.
    pub fn try_next(&mut self) -> Option<MotionSample> {
        let current = self.receiver.borrow_and_update();
        if current.has_changed() {
            *current
        } else {
            None
        }
    }

    /// The newest sample delivered so far, observed or not.
    pub fn latest(&self) -> Option<MotionSample> {
        *self.receiver.borrow()
    }

    /// Whether samples may still arrive.
    pub fn is_active(&self) -> bool {
        !self.stop_flag.load(Ordering::SeqCst)
            && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop delivery and release the sampling task.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Wait for a finite source to run dry; returns the number of samples delivered.
    pub async fn join(mut self) -> ParallaxResult<u64> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| ParallaxError::motion(format!("motion task failed: {e}"))),
            None => Ok(0),
        }
    }
}

impl Drop for MotionUpdates {
    fn drop(&mut self) {
        self.stop();
    }
}
