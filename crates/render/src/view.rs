//! The tilt card view.
//!
//! Ties the pieces together the way a screen would: subscribe to motion
//! when the card appears, fold each delivered sample into the latest-sample
//! holder, compose a frame from it on every render pass, and release the
//! subscription when the card goes away.

use parallax_common::clock::interval_for_hz;
use parallax_model::{CardLayout, VisualState};
use parallax_motion::{MotionManager, MotionUpdates, DEFAULT_UPDATE_RATE_HZ};
use parallax_transform::{MotionState, TiltParams};

use crate::compositor::{compose, FrameComposition};

/// A card that tilts with device motion.
pub struct TiltCardView {
    manager: MotionManager,
    updates: Option<MotionUpdates>,
    state: MotionState,
    params: TiltParams,
    layout: CardLayout,
    update_rate_hz: u32,
}

impl TiltCardView {
    pub fn new(manager: MotionManager) -> Self {
        Self {
            manager,
            updates: None,
            state: MotionState::new(),
            params: TiltParams::default(),
            layout: CardLayout::default(),
            update_rate_hz: DEFAULT_UPDATE_RATE_HZ,
        }
    }

    /// Override the delivery rate requested on appearance.
    pub fn with_update_rate(mut self, rate_hz: u32) -> Self {
        self.update_rate_hz = rate_hz;
        self
    }

    /// Start listening for motion. Must be called within a tokio runtime.
    ///
    /// Without device motion the card simply stays flat. A subscription
    /// whose source has finished is released and started again.
    pub fn on_appear(&mut self) {
        if self.is_subscribed() {
            return;
        }
        self.updates = None;

        if !self.manager.is_device_motion_available() {
            tracing::debug!(
                backend = %self.manager.backend_name(),
                "Device motion unavailable, card stays flat"
            );
            return;
        }

        self.manager
            .set_update_interval(interval_for_hz(self.update_rate_hz));
        match self.manager.start_updates() {
            Ok(updates) => self.updates = Some(updates),
            Err(e) => {
                tracing::debug!(error = %e, "Motion updates not started, card stays flat");
            }
        }
    }

    /// Stop listening for motion. The last state is kept.
    pub fn on_disappear(&mut self) {
        if let Some(mut updates) = self.updates.take() {
            updates.stop();
            tracing::info!(
                samples = self.state.samples_seen(),
                "Motion updates stopped"
            );
        }
    }

    /// Whether a live motion subscription is held.
    pub fn is_subscribed(&self) -> bool {
        self.updates.as_ref().is_some_and(|u| u.is_active())
    }

    /// Take the newest delivered sample, if any. Returns whether it changed
    /// the held state.
    pub fn pump(&mut self) -> bool {
        let Some(updates) = self.updates.as_mut() else {
            return false;
        };
        match updates.try_next() {
            Some(sample) => {
                self.state.update(sample);
                true
            }
            None => false,
        }
    }

    /// Wait for the next delivered sample and take it. Returns `false` once
    /// the source has finished or no subscription is held.
    pub async fn wait_for_sample(&mut self) -> bool {
        let Some(updates) = self.updates.as_mut() else {
            return false;
        };
        match updates.next().await {
            Some(sample) => {
                self.state.update(sample);
                true
            }
            None => false,
        }
    }

    /// Current render parameters.
    pub fn visual_state(&self) -> VisualState {
        self.state.visual_state(&self.params)
    }

    /// Render pass: take any new sample, then compose the frame.
    pub fn frame(&mut self) -> FrameComposition {
        self.pump();
        compose(&self.visual_state(), &self.layout)
    }

    /// Total samples received over the view's lifetime.
    pub fn samples_seen(&self) -> u64 {
        self.state.samples_seen()
    }
}

impl Drop for TiltCardView {
    fn drop(&mut self) {
        self.on_disappear();
    }
}
