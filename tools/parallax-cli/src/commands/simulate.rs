//! Run the card view live against a motion source.
//!
//! Samples and render passes share the single runtime thread, the way a
//! UI thread would host both.

use std::path::PathBuf;

use parallax_common::clock::interval_for_hz;
use parallax_common::config::BackendKind;
use parallax_motion::backends::detect_backend;
use parallax_motion::MotionManager;
use parallax_render::{CommandLog, TiltCardView};
use tokio::time::MissedTickBehavior;

pub async fn run(
    backend: BackendKind,
    trace: Option<PathBuf>,
    frames: u64,
    rate_hz: u32,
) -> anyhow::Result<()> {
    let manager = MotionManager::new(detect_backend(backend, trace.as_deref(), rate_hz));
    let mut view = TiltCardView::new(manager).with_update_rate(rate_hz);
    let mut compositor = CommandLog::new();

    view.on_appear();
    if !view.is_subscribed() {
        println!("Device motion unavailable; the card stays flat.");
    }

    let mut ticker = tokio::time::interval(interval_for_hz(rate_hz));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for index in 0..frames {
        ticker.tick().await;
        let frame = view.frame();
        frame.render_to(&mut compositor)?;
        compositor.clear();

        let s = frame.state;
        tracing::debug!(
            frame = index,
            rotation_x = s.rotation_x_deg,
            rotation_y = s.rotation_y_deg,
            blob_x = s.blob_offset_x,
            blob_y = s.blob_offset_y,
            "Frame composed"
        );
    }

    view.on_disappear();

    let last = view.visual_state();
    println!(
        "Rendered {} frames from {} samples",
        compositor.frames_presented(),
        view.samples_seen()
    );
    println!(
        "Final state: rotation=({:.2}°, {:.2}°) blob=({:.1}, {:.1})",
        last.rotation_x_deg, last.rotation_y_deg, last.blob_offset_x, last.blob_offset_y
    );

    Ok(())
}
