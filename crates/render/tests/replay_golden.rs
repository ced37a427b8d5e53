use std::path::PathBuf;
use std::time::Duration;

use parallax_model::{CardLayout, VisualState};
use parallax_motion::backends::ReplayBackend;
use parallax_motion::trace_file::read_trace;
use parallax_motion::MotionManager;
use parallax_render::export::{render_trace, summarize};
use parallax_render::TiltCardView;
use parallax_transform::TiltParams;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("tilt-sweep.jsonl")
}

// (rotation_x, rotation_y, blob_x, blob_y) per fixture sample.
const EXPECTED: [(f64, f64, f64, f64); 12] = [
    (0.0, 0.0, 0.0, 0.0),
    (0.0, 2.777778, 50.0, 0.0),
    (0.0, 5.555556, 100.0, 0.0),
    (-0.555556, -5.555556, -100.0, 3.333333),
    (-2.777778, 5.555556, 150.0, 16.666667),
    (-5.555556, 16.666667, 250.0, 33.333333),
    (-11.111111, -16.666667, -250.0, 66.666667),
    (-13.888889, -25.0, -350.0, 83.333333),
    (-19.444444, 0.0, 0.0, 116.666667),
    (-2.777778, 5.555556, 150.0, 16.666667),
    (0.0, 0.0, 0.0, 0.0),
    (0.0, 0.0, -50.0, 0.0),
];

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-5
}

#[test]
fn fixture_trace_frames_match_expected_states() {
    let trace = read_trace(&fixture_path()).expect("fixture trace should be readable");
    assert_eq!(trace.header.as_ref().map(|h| h.sample_rate_hz), Some(60));
    assert_eq!(trace.samples.len(), EXPECTED.len());

    let frames = render_trace(&trace.samples, &CardLayout::default(), &TiltParams::default());
    for (frame, &(rx, ry, bx, by)) in frames.iter().zip(EXPECTED.iter()) {
        let s = frame.state();
        assert!(
            close(s.rotation_x_deg, rx)
                && close(s.rotation_y_deg, ry)
                && close(s.blob_offset_x, bx)
                && close(s.blob_offset_y, by),
            "frame {} diverged: {s:?}",
            frame.index
        );
    }

    // Pitch exactly at 35° does not tilt.
    assert_eq!(frames[2].state().rotation_x_deg, 0.0);
    assert_eq!(frames[11].state().blob_offset_y, 0.0);
    // Roll of -45° runs past the cap on the negative side only.
    assert!(frames[7].state().rotation_y_deg < -20.0);

    let summary = summarize(&frames);
    assert_eq!(summary.frames, 12);
    assert_eq!(summary.tilted_frames, 7);
    assert!(close(summary.min_rotation_x_deg, -19.444444));
    assert!(close(summary.max_blob_offset, 350.0));
}

#[tokio::test]
async fn replayed_trace_drives_live_view_to_last_sample() {
    let backend = ReplayBackend::open(&fixture_path()).expect("fixture trace should open");
    let mut manager = MotionManager::new(Box::new(backend));
    manager.set_update_interval(Duration::from_millis(1));

    let mut view = TiltCardView::new(manager).with_update_rate(1000);
    assert_eq!(view.frame().state, VisualState::ZERO);

    view.on_appear();
    while view.wait_for_sample().await {}

    let (rx, ry, bx, by) = EXPECTED[11];
    let state = view.visual_state();
    assert!(close(state.rotation_x_deg, rx));
    assert!(close(state.rotation_y_deg, ry));
    assert!(close(state.blob_offset_x, bx));
    assert!(close(state.blob_offset_y, by));

    view.on_disappear();
    assert!(!view.is_subscribed());
}
