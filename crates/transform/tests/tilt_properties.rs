use std::f64::consts::PI;

use parallax_model::{MotionSample, VisualState};
use parallax_transform::{tilt, visual_state, TiltParams};
use proptest::prelude::*;

const THRESHOLD: f64 = 35.0 * PI / 180.0;

proptest! {
    #[test]
    fn upright_below_threshold(
        pitch in -PI..=THRESHOLD,
        roll in -PI..PI,
        gx in -1.0f64..=1.0,
    ) {
        let state = tilt(&MotionSample::from_angles(pitch, roll, gx), &TiltParams::default());
        prop_assert_eq!(state.rotation_x_deg, 0.0);
        prop_assert_eq!(state.blob_offset_y, 0.0);
    }

    #[test]
    fn pitch_excess_drives_tilt_and_blob(delta in 1e-6f64..1.5, roll in -PI..PI) {
        let params = TiltParams::default();
        let state = tilt(&MotionSample::from_angles(THRESHOLD + delta, roll, 0.0), &params);
        let excess = (THRESHOLD + delta) - THRESHOLD;

        let expected_x = -(excess * 100.0 / PI).min(20.0);
        prop_assert!((state.rotation_x_deg - expected_x).abs() < 1e-9);
        prop_assert!((state.blob_offset_y - excess * 600.0 / PI).abs() < 1e-9);
        prop_assert!(state.rotation_x_deg < 0.0);
        prop_assert!(state.rotation_x_deg >= -20.0);
    }

    #[test]
    fn roll_capped_above_only(roll in -10.0f64..10.0) {
        let state = tilt(&MotionSample::from_angles(0.0, roll, 0.0), &TiltParams::default());
        prop_assert_eq!(state.rotation_y_deg, (roll * (100.0 / PI)).min(20.0));
        prop_assert!(state.rotation_y_deg <= 20.0);
        if roll < 0.0 {
            prop_assert!(state.rotation_y_deg < 0.0);
        }
    }

    #[test]
    fn gravity_x_scales_by_500(gx in -1.0f64..=1.0) {
        let state = tilt(&MotionSample::from_angles(0.2, 0.1, gx), &TiltParams::default());
        prop_assert_eq!(state.blob_offset_x, gx * 500.0);
        prop_assert!(state.blob_offset_x.abs() <= 500.0);
    }

    #[test]
    fn transform_is_pure(
        pitch in -PI..PI,
        roll in -PI..PI,
        gx in -1.0f64..=1.0,
        t in any::<u64>(),
    ) {
        let params = TiltParams::default();
        let sample = MotionSample::from_angles(pitch, roll, gx).at(t);
        let first = visual_state(Some(&sample), &params);
        let second = visual_state(Some(&sample), &params);
        prop_assert_eq!(first, second);
        // The timestamp never affects the result.
        prop_assert_eq!(first, tilt(&sample.at(0), &params));
    }
}

#[test]
fn no_sample_means_flat_card() {
    assert_eq!(visual_state(None, &TiltParams::default()), VisualState::ZERO);
}
