//! Map one reading to render parameters.

use parallax_model::{CardLayout, MotionSample};
use parallax_render::compose;
use parallax_transform::{tilt, TiltParams};

pub fn run(pitch_deg: f64, roll_deg: f64, gravity_x: f64, json: bool) -> anyhow::Result<()> {
    let sample = MotionSample::from_degrees(pitch_deg, roll_deg, gravity_x);
    let state = tilt(&sample, &TiltParams::default());

    if json {
        let frame = compose(&state, &CardLayout::default());
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    println!("Input: pitch={pitch_deg}° roll={roll_deg}° gravity.x={gravity_x}");
    println!("  rotation x: {:>10.4}°", state.rotation_x_deg);
    println!("  rotation y: {:>10.4}°", state.rotation_y_deg);
    println!("  blob x:     {:>10.4}", state.blob_offset_x);
    println!("  blob y:     {:>10.4}", state.blob_offset_y);

    Ok(())
}
