//! Compose one frame per sample of a recorded trace.

use std::path::PathBuf;

use parallax_model::CardLayout;
use parallax_motion::trace_file::read_trace;
use parallax_render::export::{render_trace, summarize, write_frames};
use parallax_transform::TiltParams;

pub fn run(trace_path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Replaying trace: {}", trace_path.display());

    let trace = read_trace(&trace_path)?;
    if let Some(header) = &trace.header {
        println!(
            "  Source: {} @ {}Hz (started {})",
            header.source, header.sample_rate_hz, header.epoch_wall
        );
    }
    println!("  Loaded {} samples", trace.samples.len());

    if trace.samples.is_empty() {
        println!("  No samples to replay.");
        return Ok(());
    }

    let frames = render_trace(&trace.samples, &CardLayout::default(), &TiltParams::default());
    let summary = summarize(&frames);

    println!("  Frames: {}", summary.frames);
    println!(
        "  Tilted: {} ({:.1}%)",
        summary.tilted_frames,
        100.0 * summary.tilted_frames as f64 / summary.frames as f64
    );
    println!("  Deepest pitch tilt: {:.2}°", summary.min_rotation_x_deg);
    println!(
        "  Roll tilt range: {:.2}° .. {:.2}°",
        summary.min_rotation_y_deg, summary.max_rotation_y_deg
    );
    println!("  Largest blob offset: {:.1}", summary.max_blob_offset);

    if let Some(path) = output {
        write_frames(&path, &frames)?;
        println!("  Frames written to: {}", path.display());
    }

    Ok(())
}
