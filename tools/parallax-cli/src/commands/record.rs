//! Write a synthetic motion trace.

use std::path::PathBuf;

use parallax_common::clock::MotionClock;
use parallax_model::TraceHeader;
use parallax_motion::backends::SyntheticBackend;
use parallax_motion::trace_file::TraceWriter;

pub fn run(output: PathBuf, seconds: f64, rate_hz: u32) -> anyhow::Result<()> {
    let samples = SyntheticBackend::generate(rate_hz, seconds)?;

    let clock = MotionClock::start();
    let header = TraceHeader::new(clock.epoch_wall(), rate_hz, "synthetic");
    let mut writer = TraceWriter::new(output.clone(), &header)
        .map_err(|e| anyhow::anyhow!("Failed to create trace: {e}"))?;

    for sample in &samples {
        writer.write_sample(sample)?;
    }
    writer.flush()?;

    tracing::info!(samples = writer.samples_written(), "Trace recorded");
    println!(
        "Wrote {} samples ({seconds:.1}s @ {rate_hz}Hz) to {}",
        writer.samples_written(),
        output.display()
    );

    Ok(())
}
