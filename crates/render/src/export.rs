//! Offline frame export.
//!
//! Runs a recorded sample stream through the transform and compositor
//! exactly as the live view would, one frame per sample, and writes the
//! result as JSONL for inspection or for driving an external renderer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use parallax_common::error::{ParallaxError, ParallaxResult};
use parallax_model::{CardLayout, MotionSample, TimestampNs, VisualState};
use parallax_transform::{MotionState, TiltParams};
use serde::{Deserialize, Serialize};

use crate::compositor::{compose, FrameComposition};

/// One exported frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Zero-based frame number.
    pub index: u64,

    /// Timestamp of the sample the frame was composed from.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    pub composition: FrameComposition,
}

impl FrameRecord {
    pub fn state(&self) -> &VisualState {
        &self.composition.state
    }
}

/// Aggregate figures over an export.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportSummary {
    pub frames: u64,
    /// Frames where pitch passed the threshold.
    pub tilted_frames: u64,
    /// Most negative pitch rotation seen (degrees).
    pub min_rotation_x_deg: f64,
    pub min_rotation_y_deg: f64,
    pub max_rotation_y_deg: f64,
    /// Largest blob offset magnitude seen on either axis.
    pub max_blob_offset: f64,
}

/// Compose one frame per sample, feeding samples through a latest-sample holder.
pub fn render_trace(
    samples: &[MotionSample],
    layout: &CardLayout,
    params: &TiltParams,
) -> Vec<FrameRecord> {
    let mut state = MotionState::new();
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            state.update(*sample);
            FrameRecord {
                index: index as u64,
                timestamp_ns: sample.timestamp_ns,
                composition: compose(&state.visual_state(params), layout),
            }
        })
        .collect()
}

/// Summarize exported frames.
pub fn summarize(frames: &[FrameRecord]) -> ExportSummary {
    let mut summary = ExportSummary::default();
    for (i, frame) in frames.iter().enumerate() {
        let s = frame.state();
        if i == 0 {
            summary.min_rotation_y_deg = s.rotation_y_deg;
            summary.max_rotation_y_deg = s.rotation_y_deg;
        }
        summary.frames += 1;
        if s.rotation_x_deg < 0.0 {
            summary.tilted_frames += 1;
        }
        summary.min_rotation_x_deg = summary.min_rotation_x_deg.min(s.rotation_x_deg);
        summary.min_rotation_y_deg = summary.min_rotation_y_deg.min(s.rotation_y_deg);
        summary.max_rotation_y_deg = summary.max_rotation_y_deg.max(s.rotation_y_deg);
        summary.max_blob_offset = summary
            .max_blob_offset
            .max(s.blob_offset_x.abs())
            .max(s.blob_offset_y.abs());
    }
    summary
}

/// Write frames as JSONL, one record per line.
pub fn write_frames(path: &Path, frames: &[FrameRecord]) -> ParallaxResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for frame in frames {
        let json = serde_json::to_string(frame)?;
        writeln!(writer, "{json}")
            .map_err(|e| ParallaxError::render(format!("Failed to write frame: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| ParallaxError::render(format!("Failed to flush frames: {e}")))?;
    tracing::info!(path = %path.display(), frames = frames.len(), "Frames exported");
    Ok(())
}
