//! Motion trace files on disk.
//!
//! Writing is append-only JSONL so a crash loses at most the buffered tail.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parallax_common::error::{ParallaxError, ParallaxResult};
use parallax_model::trace::{parse_trace, Trace, TraceHeader};
use parallax_model::MotionSample;

/// Flush cadence, in samples (roughly four seconds at 60 Hz).
const FLUSH_EVERY: u64 = 240;

/// Writes motion samples to a JSONL trace file.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    samples_written: u64,
}

impl TraceWriter {
    /// Create a new trace, writing the header as the first line.
    pub fn new(path: PathBuf, header: &TraceHeader) -> ParallaxResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| ParallaxError::trace(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            samples_written: 0,
        })
    }

    /// Append one sample.
    pub fn write_sample(&mut self, sample: &MotionSample) -> ParallaxResult<()> {
        let json = serde_json::to_string(sample)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| ParallaxError::trace(format!("Failed to write sample: {e}")))?;
        self.samples_written += 1;

        if self.samples_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> ParallaxResult<()> {
        self.writer
            .flush()
            .map_err(|e| ParallaxError::trace(format!("Failed to flush trace: {e}")))?;
        Ok(())
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read and parse a trace file.
pub fn read_trace(path: &Path) -> ParallaxResult<Trace> {
    if !path.exists() {
        return Err(ParallaxError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content).map_err(|e| ParallaxError::trace(format!("{}: {e}", path.display())))
}
