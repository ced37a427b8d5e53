//! Motion trace files.
//!
//! A trace is JSONL: the first line is a `# `-prefixed header object,
//! followed by one [`MotionSample`] per line in delivery order.
//!
//! ```text
//! # {"schema_version":"1.0","epoch_wall":"...","sample_rate_hz":60,"source":"synthetic"}
//! {"t":0,"attitude":{"pitch":0.61,"roll":0.0,"yaw":0.0},"gravity":{"x":0.0,"y":-0.57,"z":-0.82}}
//! ```

use serde::{Deserialize, Serialize};

use crate::motion::MotionSample;

/// Current trace schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time when sampling started (RFC 3339).
    pub epoch_wall: String,

    /// Nominal sample delivery rate (Hz).
    pub sample_rate_hz: u32,

    /// Name of the backend that produced the samples.
    pub source: String,
}

impl TraceHeader {
    pub fn new(epoch_wall: impl Into<String>, sample_rate_hz: u32, source: impl Into<String>) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.into(),
            sample_rate_hz,
            source: source.into(),
        }
    }
}

/// Errors raised while reading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("line {line}: invalid header: {source}")]
    Header {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: invalid sample: {source}")]
    Sample {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A parsed trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Absent for bare sample lists.
    pub header: Option<TraceHeader>,
    pub samples: Vec<MotionSample>,
}

/// Parse trace content. Blank lines are skipped; only the first
/// non-blank line may be a header.
pub fn parse_trace(content: &str) -> Result<Trace, TraceError> {
    let mut header = None;
    let mut samples = Vec::new();
    let mut seen_first = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        if let Some(rest) = line.strip_prefix('#') {
            if !seen_first {
                header = Some(
                    serde_json::from_str(rest.trim())
                        .map_err(|source| TraceError::Header { line: line_no, source })?,
                );
            }
            seen_first = true;
            continue;
        }
        seen_first = true;

        let sample = serde_json::from_str(line)
            .map_err(|source| TraceError::Sample { line: line_no, source })?;
        samples.push(sample);
    }

    Ok(Trace { header, samples })
}

/// Serialize a header and samples to trace content.
pub fn serialize_trace(
    header: &TraceHeader,
    samples: &[MotionSample],
) -> Result<String, serde_json::Error> {
    let mut output = format!("# {}\n", serde_json::to_string(header)?);
    for sample in samples {
        output.push_str(&serde_json::to_string(sample)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> TraceHeader {
        TraceHeader::new("2026-01-01T00:00:00Z", 60, "stub")
    }

    #[test]
    fn test_serialized_trace_parses_back() {
        let samples = vec![
            MotionSample::from_angles(0.5, 0.1, 0.0),
            MotionSample::from_angles(0.7, -0.2, 0.3).at(16_666_666),
        ];
        let content = serialize_trace(&header(), &samples).unwrap();
        assert!(content.starts_with("# {"));

        let trace = parse_trace(&content).unwrap();
        assert_eq!(trace.header, Some(header()));
        assert_eq!(trace.samples, samples);
    }

    #[test]
    fn test_headerless_trace_and_blank_lines() {
        let content = "\n{\"t\":5,\"attitude\":{\"pitch\":0.1,\"roll\":0.2,\"yaw\":0.0},\"gravity\":{\"x\":0.3,\"y\":0.0,\"z\":-1.0}}\n\n";
        let trace = parse_trace(content).unwrap();
        assert!(trace.header.is_none());
        assert_eq!(trace.samples.len(), 1);
        assert_eq!(trace.samples[0].timestamp_ns, 5);
        assert_eq!(trace.samples[0].gravity_x(), 0.3);
    }

    #[test]
    fn test_bad_sample_reports_line_number() {
        let content = format!(
            "# {}\n{{\"t\":0,\"attitude\":{{}}}}\n",
            serde_json::to_string(&header()).unwrap()
        );
        let err = parse_trace(&content).unwrap_err();
        assert!(matches!(err, TraceError::Sample { line: 2, .. }));
    }

    #[test]
    fn test_bad_header_is_rejected() {
        let err = parse_trace("# {\"schema_version\":1}\n").unwrap_err();
        assert!(matches!(err, TraceError::Header { line: 1, .. }));
    }
}
