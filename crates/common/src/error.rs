//! Error types shared across the tilt card crates.

use std::path::PathBuf;

/// Top-level error type for tilt card operations.
///
/// The effect itself never fails; these errors come from the tooling
/// around it (trace files, configuration, backends, the CLI).
#[derive(Debug, thiserror::Error)]
pub enum ParallaxError {
    #[error("Motion error: {message}")]
    Motion { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Device motion unavailable: {message}")]
    Unavailable { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ParallaxError.
pub type ParallaxResult<T> = Result<T, ParallaxError>;

impl ParallaxError {
    pub fn motion(msg: impl Into<String>) -> Self {
        Self::Motion {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ParallaxError::trace("line 3: missing attitude");
        assert_eq!(err.to_string(), "Trace error: line 3: missing attitude");

        let err = ParallaxError::unavailable("stub backend");
        assert_eq!(err.to_string(), "Device motion unavailable: stub backend");
    }

    #[test]
    fn test_json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ParallaxError = parse.unwrap_err().into();
        assert!(matches!(err, ParallaxError::Json(_)));
    }
}
