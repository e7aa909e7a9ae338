use std::path::PathBuf;

use hgrid_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Exit code for a rejected grid or slide configuration.
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for a malformed trace file.
pub const EXIT_TRACE: i32 = 3;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("trace line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Trace { .. } => EXIT_TRACE,
            _ => 1,
        }
    }

    #[must_use]
    pub fn trace(line: usize, message: impl Into<String>) -> Self {
        Self::Trace {
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_use_dedicated_exit_code() {
        let error = HarnessError::from(ConfigError::EmptyTrack);
        assert_eq!(error.exit_code(), EXIT_CONFIG);
        assert_eq!(
            error.to_string(),
            "invalid configuration: slider track length must be positive"
        );
    }

    #[test]
    fn trace_constructor_preserves_line() {
        let error = HarnessError::trace(7, "time went backwards");
        assert_eq!(error.exit_code(), EXIT_TRACE);
        assert_eq!(error.to_string(), "trace line 7: time went backwards");
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(HarnessError::invalid("nope").exit_code(), 1);
    }
}
