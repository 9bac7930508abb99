//! Error types shared across MOTION crates.

use std::path::PathBuf;

/// Top-level error type for batch generation.
///
/// Every variant is fatal to the whole run; callers propagate it to the
/// driver, which maps it to a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    #[error("Creation of the directory {} failed: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}: {source}")]
    CommandLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed ({status}):\n{output}")]
    CommandFailed {
        program: String,
        status: String,
        output: String,
    },

    #[error("Failed to remove {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing asset: {}", .path.display())]
    MissingAsset { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using MotionError.
pub type MotionResult<T> = Result<T, MotionError>;

impl MotionError {
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn command_failed(
        program: impl Into<String>,
        status: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            program: program.into(),
            status: status.into(),
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_includes_output() {
        let err = MotionError::command_failed("ffmpeg", "exit status: 1", "No such file");
        let msg = err.to_string();
        assert!(msg.starts_with("ffmpeg failed (exit status: 1)"));
        assert!(msg.ends_with("No such file"));
    }

    #[test]
    fn test_output_dir_message_names_path() {
        let err = MotionError::OutputDir {
            path: PathBuf::from("./nft-videos"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("./nft-videos"));
    }
}
