//! Export loading errors.

use std::path::PathBuf;

/// Error reading a workspace export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Export file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Export file is not valid JSON of the expected shape.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// No channel with this name exists in the directory.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),
    /// Message ID is not of the form `<seconds>.<fraction>/<user>`.
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = ExportError::io(
            "/export/users.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "Failed to read /export/users.json: missing");
    }

    #[test]
    fn test_channel_not_found_display() {
        let err = ExportError::ChannelNotFound("random".to_owned());
        assert_eq!(err.to_string(), "Channel not found: random");
    }

    #[test]
    fn test_export_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExportError>();
    }
}
