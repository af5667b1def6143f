use thiserror::Error;

/// Errors that can occur while recording or exporting audio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("device error: {0}")]
    Device(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl RecorderError {
    /// Whether the error came from acquiring the input device.
    ///
    /// Device errors leave the session idle; retrying `start` is allowed.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::DeviceNotAvailable | Self::Device(_))
    }
}
