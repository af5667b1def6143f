use serde::{Deserialize, Serialize};

use super::error::RecorderError;

/// Default target sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Highest accepted target sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Default number of samples per channel delivered by one capture callback.
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// How float samples outside `[-1.0, 1.0]` are turned into 16-bit PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PcmQuantization {
    /// Scale and round, letting out-of-range values wrap around the i16 range.
    #[default]
    Wrap,
    /// Saturate at `i16::MIN` / `i16::MAX`.
    Clamp,
}

/// Configuration for a recording session.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordingConfig {
    /// Number of output channels: 1 (mono) or 2 (stereo).
    pub channel_count: u16,

    /// Target sample rate of the encoded file in Hz (default: 44100).
    pub sample_rate: u32,

    /// Samples per channel per capture callback (default: 2048).
    pub chunk_size: usize,

    /// Out-of-range sample handling during PCM conversion.
    pub quantization: PcmQuantization,
}

impl RecordingConfig {
    pub fn mono() -> Self {
        Self {
            channel_count: 1,
            ..Default::default()
        }
    }

    pub fn stereo() -> Self {
        Self::default()
    }

    pub fn is_mono(&self) -> bool {
        self.channel_count == 1
    }

    /// Bytes per second of 16-bit PCM output.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.channel_count as u32).saturating_mul(2)
    }

    pub fn validate(&self) -> Result<(), RecorderError> {
        if ![1, 2].contains(&self.channel_count) {
            return Err(RecorderError::ConfigurationFailed(format!(
                "unsupported channel count: {}",
                self.channel_count
            )));
        }
        if self.sample_rate == 0 {
            return Err(RecorderError::ConfigurationFailed("sample rate must be positive".into()));
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            return Err(RecorderError::ConfigurationFailed(format!(
                "sample rate {} exceeds maximum of {} Hz",
                self.sample_rate, MAX_SAMPLE_RATE
            )));
        }
        if self.chunk_size == 0 {
            return Err(RecorderError::ConfigurationFailed("chunk size must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RecorderError::ConfigurationFailed(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            channel_count: 2,
            sample_rate: DEFAULT_SAMPLE_RATE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            quantization: PcmQuantization::Wrap,
        }
    }
}
