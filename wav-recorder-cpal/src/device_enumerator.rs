//! Input device enumeration via the cpal default host.
//!
//! cpal exposes no stable device identifiers, so the device name doubles as
//! the `AudioSource` id.

use cpal::traits::{DeviceTrait, HostTrait};

use wav_recorder_core::models::audio_models::AudioSource;
use wav_recorder_core::models::error::RecorderError;

/// Audio device enumerator over the platform's default cpal host.
pub struct DeviceEnumerator {
    host: cpal::Host,
}

impl DeviceEnumerator {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    /// List input (microphone) devices.
    pub fn list_capture_devices(&self) -> Result<Vec<AudioSource>, RecorderError> {
        let default_name = self.default_capture_device().and_then(|d| d.name().ok());
        let devices = self
            .host
            .input_devices()
            .map_err(|e| RecorderError::Device(format!("failed to enumerate input devices: {}", e)))?;

        let mut sources = Vec::new();
        for device in devices {
            match describe(&device, default_name.as_deref()) {
                Some(source) => sources.push(source),
                None => log::debug!("Skipping input device without a usable default config"),
            }
        }
        Ok(sources)
    }

    /// The host's default input device, if any.
    pub fn default_capture_device(&self) -> Option<cpal::Device> {
        self.host.default_input_device()
    }

    /// Find an input device by exact name.
    pub fn find_capture_device(&self, name: &str) -> Result<cpal::Device, RecorderError> {
        self.host
            .input_devices()
            .map_err(|e| RecorderError::Device(format!("failed to enumerate input devices: {}", e)))?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or(RecorderError::DeviceNotAvailable)
    }
}

impl Default for DeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an `AudioSource` from a device's name and default input config.
pub(crate) fn describe(device: &cpal::Device, default_name: Option<&str>) -> Option<AudioSource> {
    let name = device.name().ok()?;
    let config = device.default_input_config().ok()?;
    Some(AudioSource {
        id: name.clone(),
        is_default: default_name == Some(name.as_str()),
        name,
        channels: config.channels(),
        sample_rate: config.sample_rate().0,
    })
}
