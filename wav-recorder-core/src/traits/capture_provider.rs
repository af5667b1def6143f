use std::sync::Arc;

use crate::models::audio_models::AudioSource;
use crate::models::error::RecorderError;

/// Callback invoked once per capture period.
///
/// Parameters:
/// - `left`: Left channel samples, exactly `chunk_size` long.
/// - `right`: Right channel samples, same length as `left`. Mono devices
///   deliver the same data on both sides.
pub type ChunkCallback = Arc<dyn Fn(&[f32], &[f32]) + Send + Sync + 'static>;

/// Interface for platform-specific microphone sources.
///
/// Implemented by:
/// - `CpalMicCapture` (wav-recorder-cpal)
pub trait CaptureProvider: Send + Sync {
    /// Whether an input device is currently available.
    fn is_available(&self) -> bool;

    /// Acquire the input device and start delivering chunks via `callback`.
    ///
    /// Blocks until the device is open or acquisition fails. The callback
    /// fires on the host audio thread; keep processing minimal.
    fn acquire(&mut self, chunk_size: usize, callback: ChunkCallback) -> Result<(), RecorderError>;

    /// Stop delivery and free the device. Safe to call when nothing was acquired.
    fn release(&mut self) -> Result<(), RecorderError>;

    /// Sample rate of the delivered chunks, in Hz. Valid after `acquire`.
    fn sample_rate(&self) -> u32;

    /// Information about the device backing this provider.
    fn device_info(&self) -> AudioSource;
}
