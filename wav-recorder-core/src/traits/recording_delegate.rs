use crate::models::error::RecorderError;
use crate::models::state::RecordingState;
use crate::models::wav_blob::WavBlob;

/// Event delegate for recording session notifications.
///
/// `on_data` is called from the capture thread; the other methods are called
/// from whichever thread drives the session.
pub trait RecordingDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: RecordingState);

    /// Called with the left-channel chunk of every capture period.
    fn on_data(&self, samples: &[f32]);

    /// Called when acquiring or releasing the device fails.
    fn on_error(&self, error: &RecorderError);

    /// Called when `stop()` has produced the WAV blob.
    fn on_recording_finished(&self, blob: &WavBlob);
}
