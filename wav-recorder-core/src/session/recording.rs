use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::AudioChannel;
use crate::models::config::RecordingConfig;
use crate::models::error::RecorderError;
use crate::models::state::RecordingState;
use crate::models::wav_blob::WavBlob;
use crate::processing::accumulator::SampleAccumulator;
use crate::processing::{channel_mixer, resampler, wav_format};
use crate::traits::capture_provider::{CaptureProvider, ChunkCallback};
use crate::traits::recording_delegate::RecordingDelegate;

/// Microphone recording session.
///
/// Generic over the input device via the `CaptureProvider` trait. Capture
/// callbacks append to a shared `SampleAccumulator`; `stop()` releases the
/// device and renders everything captured into a single WAV blob:
/// ```text
/// [Provider] → push_frame → [SampleAccumulator]
///                                  │ stop()
///                                  ↓
///   flatten(L), flatten(R) → interleave → resample → encode → [WavBlob]
/// ```
pub struct RecordingSession<P: CaptureProvider> {
    provider: P,
    config: RecordingConfig,
    state: RecordingState,
    accumulator: Arc<Mutex<SampleAccumulator>>,
    delegate: Option<Arc<dyn RecordingDelegate>>,
    source_sample_rate: u32,
    blob: Option<WavBlob>,
    acquired: bool,
}

impl<P: CaptureProvider> RecordingSession<P> {
    pub fn new(provider: P, config: RecordingConfig) -> Result<Self, RecorderError> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            state: RecordingState::Idle,
            accumulator: Arc::new(Mutex::new(SampleAccumulator::new())),
            delegate: None,
            source_sample_rate: 0,
            blob: None,
            acquired: false,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecordingDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn config(&self) -> &RecordingConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Samples captured per channel so far.
    pub fn recording_length(&self) -> usize {
        self.accumulator.lock().recording_length()
    }

    /// Acquire the input device and begin accumulating. Transitions: idle → capturing.
    ///
    /// On failure the session stays idle and `start` may be retried.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        if !self.state.is_idle() {
            return Err(RecorderError::InvalidState(format!(
                "can only start from idle state (current: {})",
                self.state.as_str()
            )));
        }

        let accumulator = Arc::clone(&self.accumulator);
        let delegate = self.delegate.clone();
        let callback: ChunkCallback = Arc::new(move |left: &[f32], right: &[f32]| {
            accumulator.lock().push_frame(left, right);
            if let Some(ref d) = delegate {
                d.on_data(left);
            }
        });

        if let Err(e) = self.provider.acquire(self.config.chunk_size, callback) {
            log::warn!("Failed to acquire input device: {}", e);
            self.notify_error(&e);
            return Err(e);
        }
        self.acquired = true;

        self.source_sample_rate = self.provider.sample_rate();
        if self.source_sample_rate == 0 {
            self.release_provider();
            let e = RecorderError::Device("device reported a zero sample rate".into());
            self.notify_error(&e);
            return Err(e);
        }

        log::debug!(
            "Capturing from {} at {} Hz, chunk size {}",
            self.provider.device_info().name,
            self.source_sample_rate,
            self.config.chunk_size
        );
        self.set_state(RecordingState::Capturing);
        Ok(())
    }

    /// Release the device and render the WAV blob. Transitions: capturing → stopped.
    pub fn stop(&mut self) -> Result<&WavBlob, RecorderError> {
        if !self.state.is_capturing() {
            return Err(RecorderError::InvalidState(format!(
                "can only stop from capturing state (current: {})",
                self.state.as_str()
            )));
        }

        // Capture is disconnected before processing begins.
        self.release_provider();

        let blob = self.render();
        self.set_state(RecordingState::Stopped);
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_finished(&blob);
        }
        let blob: &WavBlob = self.blob.insert(blob);
        Ok(blob)
    }

    /// Discard captured audio and the stored blob. Transitions: any → idle.
    pub fn reset(&mut self) {
        if self.acquired {
            self.release_provider();
        }
        self.accumulator.lock().reset();
        self.blob = None;
        self.source_sample_rate = 0;
        if !self.state.is_idle() {
            self.set_state(RecordingState::Idle);
        }
    }

    /// The blob produced by the last `stop()`.
    pub fn blob(&self) -> Result<&WavBlob, RecorderError> {
        self.blob
            .as_ref()
            .ok_or_else(|| RecorderError::InvalidState("no recording available; call stop() first".into()))
    }

    // --- Internal helpers ---

    fn set_state(&mut self, new_state: RecordingState) {
        log::debug!("Recording state: {} → {}", self.state.as_str(), new_state.as_str());
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(new_state);
        }
    }

    fn notify_error(&self, error: &RecorderError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }

    fn release_provider(&mut self) {
        if let Err(e) = self.provider.release() {
            log::error!("Failed to release input device: {}", e);
            self.notify_error(&e);
        }
        self.acquired = false;
    }

    /// Flatten → interleave (stereo only) → resample → encode.
    fn render(&self) -> WavBlob {
        let samples = {
            let accumulator = self.accumulator.lock();
            let left = accumulator.flatten(AudioChannel::Left);
            if self.config.is_mono() {
                left
            } else {
                let right = accumulator.flatten(AudioChannel::Right);
                channel_mixer::interleave(&left, &right)
            }
        };

        let resampled = resampler::downsample_interleaved(
            &samples,
            self.config.channel_count as usize,
            self.source_sample_rate,
            self.config.sample_rate,
        );

        log::info!(
            "Encoding {} samples ({} Hz → {} Hz, {} channel(s))",
            resampled.len(),
            self.source_sample_rate,
            self.config.sample_rate,
            self.config.channel_count
        );
        wav_format::encode_wav(&resampled, &self.config)
    }
}

impl<P: CaptureProvider> Drop for RecordingSession<P> {
    fn drop(&mut self) {
        if self.acquired {
            self.release_provider();
        }
    }
}
