use crate::models::audio_models::{AudioChannel, AudioChunk};
use crate::processing::channel_mixer;

/// Ordered per-channel chunk storage for one capture session.
///
/// Shared with the capture callback as `Arc<parking_lot::Mutex<SampleAccumulator>>`;
/// the mutex serializes `push` and `reset`.
///
/// The recording length follows the left channel, which receives exactly one
/// chunk per capture callback. Right-channel pushes are assumed to arrive in
/// lock-step with the same length.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    left: Vec<AudioChunk>,
    right: Vec<AudioChunk>,
    recording_length: usize,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk to `channel`.
    pub fn push(&mut self, channel: AudioChannel, chunk: AudioChunk) {
        match channel {
            AudioChannel::Left => {
                self.recording_length += chunk.len();
                self.left.push(chunk);
            }
            AudioChannel::Right => self.right.push(chunk),
        }
    }

    /// Append one capture callback's worth of audio for both channels.
    pub fn push_frame(&mut self, left: &[f32], right: &[f32]) {
        self.push(AudioChannel::Left, left.into());
        self.push(AudioChannel::Right, right.into());
    }

    pub fn chunks(&self, channel: AudioChannel) -> &[AudioChunk] {
        match channel {
            AudioChannel::Left => &self.left,
            AudioChannel::Right => &self.right,
        }
    }

    /// Samples captured per channel so far.
    pub fn recording_length(&self) -> usize {
        self.recording_length
    }

    /// Number of capture callbacks accumulated.
    pub fn chunk_count(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Concatenate one channel's chunks into a buffer of `recording_length` samples.
    pub fn flatten(&self, channel: AudioChannel) -> Vec<f32> {
        channel_mixer::flatten(self.chunks(channel), self.recording_length)
    }

    /// Drop all chunks and zero the counter.
    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.recording_length = 0;
    }
}
