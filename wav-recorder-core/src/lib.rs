//! # wav-recorder-core
//!
//! Platform-agnostic microphone recording core.
//!
//! Accumulates per-channel chunks from a capture device and, when recording
//! stops, turns them into a single WAV file. Platform backends implement the
//! `CaptureProvider` trait and plug into the generic `RecordingSession`.
//!
//! ## Architecture
//!
//! ```text
//! wav-recorder-core (this crate)
//! ├── traits/       ← CaptureProvider, RecordingDelegate
//! ├── models/       ← RecorderError, RecordingState, RecordingConfig, WavBlob
//! ├── processing/   ← SampleAccumulator, flatten/interleave, resampler, WAV encoding
//! ├── session/      ← RecordingSession (idle → capturing → stopped)
//! └── storage/      ← timestamped download of the finished blob
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{AudioChannel, AudioChunk, AudioSource};
pub use models::config::{PcmQuantization, RecordingConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE};
pub use models::error::RecorderError;
pub use models::state::RecordingState;
pub use models::wav_blob::WavBlob;
pub use processing::accumulator::SampleAccumulator;
pub use processing::channel_mixer::{flatten, interleave};
pub use processing::resampler::{downsample, downsample_interleaved};
pub use processing::wav_format::encode_wav;
pub use session::recording::RecordingSession;
pub use storage::download::{save_blob, save_blob_as, SavedRecording};
pub use traits::capture_provider::{CaptureProvider, ChunkCallback};
pub use traits::recording_delegate::RecordingDelegate;
