//! # wav-recorder-cpal
//!
//! Cross-platform microphone backend for wav-recorder, built on cpal.
//!
//! Provides:
//! - `CpalMicCapture`: `CaptureProvider` over a cpal input stream
//! - `DeviceEnumerator`: input device listing
//! - `ChunkAssembler`: regroups device buffers into fixed-size chunks
//!
//! ## Usage
//! ```ignore
//! use wav_recorder_core::{RecordingConfig, RecordingSession};
//! use wav_recorder_cpal::CpalMicCapture;
//!
//! let mic = CpalMicCapture::default_device();
//! let mut session = RecordingSession::new(mic, RecordingConfig::default())?;
//! session.start()?;
//! // ...
//! let blob = session.stop()?;
//! ```

pub mod chunk_assembler;
pub mod cpal_mic;
pub mod device_enumerator;

pub use chunk_assembler::ChunkAssembler;
pub use cpal_mic::CpalMicCapture;
pub use device_enumerator::DeviceEnumerator;
