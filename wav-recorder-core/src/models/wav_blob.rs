use sha2::{Digest, Sha256};

use crate::processing::wav_format::WAV_HEADER_SIZE;

/// A finished WAV file held in memory.
///
/// Produced once per `stop()`; immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBlob {
    bytes: Vec<u8>,
}

impl WavBlob {
    pub const MIME_TYPE: &'static str = "audio/wav";

    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    /// The PCM data region following the 44-byte header.
    pub fn pcm_data(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_SIZE.min(self.bytes.len())..]
    }

    /// Number of 16-bit samples in the data region.
    pub fn sample_count(&self) -> usize {
        self.pcm_data().len() / 2
    }

    /// SHA-256 hex digest of the whole file.
    pub fn checksum(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
