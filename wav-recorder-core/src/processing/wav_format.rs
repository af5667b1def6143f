//! WAV serialization.
//!
//! Produces a canonical 44-byte RIFF header followed by 16-bit little-endian
//! PCM data.

use crate::models::config::{PcmQuantization, RecordingConfig};
use crate::models::wav_blob::WavBlob;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bits per encoded sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Block align written to the header. Fixed at 4 regardless of channel count,
/// matching files produced by earlier versions of the recorder.
pub const BLOCK_ALIGN: u16 = 4;

/// Generate a 44-byte WAV RIFF header.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * 2
/// [32-33]  block_align (4)
/// [34-35]  16
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(sample_rate: u32, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let byte_rate = sample_rate
        .saturating_mul(channels as u32)
        .saturating_mul((BITS_PER_SAMPLE / 8) as u32);
    let chunk_size = data_size.saturating_add(36);

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Convert one float sample to 16-bit PCM as `round(sample * 32767)`.
///
/// With `Wrap`, values outside `[-1.0, 1.0]` wrap modulo 2^16 over the
/// whole finite f32 range. NaN encodes as 0 in both modes; infinities encode
/// as 0 with `Wrap` and saturate with `Clamp`.
pub fn quantize_sample(sample: f32, mode: PcmQuantization) -> i16 {
    let scaled = (sample * i16::MAX as f32).round();
    match mode {
        // rem_euclid of a non-finite value is NaN, which casts to 0.
        PcmQuantization::Wrap => (scaled as f64).rem_euclid(65536.0) as u16 as i16,
        PcmQuantization::Clamp => scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16,
    }
}

/// Convert f32 samples to 16-bit PCM little-endian bytes.
///
/// Output length = `samples.len() * 2` bytes.
pub fn convert_to_int16_pcm(samples: &[f32], mode: PcmQuantization) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        data.extend_from_slice(&quantize_sample(sample, mode).to_le_bytes());
    }
    data
}

/// Encode a float buffer as a complete WAV file using `config`'s format.
///
/// `samples` must already be at `config.sample_rate` and interleaved to
/// `config.channel_count`.
pub fn encode_wav(samples: &[f32], config: &RecordingConfig) -> WavBlob {
    let data_size = (samples.len() * 2) as u32;
    let header = generate_wav_header(config.sample_rate, config.channel_count, data_size);

    let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + samples.len() * 2);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&convert_to_int16_pcm(samples, config.quantization));
    WavBlob::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    #[test]
    fn header_size_is_44_bytes() {
        let header = generate_wav_header(44100, 2, 0);
        assert_eq!(header.len(), 44);
    }

    #[test]
    fn header_riff_magic() {
        let header = generate_wav_header(44100, 2, 0);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(&header[36..40], b"data");
    }

    #[test]
    fn header_44khz_stereo() {
        let header = generate_wav_header(44100, 2, 8192);

        assert_eq!(read_u32(&header, 4), 36 + 8192);
        assert_eq!(read_u32(&header, 16), 16);
        assert_eq!(read_u16(&header, 20), 1);
        assert_eq!(read_u16(&header, 22), 2);
        assert_eq!(read_u32(&header, 24), 44100);
        assert_eq!(read_u32(&header, 28), 176400);
        assert_eq!(read_u16(&header, 32), 4);
        assert_eq!(read_u16(&header, 34), 16);
        assert_eq!(read_u32(&header, 40), 8192);
    }

    #[test]
    fn block_align_is_fixed_for_mono() {
        let header = generate_wav_header(16000, 1, 0);
        assert_eq!(read_u16(&header, 32), 4);
        assert_eq!(read_u32(&header, 28), 32000); // 16000 * 1 * 2
    }

    #[test]
    fn mono_header_reports_sample_count() {
        let samples = vec![0.0f32; 1000];

        let blob = encode_wav(&samples, &RecordingConfig::mono());
        let bytes = blob.as_bytes();

        assert_eq!(read_u32(bytes, 40), 2000);
        assert_eq!(read_u16(bytes, 22), 1);
        assert_eq!(read_u32(bytes, 24), 44100);
        assert_eq!(bytes.len(), 44 + 2000);
    }

    #[test]
    fn encodes_known_samples() {
        let samples = [0.0f32, 0.5, -0.5, 1.0];

        let blob = encode_wav(&samples, &RecordingConfig::mono());
        let bytes = blob.as_bytes();

        assert_eq!(bytes.len(), 52);
        let pcm: Vec<i16> = bytes[44..]
            .chunks(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(pcm[0], 0);
        assert!(pcm[1] == 16383 || pcm[1] == 16384);
        assert_eq!(pcm[2], -16384);
        assert_eq!(pcm[3], 32767);
    }

    #[test]
    fn wrap_mode_overflows_out_of_range() {
        // 1.5 * 32767 = 49150.5 → 49151 → wraps to 49151 - 65536
        assert_eq!(quantize_sample(1.5, PcmQuantization::Wrap), (49151 - 65536) as i16);
        assert_eq!(quantize_sample(-1.0, PcmQuantization::Wrap), -32767);
    }

    #[test]
    fn wrap_mode_stays_modular_past_i32_range() {
        // 131072 * 32767 = 32767 * 2^17, a multiple of 2^16
        assert_eq!(quantize_sample(131072.0, PcmQuantization::Wrap), 0);
        assert_eq!(quantize_sample(-131072.0, PcmQuantization::Wrap), 0);
        // 2.0 * 32767 = 65534 → -2
        assert_eq!(quantize_sample(2.0, PcmQuantization::Wrap), -2);
        assert_eq!(quantize_sample(-2.0, PcmQuantization::Wrap), 2);
        assert_eq!(quantize_sample(f32::INFINITY, PcmQuantization::Wrap), 0);
        assert_eq!(quantize_sample(f32::NEG_INFINITY, PcmQuantization::Wrap), 0);
    }

    #[test]
    fn header_does_not_overflow_on_large_rate() {
        let header = generate_wav_header(3_000_000_000, 2, u32::MAX);
        assert_eq!(read_u32(&header, 28), u32::MAX);
        assert_eq!(read_u32(&header, 4), u32::MAX);
    }

    #[test]
    fn clamp_mode_saturates() {
        assert_eq!(quantize_sample(1.5, PcmQuantization::Clamp), i16::MAX);
        assert_eq!(quantize_sample(-3.0, PcmQuantization::Clamp), i16::MIN);
        assert_eq!(quantize_sample(0.5, PcmQuantization::Clamp), 16384);
    }

    #[test]
    fn nan_encodes_as_silence() {
        assert_eq!(quantize_sample(f32::NAN, PcmQuantization::Wrap), 0);
        assert_eq!(quantize_sample(f32::NAN, PcmQuantization::Clamp), 0);
    }

    #[test]
    fn convert_to_int16_pcm_length() {
        let pcm = convert_to_int16_pcm(&[0.0, 1.0, -1.0, 0.25], PcmQuantization::Wrap);
        assert_eq!(pcm.len(), 8);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), i16::MAX);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let blob = encode_wav(&[], &RecordingConfig::default());
        assert_eq!(blob.len(), WAV_HEADER_SIZE);
        assert_eq!(read_u32(blob.as_bytes(), 4), 36);
        assert_eq!(blob.sample_count(), 0);
    }
}
