//! Block-average sample-rate conversion.
//!
//! Each output sample is the mean of the input samples that fall inside its
//! window `[round(j * ratio), round((j + 1) * ratio))`, where
//! `ratio = source_rate / target_rate`. This is an O(n) decimation filter, not
//! a band-limited resampler. Ratios below 1 go through the same formula; the
//! resulting empty windows produce silence.

use std::borrow::Cow;

/// Resample a mono (or already flattened) buffer.
///
/// Returns the input borrowed and untouched when the rates match. A zero rate
/// on either side yields an empty buffer.
pub fn downsample(buffer: &[f32], source_rate: u32, target_rate: u32) -> Cow<'_, [f32]> {
    if source_rate == target_rate {
        return Cow::Borrowed(buffer);
    }
    if source_rate == 0 || target_rate == 0 {
        return Cow::Owned(Vec::new());
    }

    let ratio = source_rate as f64 / target_rate as f64;
    Cow::Owned(block_average(buffer.len(), ratio, |i| buffer[i]))
}

/// Resample an interleaved buffer frame by frame.
///
/// Windows are computed over frames, so channels are averaged independently
/// and the output stays interleaved with the same channel count.
pub fn downsample_interleaved(
    buffer: &[f32],
    channels: usize,
    source_rate: u32,
    target_rate: u32,
) -> Cow<'_, [f32]> {
    if channels <= 1 {
        return downsample(buffer, source_rate, target_rate);
    }
    if source_rate == target_rate {
        return Cow::Borrowed(buffer);
    }
    if source_rate == 0 || target_rate == 0 {
        return Cow::Owned(Vec::new());
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let frame_count = buffer.len() / channels;
    let per_channel: Vec<Vec<f32>> = (0..channels)
        .map(|ch| block_average(frame_count, ratio, |frame| buffer[frame * channels + ch]))
        .collect();

    let output_frames = per_channel.first().map_or(0, Vec::len);
    let mut output = Vec::with_capacity(output_frames * channels);
    for frame in 0..output_frames {
        for channel in &per_channel {
            output.push(channel[frame]);
        }
    }
    Cow::Owned(output)
}

/// Expected output length for `input_len` samples converted at `source_rate → target_rate`.
pub fn output_length(input_len: usize, source_rate: u32, target_rate: u32) -> usize {
    if source_rate == target_rate {
        return input_len;
    }
    if source_rate == 0 || target_rate == 0 {
        return 0;
    }
    let ratio = source_rate as f64 / target_rate as f64;
    (input_len as f64 / ratio).round() as usize
}

fn block_average(input_len: usize, ratio: f64, sample_at: impl Fn(usize) -> f32) -> Vec<f32> {
    let output_len = (input_len as f64 / ratio).round() as usize;
    let mut output = Vec::with_capacity(output_len);
    let mut window_start = 0usize;

    for j in 0..output_len {
        let next = ((j + 1) as f64 * ratio).round() as usize;
        let end = next.min(input_len);
        let start = window_start.min(end);

        let count = end - start;
        let mean = if count == 0 {
            0.0
        } else {
            let sum: f64 = (start..end).map(|i| sample_at(i) as f64).sum();
            (sum / count as f64) as f32
        };
        output.push(mean);
        window_start = next;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn same_rate_is_borrowed_passthrough() {
        let samples = vec![0.1, -0.2, 0.3];

        let result = downsample(&samples, 44100, 44100);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, samples.as_slice());
    }

    #[test]
    fn halving_averages_pairs() {
        let samples = [0.0, 1.0, 0.5, 0.5, -1.0, 0.0];

        let result = downsample(&samples, 48000, 24000);

        assert_eq!(result.len(), 3);
        assert_relative_eq!(result[0], 0.5);
        assert_relative_eq!(result[1], 0.5);
        assert_relative_eq!(result[2], -0.5);
    }

    #[test]
    fn output_length_follows_rate_ratio() {
        for (len, source, target) in [(4096usize, 44100u32, 16000u32), (1000, 48000, 44100), (777, 44100, 8000)] {
            let samples = vec![0.0f32; len];
            let result = downsample(&samples, source, target);
            let expected = (len as f64 * target as f64 / source as f64).round() as i64;
            assert!((result.len() as i64 - expected).abs() <= 1, "len {} → {}", len, result.len());
            assert_eq!(result.len(), output_length(len, source, target));
        }
    }

    #[test]
    fn constant_buffer_stays_constant() {
        let samples = vec![0.25f32; 4410];

        let result = downsample(&samples, 44100, 16000);

        assert!(!result.is_empty());
        for &s in result.iter() {
            assert_relative_eq!(s, 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn non_integer_ratio_windows_cover_input() {
        // 3 → 2: ratio 1.5, windows [0,2) [2,3)
        let samples = [0.2, 0.4, 0.9];

        let result = downsample(&samples, 3, 2);

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0], 0.3, epsilon = 1e-6);
        assert_relative_eq!(result[1], 0.9, epsilon = 1e-6);
    }

    #[test]
    fn upsampling_fills_empty_windows_with_silence() {
        let samples = [1.0, 1.0];

        let result = downsample(&samples, 22050, 44100);

        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|s| s.is_finite()));
        assert!(result.contains(&0.0));
    }

    #[test]
    fn zero_rate_yields_empty() {
        assert!(downsample(&[1.0, 2.0], 0, 44100).is_empty());
        assert!(downsample(&[1.0, 2.0], 44100, 0).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(downsample(&[], 48000, 16000).is_empty());
    }

    #[test]
    fn interleaved_keeps_channels_apart() {
        // L is always 1.0, R always -1.0
        let stereo: Vec<f32> = (0..200).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

        let result = downsample_interleaved(&stereo, 2, 44100, 22050);

        assert_eq!(result.len(), 100);
        for frame in result.chunks(2) {
            assert_relative_eq!(frame[0], 1.0);
            assert_relative_eq!(frame[1], -1.0);
        }
    }

    #[test]
    fn interleaved_same_rate_is_borrowed() {
        let stereo = [0.1, 0.2, 0.3, 0.4];
        assert!(matches!(downsample_interleaved(&stereo, 2, 16000, 16000), Cow::Borrowed(_)));
    }

    #[test]
    fn interleaved_mono_matches_flat() {
        let samples: Vec<f32> = (0..50).map(|i| i as f32 / 50.0).collect();
        assert_eq!(
            downsample_interleaved(&samples, 1, 48000, 16000).into_owned(),
            downsample(&samples, 48000, 16000).into_owned()
        );
    }
}
