/// Concatenate ordered chunks into one zero-initialised buffer of `total_length` samples.
///
/// Chunk `i` starts at the sum of the lengths of chunks `0..i`. If the chunks
/// hold fewer samples than `total_length` the tail stays silent; if they hold
/// more, the copy is truncated.
pub fn flatten<C: AsRef<[f32]>>(chunks: &[C], total_length: usize) -> Vec<f32> {
    let mut flat = vec![0.0f32; total_length];
    let mut offset = 0;
    for chunk in chunks {
        if offset >= total_length {
            break;
        }
        let chunk = chunk.as_ref();
        let end = (offset + chunk.len()).min(total_length);
        flat[offset..end].copy_from_slice(&chunk[..end - offset]);
        offset += chunk.len();
    }
    flat
}

/// Interleave two mono channels into stereo `[L0, R0, L1, R1, ...]`.
///
/// Output length is `left.len() + right.len()`. Channels are expected to be
/// the same length; with unequal input the missing side reads as silence and
/// frames that no longer fit are dropped.
pub fn interleave(left: &[f32], right: &[f32]) -> Vec<f32> {
    let frame_count = left.len().max(right.len());
    let mut stereo = vec![0.0f32; left.len() + right.len()];
    for i in 0..frame_count {
        if i * 2 < stereo.len() {
            stereo[i * 2] = left.get(i).copied().unwrap_or(0.0);
        }
        if i * 2 + 1 < stereo.len() {
            stereo[i * 2 + 1] = right.get(i).copied().unwrap_or(0.0);
        }
    }
    stereo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_concatenates_in_order() {
        let chunks = vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0, 6.0]];

        let flat = flatten(&chunks, 6);

        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn flatten_pads_short_input_with_silence() {
        let chunks = vec![vec![1.0, 2.0]];

        let flat = flatten(&chunks, 4);

        assert_eq!(flat, vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn flatten_truncates_long_input() {
        let chunks = vec![vec![1.0, 2.0], vec![3.0, 4.0]];

        let flat = flatten(&chunks, 3);

        assert_eq!(flat, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn flatten_empty() {
        let chunks: Vec<Vec<f32>> = Vec::new();
        assert!(flatten(&chunks, 0).is_empty());
        assert_eq!(flatten(&chunks, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn flatten_accepts_boxed_chunks() {
        let chunks: Vec<Box<[f32]>> = vec![vec![0.5; 2048].into(), vec![-0.5; 2048].into()];

        let flat = flatten(&chunks, 4096);

        assert_eq!(flat.len(), 4096);
        assert_eq!(flat[2047], 0.5);
        assert_eq!(flat[2048], -0.5);
    }

    #[test]
    fn interleave_basic() {
        let left = [1.0, 2.0, 3.0];
        let right = [4.0, 5.0, 6.0];

        let result = interleave(&left, &right);

        assert_eq!(result, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn interleave_length_is_sum_of_inputs() {
        let left = vec![0.1f32; 2048];
        let right = vec![0.2f32; 2048];

        assert_eq!(interleave(&left, &right).len(), 4096);
    }

    #[test]
    fn interleave_keeps_right_channel() {
        let result = interleave(&[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(result[1], 1.0);
        assert_eq!(result[3], 1.0);
    }

    #[test]
    fn interleave_unequal_lengths() {
        let result = interleave(&[1.0, 2.0], &[4.0]);

        assert_eq!(result.len(), 3);
        assert_eq!(result, vec![1.0, 4.0, 2.0]);
    }

    #[test]
    fn interleave_empty_inputs() {
        assert!(interleave(&[], &[]).is_empty());
    }
}
