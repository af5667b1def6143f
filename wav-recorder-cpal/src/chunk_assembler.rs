/// Regroups interleaved device buffers into fixed-size per-channel chunks.
///
/// cpal delivers whatever buffer size the host picks; the recording core
/// expects exactly `chunk_size` samples per channel per callback. Frames are
/// split into left/right (mono devices feed both sides) and held until a
/// full chunk is available. A trailing partial chunk is never emitted.
#[derive(Debug)]
pub struct ChunkAssembler {
    chunk_size: usize,
    device_channels: usize,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl ChunkAssembler {
    pub fn new(chunk_size: usize, device_channels: u16) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            device_channels: (device_channels as usize).max(1),
            left: Vec::with_capacity(chunk_size),
            right: Vec::with_capacity(chunk_size),
        }
    }

    /// Feed interleaved samples, calling `emit(left, right)` for every completed chunk.
    ///
    /// Channels beyond the second are ignored.
    pub fn push_interleaved(&mut self, data: &[f32], mut emit: impl FnMut(&[f32], &[f32])) {
        for frame in data.chunks_exact(self.device_channels) {
            let left = frame[0];
            let right = if self.device_channels >= 2 { frame[1] } else { frame[0] };
            self.left.push(left);
            self.right.push(right);

            if self.left.len() == self.chunk_size {
                emit(&self.left, &self.right);
                self.left.clear();
                self.right.clear();
            }
        }
    }

    /// Samples per channel waiting for the next full chunk.
    pub fn pending(&self) -> usize {
        self.left.len()
    }

    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}
