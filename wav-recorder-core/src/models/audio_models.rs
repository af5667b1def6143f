/// One capture callback's worth of samples for a single channel.
///
/// Samples are `f32` in `[-1.0, 1.0]`. Immutable once produced.
pub type AudioChunk = Box<[f32]>;

/// Index of a channel inside the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Left,
    Right,
}

/// An input device available for capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    /// Native channel count reported by the device.
    pub channels: u16,
    /// Native sample rate reported by the device, in Hz.
    pub sample_rate: u32,
}
