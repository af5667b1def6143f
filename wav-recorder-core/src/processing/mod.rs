pub mod accumulator;
pub mod channel_mixer;
pub mod resampler;
pub mod wav_format;
