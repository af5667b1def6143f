//! Record from a microphone for a fixed duration and save a WAV file.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use wav_recorder_core::{
    save_blob, save_blob_as, PcmQuantization, RecorderError, RecordingConfig, RecordingDelegate,
    RecordingSession, RecordingState, WavBlob,
};
use wav_recorder_cpal::{CpalMicCapture, DeviceEnumerator};

#[derive(Parser, Debug)]
#[command(name = "wav-record", version, about = "Record microphone audio to a WAV file")]
struct Args {
    /// List input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Input device name (default: system default microphone)
    #[arg(long)]
    device: Option<String>,

    /// JSON recording config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record a single channel
    #[arg(long)]
    mono: bool,

    /// Target sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Samples per channel per capture chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Saturate out-of-range samples instead of wrapping
    #[arg(long)]
    clamp: bool,

    /// Recording duration in seconds
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Directory for the timestamp-named output file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Explicit output path (overrides --out-dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Logs session events and counts captured chunks.
#[derive(Default)]
struct ConsoleDelegate {
    chunks: AtomicUsize,
}

impl RecordingDelegate for ConsoleDelegate {
    fn on_state_changed(&self, state: RecordingState) {
        log::info!("State: {}", state.as_str());
    }

    fn on_data(&self, samples: &[f32]) {
        let count = self.chunks.fetch_add(1, Ordering::Relaxed) + 1;
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        log::trace!("Chunk {}: peak {:.3}", count, peak);
    }

    fn on_error(&self, error: &RecorderError) {
        log::error!("Recorder error: {}", error);
    }

    fn on_recording_finished(&self, blob: &WavBlob) {
        log::info!(
            "Recording finished: {} chunks, {} bytes",
            self.chunks.load(Ordering::Relaxed),
            blob.len()
        );
    }
}

fn build_config(args: &Args) -> Result<RecordingConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            RecordingConfig::from_json(&json)?
        }
        None => RecordingConfig::default(),
    };
    if args.mono {
        config.channel_count = 1;
    }
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(size) = args.chunk_size {
        config.chunk_size = size;
    }
    if args.clamp {
        config.quantization = PcmQuantization::Clamp;
    }
    config.validate()?;
    Ok(config)
}

fn recording_duration(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds <= 0.0 {
        bail!("--seconds must be a positive, finite number");
    }
    Duration::try_from_secs_f64(seconds).context("--seconds is out of range")
}

fn list_devices() -> Result<()> {
    let devices = DeviceEnumerator::new().list_capture_devices()?;
    if devices.is_empty() {
        println!("No input devices found");
    }
    for device in devices {
        let marker = if device.is_default { "*" } else { " " };
        println!("{} {} ({} ch @ {} Hz)", marker, device.name, device.channels, device.sample_rate);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_devices {
        return list_devices();
    }
    let duration = recording_duration(args.seconds)?;

    let config = build_config(&args)?;
    let mic = match args.device {
        Some(ref name) => CpalMicCapture::with_device(name.clone()),
        None => CpalMicCapture::default_device(),
    };

    let mut session = RecordingSession::new(mic, config)?;
    session.set_delegate(Arc::new(ConsoleDelegate::default()));

    session.start().context("starting capture")?;
    log::info!("Recording for {:.1}s", args.seconds);
    thread::sleep(duration);

    let blob = session.stop()?;
    let saved = match args.output {
        Some(ref path) => save_blob_as(blob, path)?,
        None => save_blob(blob, &args.out_dir)?,
    };

    println!("{}", saved.file_path.display());
    log::info!("sha256 {}", saved.checksum);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["wav-record", "--mono", "--sample-rate", "16000", "--clamp"]);

        let config = build_config(&args).unwrap();

        assert_eq!(config.channel_count, 1);
        assert_eq!(config.sample_rate, 16000);
        assert_eq!(config.chunk_size, 2048);
        assert_eq!(config.quantization, PcmQuantization::Clamp);
    }

    #[test]
    fn invalid_chunk_size_is_rejected() {
        let args = Args::parse_from(["wav-record", "--chunk-size", "0"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn duration_rejects_non_finite_and_huge_values() {
        assert!(recording_duration(f64::INFINITY).is_err());
        assert!(recording_duration(f64::NAN).is_err());
        assert!(recording_duration(-1.0).is_err());
        assert!(recording_duration(0.0).is_err());
        assert!(recording_duration(1e30).is_err());
        assert_eq!(recording_duration(2.5).unwrap(), Duration::from_millis(2500));
    }

    #[test]
    fn default_duration() {
        let args = Args::parse_from(["wav-record"]);
        assert_eq!(args.seconds, 5.0);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }
}
