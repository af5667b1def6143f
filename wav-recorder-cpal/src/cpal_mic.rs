//! cpal microphone capture provider.
//!
//! Opens an input stream on a dedicated thread (cpal streams are not `Send`
//! on every platform) and regroups device buffers into fixed-size
//! per-channel chunks before handing them to the recording session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use parking_lot::Mutex;

use wav_recorder_core::models::audio_models::AudioSource;
use wav_recorder_core::models::error::RecorderError;
use wav_recorder_core::traits::capture_provider::{CaptureProvider, ChunkCallback};

use crate::chunk_assembler::ChunkAssembler;
use crate::device_enumerator::{self, DeviceEnumerator};

/// Microphone capture through the platform's default cpal host.
pub struct CpalMicCapture {
    device_name: Option<String>,
    source: Option<AudioSource>,
    running: Arc<AtomicBool>,
    capture_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl CpalMicCapture {
    /// Create a capture for the system default microphone.
    pub fn default_device() -> Self {
        Self {
            device_name: None,
            source: None,
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }

    /// Create a capture for a specific microphone by device name.
    pub fn with_device(name: String) -> Self {
        Self {
            device_name: Some(name),
            source: None,
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }

    fn join_capture_thread(&self) {
        if let Some(handle) = self.capture_handle.lock().take() {
            if handle.join().is_err() {
                log::error!("Mic capture thread panicked");
            }
        }
    }
}

impl CaptureProvider for CpalMicCapture {
    fn is_available(&self) -> bool {
        let enumerator = DeviceEnumerator::new();
        match self.device_name {
            Some(ref name) => enumerator.find_capture_device(name).is_ok(),
            None => enumerator.default_capture_device().is_some(),
        }
    }

    fn acquire(&mut self, chunk_size: usize, callback: ChunkCallback) -> Result<(), RecorderError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(RecorderError::InvalidState("mic capture already running".into()));
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let device_name = self.device_name.clone();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let handle = thread::Builder::new()
            .name("cpal-mic-capture".into())
            .spawn(move || {
                mic_capture_loop(running.clone(), device_name, chunk_size, callback, ready_tx);
                running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                RecorderError::Device(format!("failed to spawn mic thread: {}", e))
            })?;
        *self.capture_handle.lock() = Some(handle);

        match ready_rx.recv() {
            Ok(Ok(source)) => {
                log::info!(
                    "Opened {} ({} ch @ {} Hz)",
                    source.name,
                    source.channels,
                    source.sample_rate
                );
                self.source = Some(source);
                Ok(())
            }
            Ok(Err(e)) => {
                self.running.store(false, Ordering::SeqCst);
                self.join_capture_thread();
                Err(e)
            }
            Err(_) => {
                self.running.store(false, Ordering::SeqCst);
                self.join_capture_thread();
                Err(RecorderError::Device("mic capture thread exited before opening the device".into()))
            }
        }
    }

    fn release(&mut self) -> Result<(), RecorderError> {
        self.running.store(false, Ordering::SeqCst);
        self.join_capture_thread();
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.source.as_ref().map_or(0, |s| s.sample_rate)
    }

    fn device_info(&self) -> AudioSource {
        self.source.clone().unwrap_or_else(|| AudioSource {
            id: self.device_name.clone().unwrap_or_else(|| "default-mic".into()),
            name: self.device_name.clone().unwrap_or_else(|| "Default Microphone".into()),
            is_default: self.device_name.is_none(),
            channels: 0,
            sample_rate: 0,
        })
    }
}

impl Drop for CpalMicCapture {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.join_capture_thread();
    }
}

/// Capture loop running on a dedicated thread.
///
/// Reports the open result through `ready`, then keeps the stream alive
/// until `running` is cleared.
fn mic_capture_loop(
    running: Arc<AtomicBool>,
    device_name: Option<String>,
    chunk_size: usize,
    callback: ChunkCallback,
    ready: mpsc::SyncSender<Result<AudioSource, RecorderError>>,
) {
    let stream = match open_stream(device_name.as_deref(), chunk_size, callback) {
        Ok((stream, source)) => {
            let _ = ready.send(Ok(source));
            stream
        }
        Err(e) => {
            log::error!("Mic capture error: {}", e);
            let _ = ready.send(Err(e));
            return;
        }
    };

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(10));
    }

    if let Err(e) = stream.pause() {
        log::warn!("Failed to pause input stream: {}", e);
    }
    drop(stream);
    log::debug!("Mic capture stopped");
}

fn open_stream(
    device_name: Option<&str>,
    chunk_size: usize,
    callback: ChunkCallback,
) -> Result<(cpal::Stream, AudioSource), RecorderError> {
    let enumerator = DeviceEnumerator::new();
    let default_name = enumerator.default_capture_device().and_then(|d| d.name().ok());
    let device = match device_name {
        Some(name) => enumerator.find_capture_device(name)?,
        None => enumerator
            .default_capture_device()
            .ok_or(RecorderError::DeviceNotAvailable)?,
    };

    let supported = device.default_input_config().map_err(|e| match e {
        cpal::DefaultStreamConfigError::DeviceNotAvailable => RecorderError::DeviceNotAvailable,
        other => RecorderError::Device(format!("failed to query input config: {}", other)),
    })?;
    let source = device_enumerator::describe(&device, default_name.as_deref())
        .ok_or_else(|| RecorderError::Device("input device disappeared while opening".into()))?;

    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    let assembler = Arc::new(Mutex::new(ChunkAssembler::new(chunk_size, config.channels)));

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, assembler, callback),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, assembler, callback),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, assembler, callback),
        cpal::SampleFormat::I8 => build_stream::<i8>(&device, &config, assembler, callback),
        cpal::SampleFormat::I32 => build_stream::<i32>(&device, &config, assembler, callback),
        cpal::SampleFormat::I64 => build_stream::<i64>(&device, &config, assembler, callback),
        cpal::SampleFormat::U8 => build_stream::<u8>(&device, &config, assembler, callback),
        cpal::SampleFormat::U32 => build_stream::<u32>(&device, &config, assembler, callback),
        cpal::SampleFormat::U64 => build_stream::<u64>(&device, &config, assembler, callback),
        cpal::SampleFormat::F64 => build_stream::<f64>(&device, &config, assembler, callback),
        other => {
            return Err(RecorderError::Device(format!("unsupported sample format: {:?}", other)));
        }
    }
    .map_err(|e| match e {
        cpal::BuildStreamError::DeviceNotAvailable => RecorderError::DeviceNotAvailable,
        other => RecorderError::Device(format!("failed to build input stream: {}", other)),
    })?;

    stream
        .play()
        .map_err(|e| RecorderError::Device(format!("failed to start input stream: {}", e)))?;

    Ok((stream, source))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    assembler: Arc<Mutex<ChunkAssembler>>,
    callback: ChunkCallback,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut converted: Vec<f32> = Vec::new();
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            convert_samples(data, &mut converted);
            assembler.lock().push_interleaved(&converted, |left, right| callback(left, right));
        },
        |err: cpal::StreamError| {
            log::error!("cpal stream error: {}", err);
        },
        None,
    )
}

/// Convert device samples of any cpal format into normalized f32, reusing `out`.
fn convert_samples<T>(data: &[T], out: &mut Vec<f32>)
where
    T: Sample,
    f32: FromSample<T>,
{
    out.clear();
    out.extend(data.iter().map(|&s| s.to_sample::<f32>()));
}
