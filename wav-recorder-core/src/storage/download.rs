use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::error::RecorderError;
use crate::models::wav_blob::WavBlob;

/// A WAV blob written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecording {
    pub file_path: PathBuf,
    pub size_bytes: u64,
    pub mime_type: String,
    /// SHA-256 hex digest of the file contents.
    pub checksum: String,
    pub created_at: String,
}

/// File name for a recording created at `timestamp`: `<ISO-8601>.wav`,
/// e.g. `2024-05-01T09:30:00.000Z.wav`.
pub fn recording_file_name(timestamp: DateTime<Utc>) -> String {
    format!("{}.wav", timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Write `blob` into `directory` under a timestamped name.
///
/// Creates the directory if needed.
pub fn save_blob(blob: &WavBlob, directory: &Path) -> Result<SavedRecording, RecorderError> {
    let now = Utc::now();
    let path = directory.join(recording_file_name(now));
    write_blob(blob, &path, now)
}

/// Write `blob` to an explicit path.
pub fn save_blob_as(blob: &WavBlob, path: &Path) -> Result<SavedRecording, RecorderError> {
    write_blob(blob, path, Utc::now())
}

fn write_blob(blob: &WavBlob, path: &Path, created_at: DateTime<Utc>) -> Result<SavedRecording, RecorderError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;
        }
    }

    fs::write(path, blob.as_bytes())
        .map_err(|e| RecorderError::StorageError(format!("failed to write {}: {}", path.display(), e)))?;

    log::info!("Saved {} bytes to {}", blob.len(), path.display());

    Ok(SavedRecording {
        file_path: path.to_path_buf(),
        size_bytes: blob.len() as u64,
        mime_type: blob.mime_type().to_string(),
        checksum: blob.checksum(),
        created_at: created_at.to_rfc3339(),
    })
}
