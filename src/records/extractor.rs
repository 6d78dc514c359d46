use crate::timestamp::RawTimestamp;
use async_trait::async_trait;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("EXIF error: {0}")]
    ExifError(String),

    #[error("No capture date in metadata")]
    MissingCaptureDate,

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

/// Reads the capture time embedded in a local file.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn captured_at(&self, path: &Path) -> Result<RawTimestamp, ExtractionError>;
}

/// Extractor backed by the file's EXIF block.
///
/// Prefers `DateTimeOriginal` and falls back to `DateTime`. The raw ASCII
/// value is returned untouched so the caller sees the `YYYY:MM:DD` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifExtractor;

#[async_trait]
impl MetadataExtractor for ExifExtractor {
    async fn captured_at(&self, path: &Path) -> Result<RawTimestamp, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_exif_date(&path))
            .await
            .map_err(|e| ExtractionError::TaskFailed(e.to_string()))?
    }
}

fn read_exif_date(path: &Path) -> Result<RawTimestamp, ExtractionError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| ExtractionError::ExifError(e.to_string()))?;

    exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))
        .and_then(|field| ascii_value(&field.value))
        .map(RawTimestamp::new)
        .ok_or(ExtractionError::MissingCaptureDate)
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim_end_matches('\0').trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}
