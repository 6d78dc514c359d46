#![allow(dead_code)]

use async_trait::async_trait;
use flickr_renamer::config::{FlickrConfig, RenamerConfig};
use flickr_renamer::flickr::{RemoteError, RemoteListing, RemoteSource};
use flickr_renamer::records::{ExtractionError, MetadataExtractor, RemoteRecord};
use flickr_renamer::reconciliation::MalformedPolicy;
use flickr_renamer::timestamp::RawTimestamp;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;

/// Create a temporary directory for originals
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write a fake original file
pub fn write_original(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), name.as_bytes()).expect("Failed to write original");
}

/// Names of the files currently in `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Build a config pointing at `dir`
pub fn test_config(dir: &Path, dry_run: bool) -> RenamerConfig {
    RenamerConfig {
        flickr: FlickrConfig::new("test-key"),
        username: "someone".to_string(),
        set_id: "72157".to_string(),
        originals_dir: dir.to_path_buf(),
        dry_run,
        malformed_policy: MalformedPolicy::Abort,
    }
}

/// Extractor answering from a fixed file-name -> timestamp table
pub struct FixedExtractor {
    dates: HashMap<String, String>,
}

impl FixedExtractor {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            dates: entries
                .iter()
                .map(|(name, date)| (name.to_string(), date.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl MetadataExtractor for FixedExtractor {
    async fn captured_at(&self, path: &Path) -> Result<RawTimestamp, ExtractionError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.dates
            .get(&name)
            .map(|d| RawTimestamp::new(d.clone()))
            .ok_or(ExtractionError::MissingCaptureDate)
    }
}

/// Remote source returning a canned listing, or a canned API failure
pub enum StaticRemote {
    Listing(RemoteListing),
    Fail(String),
}

impl StaticRemote {
    pub fn with_records(records: Vec<RemoteRecord>) -> Self {
        let total = records.len() as u32;
        Self::Listing(RemoteListing {
            set_title: "Test set".to_string(),
            total,
            per_page: 500,
            records,
        })
    }
}

#[async_trait]
impl RemoteSource for StaticRemote {
    async fn fetch_listing(
        &self,
        _username: &str,
        _set_id: &str,
        _per_page: Option<u32>,
    ) -> Result<RemoteListing, RemoteError> {
        match self {
            StaticRemote::Listing(listing) => Ok(listing.clone()),
            StaticRemote::Fail(message) => Err(RemoteError::Api {
                message: message.clone(),
            }),
        }
    }
}

/// Log lines written by the subscriber installed with [`capture_logs`]
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route log output on the current thread into a buffer until the guard drops
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
