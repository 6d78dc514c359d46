use super::extractor::{ExtractionError, MetadataExtractor};
use super::types::LocalRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Originals directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to list originals directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Metadata extraction failed for {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },
}

/// List the files directly inside the originals directory.
///
/// Entries are sorted by file name. Subdirectories and hidden files are
/// skipped. Symlinks to regular files are listed under the link's own path;
/// dangling links are skipped.
pub fn list_originals(originals_dir: &Path) -> Result<Vec<(String, PathBuf)>, ScanError> {
    if !originals_dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(originals_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(originals_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // `path().is_file()` resolves symlinks, `file_type()` does not.
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            debug!(file = %name, "Skipping hidden file");
            continue;
        }

        files.push((name, entry.into_path()));
    }

    Ok(files)
}

/// Build a [`LocalRecord`] for every original in the directory.
///
/// Extraction runs concurrently, one task per file. The returned records
/// keep directory-listing order. The first extraction failure fails the
/// whole scan and cancels any extractions still running.
pub async fn scan_originals(
    originals_dir: &Path,
    extractor: Arc<dyn MetadataExtractor>,
) -> Result<Vec<LocalRecord>, ScanError> {
    let files = list_originals(originals_dir)?;

    let handles: Vec<(String, PathBuf, JoinHandle<_>)> = files
        .into_iter()
        .map(|(name, path)| {
            let extractor = Arc::clone(&extractor);
            let task_path = path.clone();
            let handle = tokio::spawn(async move { extractor.captured_at(&task_path).await });
            (name, path, handle)
        })
        .collect();

    let mut records = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();

    while let Some((name, path, handle)) = pending.next() {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(ExtractionError::TaskFailed(e.to_string())),
        };

        match outcome {
            Ok(captured_at) => records.push(LocalRecord {
                name,
                path,
                captured_at,
            }),
            Err(source) => {
                for (_, _, rest) in pending.by_ref() {
                    rest.abort();
                }
                return Err(ScanError::Extraction { path, source });
            }
        }
    }

    Ok(records)
}
