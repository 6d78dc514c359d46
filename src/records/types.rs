use crate::timestamp::RawTimestamp;
use std::path::PathBuf;

/// An original image file found in the local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRecord {
    /// File name within the originals directory
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Capture time as read from the file's metadata
    pub captured_at: RawTimestamp,
}

/// A photo in the remote album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub id: String,
    pub title: String,
    /// Capture time as reported by the listing service
    pub captured_at: RawTimestamp,
}

impl LocalRecord {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        captured_at: impl Into<RawTimestamp>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            captured_at: captured_at.into(),
        }
    }
}

impl RemoteRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        captured_at: impl Into<RawTimestamp>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            captured_at: captured_at.into(),
        }
    }
}
