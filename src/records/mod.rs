mod extractor;
mod scan;
mod types;

pub use extractor::{ExifExtractor, ExtractionError, MetadataExtractor};
pub use scan::{list_originals, scan_originals, ScanError};
pub use types::{LocalRecord, RemoteRecord};
