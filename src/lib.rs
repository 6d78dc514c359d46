pub mod config;
pub mod flickr;
pub mod pipeline;
pub mod reconciliation;
pub mod records;
pub mod timestamp;

// Re-export commonly used types
pub use config::{read_config, ConfigError, ConfigOverrides, FileConfig, FlickrConfig, RenamerConfig};
pub use flickr::{fetch_remote_records, FlickrClient, RemoteError, RemoteListing, RemoteSource};
pub use pipeline::{run, PipelineError, RunSummary};
pub use reconciliation::{
    apply_renames, plan_renames, reconcile, MalformedPolicy, MatchResult, Reconciliation,
    ReconcileError, RenameError, RenamePlan, RenameReport,
};
pub use records::{
    scan_originals, ExifExtractor, ExtractionError, LocalRecord, MetadataExtractor, RemoteRecord,
    ScanError,
};
pub use timestamp::{
    normalize, normalize_remote, CanonicalTimestamp, RawTimestamp, TimestampError, TimestampFormat,
};
