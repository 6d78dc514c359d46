//! One renaming run: fetch the album, scan the originals, reconcile, rename.
//!
//! Failures before the rename phase stop the run. Rename failures are
//! collected in the [`RenameReport`] and never stop it.

use crate::config::RenamerConfig;
use crate::flickr::{RemoteError, RemoteSource};
use crate::records::{scan_originals, LocalRecord, MetadataExtractor, ScanError};
use crate::reconciliation::{
    apply_renames, plan_renames, reconcile, ReconcileError, RenamePlan, RenameReport,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Fetching remote album failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Reading originals failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunSummary {
    pub set_title: String,
    pub local_count: usize,
    pub remote_count: usize,
    /// Whether the remote set had more photos than the fetched page
    pub truncated: bool,
    /// Whether the number of originals differed from the fetched photos
    pub count_mismatch: bool,
    pub unmatched: Vec<LocalRecord>,
    pub plans: Vec<RenamePlan>,
    pub report: RenameReport,
}

/// Run the whole pipeline with the given collaborators.
pub async fn run(
    config: &RenamerConfig,
    remote: &dyn RemoteSource,
    extractor: Arc<dyn MetadataExtractor>,
) -> Result<RunSummary, PipelineError> {
    let listing = remote
        .fetch_listing(&config.username, &config.set_id, config.flickr.per_page)
        .await?;

    let truncated = listing.is_truncated();
    if truncated {
        warn!(
            total = listing.total,
            per_page = listing.per_page,
            "Acting on first {} photos only",
            listing.per_page
        );
    }

    let locals = scan_originals(&config.originals_dir, extractor).await?;

    let count_mismatch = locals.len() != listing.records.len();
    if count_mismatch {
        warn!(
            "Number on Flickr ({}) doesn't match number of originals ({}). Maybe some aren't public?",
            listing.records.len(),
            locals.len()
        );
    }

    let reconciliation = reconcile(&locals, &listing.records, config.malformed_policy)?;

    if !reconciliation.unmatched.is_empty() {
        warn!(
            "No match found on Flickr for {} originals:",
            reconciliation.unmatched.len()
        );
        for original in &reconciliation.unmatched {
            warn!("  {}", original.name);
        }
    }

    let plans = plan_renames(&reconciliation.matches);
    let report = apply_renames(&plans, config.dry_run).await;

    info!(
        renamed = report.renamed.len(),
        dry_run = report.dry_run.len(),
        unchanged = report.unchanged.len(),
        failed = report.failed.len(),
        "Rename phase finished"
    );

    Ok(RunSummary {
        set_title: listing.set_title,
        local_count: locals.len(),
        remote_count: listing.records.len(),
        truncated,
        count_mismatch,
        unmatched: reconciliation.unmatched,
        plans,
        report,
    })
}
