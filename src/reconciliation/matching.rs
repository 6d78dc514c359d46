//! Timestamp matching of local originals against remote records.
//!
//! Each local record is paired with the first remote record, in remote list
//! order, whose canonical capture time is identical. Matching is not
//! exclusive: locals sharing a capture time all resolve to the same remote.

use crate::records::{LocalRecord, RemoteRecord};
use crate::timestamp::{
    normalize, normalize_remote, CanonicalTimestamp, TimestampError, TimestampFormat,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Malformed capture time on {name}: {source}")]
    MalformedTimestamp {
        name: String,
        #[source]
        source: TimestampError,
    },
}

/// What to do with a local record whose capture time can't be normalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Stop the whole reconciliation.
    #[default]
    Abort,
    /// Log it and treat the record as unmatched.
    Skip,
}

/// Pairing of one local record with its remote counterpart, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub local: LocalRecord,
    pub remote: Option<RemoteRecord>,
}

/// Partition of the local records into matched and unmatched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Matched records, every one with `remote` present
    pub matches: Vec<MatchResult>,
    pub unmatched: Vec<LocalRecord>,
}

impl Reconciliation {
    /// Number of local records accounted for
    pub fn len(&self) -> usize {
        self.matches.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index remote records by canonical timestamp, keeping the first
/// occurrence of each.
///
/// Remote timestamps are already canonical, so a remote with an odd date
/// just never matches.
fn index_remotes(remotes: &[RemoteRecord]) -> HashMap<CanonicalTimestamp, &RemoteRecord> {
    let mut index = HashMap::with_capacity(remotes.len());

    for remote in remotes {
        index
            .entry(normalize_remote(&remote.captured_at))
            .or_insert(remote);
    }

    index
}

/// Match local records against remote records by capture time.
pub fn reconcile(
    locals: &[LocalRecord],
    remotes: &[RemoteRecord],
    policy: MalformedPolicy,
) -> Result<Reconciliation, ReconcileError> {
    let index = index_remotes(remotes);
    let mut reconciliation = Reconciliation::default();

    for local in locals {
        let key = match normalize(&local.captured_at, TimestampFormat::LocalMetadata) {
            Ok(key) => key,
            Err(source) => match policy {
                MalformedPolicy::Abort => {
                    return Err(ReconcileError::MalformedTimestamp {
                        name: local.name.clone(),
                        source,
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(file = %local.name, error = %source, "Skipping original with malformed capture time");
                    reconciliation.unmatched.push(local.clone());
                    continue;
                }
            },
        };

        match index.get(&key) {
            Some(remote) => reconciliation.matches.push(MatchResult {
                local: local.clone(),
                remote: Some((*remote).clone()),
            }),
            None => reconciliation.unmatched.push(local.clone()),
        }
    }

    Ok(reconciliation)
}
