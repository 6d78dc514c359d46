mod execute;
mod matching;
mod plan;

pub use execute::{apply_renames, RenameError, RenameFailure, RenameReport};
pub use matching::{reconcile, MalformedPolicy, MatchResult, Reconciliation, ReconcileError};
pub use plan::{plan_renames, target_path, RenamePlan};
