use super::plan::RenamePlan;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Target already exists: {0}")]
    RenameConflict(PathBuf),

    #[error("Source no longer exists: {0}")]
    SourceMissing(PathBuf),

    #[error("Target is not a plain file name in the source directory: {0}")]
    InvalidTarget(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A plan that could not be applied
#[derive(Debug)]
pub struct RenameFailure {
    pub plan: RenamePlan,
    pub error: RenameError,
}

/// Result of applying rename plans
#[derive(Debug, Default)]
pub struct RenameReport {
    pub renamed: Vec<RenamePlan>,
    /// Plans that passed every check but were not applied (dry run)
    pub dry_run: Vec<RenamePlan>,
    /// Plans whose source already has the target name
    pub unchanged: Vec<RenamePlan>,
    pub failed: Vec<RenameFailure>,
}

impl RenameReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Apply rename plans one by one.
///
/// A failing plan is recorded and the remaining plans still run. With
/// `dry_run` set the same checks are made but nothing on disk changes.
pub async fn apply_renames(plans: &[RenamePlan], dry_run: bool) -> RenameReport {
    if dry_run {
        info!("Dry run was specified; will not carry out renames");
    }

    let mut report = RenameReport::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for plan in plans {
        info!("Rename \"{}\" to \"{}\"", plan.from_name(), plan.to_name());

        if plan.from == plan.to {
            report.unchanged.push(plan.clone());
            continue;
        }

        if let Err(error) = check_plan(plan, &claimed).await {
            warn!(from = %plan.from.display(), error = %error, "Rename skipped");
            report.failed.push(RenameFailure {
                plan: plan.clone(),
                error,
            });
            continue;
        }

        claimed.insert(plan.to.clone());

        if dry_run {
            report.dry_run.push(plan.clone());
            continue;
        }

        match fs::rename(&plan.from, &plan.to).await {
            Ok(()) => report.renamed.push(plan.clone()),
            Err(e) => {
                warn!(from = %plan.from.display(), error = %e, "Rename failed");
                report.failed.push(RenameFailure {
                    plan: plan.clone(),
                    error: RenameError::IoError(e),
                });
            }
        }
    }

    report
}

/// Read-only checks shared by real and dry runs
async fn check_plan(plan: &RenamePlan, claimed: &HashSet<PathBuf>) -> Result<(), RenameError> {
    if !is_sibling_target(&plan.from, &plan.to) {
        return Err(RenameError::InvalidTarget(plan.to.clone()));
    }

    if !fs::try_exists(&plan.from).await? {
        return Err(RenameError::SourceMissing(plan.from.clone()));
    }

    if claimed.contains(&plan.to) || fs::try_exists(&plan.to).await? {
        return Err(RenameError::RenameConflict(plan.to.clone()));
    }

    Ok(())
}

/// The target must be a plain, non-hidden file name next to the source.
/// Titles containing path separators or nothing but an extension fail this.
fn is_sibling_target(from: &Path, to: &Path) -> bool {
    let Some(name) = to.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return false;
    };

    if name.starts_with('.') {
        return false;
    }

    to.parent() == from.parent()
}
