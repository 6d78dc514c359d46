use super::matching::MatchResult;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A proposed rename, not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenamePlan {
    /// File name of the source, for log lines
    pub fn from_name(&self) -> String {
        display_name(&self.from)
    }

    /// File name of the target, for log lines
    pub fn to_name(&self) -> String {
        display_name(&self.to)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Target path for `from` renamed to `title`, keeping the extension.
pub fn target_path(from: &Path, title: &str) -> PathBuf {
    let mut file_name = OsString::from(title);
    if let Some(ext) = from.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    match from.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Build a rename plan for every match that has a remote record.
pub fn plan_renames(matches: &[MatchResult]) -> Vec<RenamePlan> {
    matches
        .iter()
        .filter_map(|m| {
            m.remote.as_ref().map(|remote| RenamePlan {
                from: m.local.path.clone(),
                to: target_path(&m.local.path, &remote.title),
            })
        })
        .collect()
}
