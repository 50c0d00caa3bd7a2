//! Snapshot file discovery: walk parent directories for an existing
//! prototype snapshot. A convenience for callers that share one snapshot
//! across nested test working directories; the resolved path is passed
//! explicitly to [`FactoryConfig::prototype_address`](crate::FactoryConfig::prototype_address),
//! there is no process-wide state.

use std::path::{Path, PathBuf};

/// Search for `file_name` starting at `start_dir` and walking upward
/// through parent directories. Returns the first existing match, or
/// `start_dir/file_name` when no ancestor contains the file (the caller
/// then builds a fresh snapshot there).
pub fn locate_snapshot(file_name: &str, start_dir: &Path) -> PathBuf {
    let mut dir = start_dir;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return candidate;
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return start_dir.join(file_name),
        }
    }
}
