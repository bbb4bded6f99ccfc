//! Working tree status inspection

pub mod inspector;

use std::path::PathBuf;

/// Read-only comparison result across working tree, staging area and HEAD
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Staged files with no counterpart in the HEAD snapshot. Staged files
    /// whose content merely differs from the snapshot are deliberately not
    /// reported here; this additions-only behavior is the documented legacy
    /// contract.
    pub to_be_committed: Vec<PathBuf>,
    /// Working-tree files whose staged copy differs in byte content
    pub not_staged: Vec<PathBuf>,
    /// Working-tree files with no entry in the staging area
    pub untracked: Vec<PathBuf>,
}

impl StatusReport {
    /// Checkout is blocked while either mutable-change set is nonempty;
    /// untracked files never block.
    pub fn blocks_checkout(&self) -> bool {
        !self.to_be_committed.is_empty() || !self.not_staged.is_empty()
    }
}
