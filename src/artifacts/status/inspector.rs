//! Three-way comparison across working tree, staging area and HEAD snapshot

use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::core::files_identical;
use crate::artifacts::status::StatusReport;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Produce the three status reports. Purely read-only.
    pub fn report(&self, staging: &StagingArea) -> anyhow::Result<StatusReport> {
        let head_snapshot = self.head_snapshot()?;
        let mut report = StatusReport::default();

        for relative_path in staging.list_files()? {
            let in_snapshot = head_snapshot
                .as_ref()
                .is_some_and(|snapshot| snapshot.join(&relative_path).exists());

            if !in_snapshot {
                report.to_be_committed.push(relative_path);
            }
        }

        let workspace = self.repository.workspace();
        for relative_path in workspace.list_files()? {
            let staged_path = staging.path().join(&relative_path);

            if staged_path.exists() {
                if !files_identical(&workspace.path().join(&relative_path), &staged_path)? {
                    report.not_staged.push(relative_path);
                }
            } else {
                report.untracked.push(relative_path);
            }
        }

        report.to_be_committed.sort();
        report.not_staged.sort();
        report.untracked.sort();

        Ok(report)
    }

    /// Whether the staging area diverged from a commit snapshot
    ///
    /// Walks the staging area; a file missing from the snapshot or differing
    /// in byte content means "different". Files present only in the snapshot
    /// do not count, which is the legacy comparison direction.
    pub fn snapshot_differs(staging: &StagingArea, snapshot: &Path) -> anyhow::Result<bool> {
        for relative_path in staging.list_files()? {
            let committed_path = snapshot.join(&relative_path);

            if !committed_path.exists()
                || !files_identical(&staging.path().join(&relative_path), &committed_path)?
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn head_snapshot(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(refset) = self.repository.refs().read()? else {
            return Ok(None);
        };

        let head = refset.head()?.clone();
        Ok(Some(self.repository.images().snapshot_path(&head)))
    }
}
