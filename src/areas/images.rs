//! Image store
//!
//! One subdirectory per commit (the snapshot) plus one metadata record per
//! commit, both keyed by the commit id:
//!
//! ```text
//! images/<commit-id>/      recursive snapshot of the staging area
//! images/<commit-id>.txt   parent/date/message record
//! ```
//!
//! Snapshots are immutable once created and nothing is ever deleted from
//! the store. Creation stages into `<commit-id>.tmp` and renames into
//! place, so a crash mid-commit cannot leave a partially populated commit
//! visible.

use crate::artifacts::core::copy_tree_parallel;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::WitError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct ImageStore {
    /// Path to the `images` directory under the metadata root
    path: Box<Path>,
}

impl ImageStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }

    pub fn record_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(format!("{}.txt", commit_id))
    }

    /// Whether a commit with this id exists in the store
    pub fn contains(&self, commit_id: &CommitId) -> bool {
        self.snapshot_path(commit_id).is_dir()
    }

    /// Generate a fresh id, guaranteed unused within this store
    pub fn generate_id(&self) -> CommitId {
        CommitId::generate(|id| self.contains(id) || self.record_path(id).exists())
    }

    pub fn read_record(&self, commit_id: &CommitId) -> anyhow::Result<CommitRecord> {
        let path = self.record_path(commit_id);
        if !path.exists() {
            return Err(WitError::NotFound(commit_id.to_string()).into());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read commit record at {:?}", path))?;

        CommitRecord::parse(&content)
            .with_context(|| format!("failed to parse commit record for {}", commit_id))
    }

    pub fn write_record(&self, commit_id: &CommitId, record: &CommitRecord) -> anyhow::Result<()> {
        let path = self.record_path(commit_id);

        std::fs::write(&path, record.serialize())
            .with_context(|| format!("failed to write commit record at {:?}", path))?;

        Ok(())
    }

    /// All files inside a commit's snapshot, relative to the snapshot root
    pub fn snapshot_files(&self, commit_id: &CommitId) -> anyhow::Result<Vec<PathBuf>> {
        let snapshot = self.snapshot_path(commit_id);
        if !snapshot.is_dir() {
            return Err(WitError::NotFound(commit_id.to_string()).into());
        }

        Ok(walkdir::WalkDir::new(&snapshot)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&snapshot)
                    .map(PathBuf::from)
                    .ok()
            })
            .collect::<Vec<_>>())
    }

    /// Snapshot the contents of `source` under this commit id
    ///
    /// The copy lands in a `.tmp` sibling first and only becomes visible
    /// through the final rename.
    pub async fn create_snapshot(&self, commit_id: &CommitId, source: &Path) -> anyhow::Result<()> {
        let final_path = self.snapshot_path(commit_id);
        let staging_path = self.path.join(format!("{}.tmp", commit_id));

        copy_tree_parallel(source, &staging_path).await?;
        std::fs::rename(&staging_path, &final_path).with_context(|| {
            format!("failed to move snapshot {:?} into place", staging_path)
        })?;

        Ok(())
    }
}
