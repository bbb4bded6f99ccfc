use crate::areas::refs::{HEAD_REF_NAME, RefSet};
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::WitError;
use std::io::Write;

impl Repository {
    /// Record the staging area as a new commit and advance the references
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let commit_id = self.write_commit(message).await?;

        writeln!(self.writer(), "[{}] {}", commit_id.to_short(), message)?;

        Ok(())
    }

    /// Snapshot the staging area, write its record and move the references
    ///
    /// Refuses to commit when the staging area is identical to the current
    /// HEAD snapshot. The active branch advances only while it still points
    /// at the old HEAD; a detached HEAD moves alone.
    pub(crate) async fn write_commit(&self, message: &str) -> anyhow::Result<CommitId> {
        let staging = self.staging();
        let staging = staging.lock().await;

        let parents = match self.refs().read()? {
            Some(refset) => {
                let head = refset.head()?.clone();
                let head_snapshot = self.images().snapshot_path(&head);

                if !Inspector::snapshot_differs(&staging, &head_snapshot)? {
                    return Err(WitError::NoChangesToCommit(head).into());
                }

                vec![head]
            }
            None => Vec::new(),
        };

        let commit_id = self.images().generate_id();
        self.images()
            .create_snapshot(&commit_id, staging.path())
            .await?;
        self.images()
            .write_record(&commit_id, &CommitRecord::now(parents, message.to_string()))?;

        self.refs().update(|refset| match refset {
            None => Ok(RefSet::bootstrap(commit_id.clone())),
            Some(mut refset) => {
                let active_branch = self.refs().active_branch()?;
                let old_head = refset.head()?.clone();

                if refset.get(&active_branch) == Some(&old_head) {
                    refset.set(&active_branch, commit_id.clone());
                }
                refset.set(HEAD_REF_NAME, commit_id.clone());

                Ok(refset)
            }
        })?;

        Ok(commit_id)
    }
}
