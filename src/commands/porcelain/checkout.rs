use crate::areas::refs::{DEFAULT_BRANCH, HEAD_REF_NAME};
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::WitError;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Switch the working tree, staging area and HEAD to a target
    ///
    /// The target is tried in order: `master` (full checkout plus branch
    /// activation), a commit id with an existing snapshot (full checkout),
    /// then any other known branch name, which only rewrites the active
    /// branch pointer without touching the working tree.
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let refset = self.refs().read()?.ok_or(WitError::NoCommitsYet)?;

        if target == DEFAULT_BRANCH {
            let commit_id = refset
                .get(DEFAULT_BRANCH)
                .cloned()
                .ok_or_else(|| WitError::NotFound(DEFAULT_BRANCH.to_string()))?;

            self.checkout_commit(&commit_id).await?;
            self.refs().set_active_branch(DEFAULT_BRANCH)?;

            writeln!(self.writer(), "Switched to branch '{}'", DEFAULT_BRANCH)?;
            return Ok(());
        }

        if let Ok(commit_id) = CommitId::try_parse(target.to_string()) {
            if self.images().contains(&commit_id) {
                self.checkout_commit(&commit_id).await?;

                writeln!(self.writer(), "HEAD is now at {}", commit_id.to_short())?;
                return Ok(());
            }
        }

        if refset.plain_branch_names().any(|name| name == target) {
            self.refs().set_active_branch(target)?;

            writeln!(self.writer(), "Switched to branch '{}'", target)?;
            return Ok(());
        }

        Err(WitError::UnknownCheckoutTarget(target.to_string()).into())
    }

    /// Materialize a commit's snapshot into the working tree and staging area
    ///
    /// Refuses to run over staged or unstaged changes. Untracked files
    /// survive the switch and win over same-named snapshot files.
    async fn checkout_commit(&self, commit_id: &CommitId) -> anyhow::Result<()> {
        let staging = self.staging();
        let staging = staging.lock().await;

        let report = self.inspector().report(&staging)?;
        if report.blocks_checkout() {
            return Err(WitError::PendingChangesLeft.into());
        }

        let snapshot = self.images().snapshot_path(commit_id);
        if !snapshot.is_dir() {
            return Err(WitError::NotFound(commit_id.to_string()).into());
        }

        let untracked = report.untracked.into_iter().collect::<HashSet<_>>();
        self.workspace().delete_tracked_files(&untracked)?;
        self.workspace().restore_snapshot(&snapshot)?;

        staging.replace_from(&snapshot).await?;

        self.refs().update(|refset| {
            let mut refset =
                refset.ok_or_else(|| anyhow::anyhow!("references vanished during checkout"))?;
            refset.set(HEAD_REF_NAME, commit_id.clone());
            Ok(refset)
        })?;

        Ok(())
    }
}
