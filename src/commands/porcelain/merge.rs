use crate::areas::repository::Repository;
use crate::artifacts::core::files_identical;
use crate::artifacts::merge::base_finder::MergeBaseFinder;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::WitError;
use std::io::Write;

impl Repository {
    /// Fold a branch into the current HEAD as a two-parent commit
    ///
    /// Changes are judged against the nearest common ancestor of HEAD and
    /// the branch tip. Files the branch added since the base are staged;
    /// files both sides changed to different content abort the merge before
    /// anything is written.
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let refset = self.refs().read()?.ok_or(WitError::NoCommitsYet)?;

        if !refset.plain_branch_names().any(|name| name == branch_name) {
            return Err(WitError::UnknownMergeBranch(branch_name.to_string()).into());
        }

        let head_id = refset.head()?.clone();
        let branch_id = refset
            .get(branch_name)
            .cloned()
            .expect("branch presence was checked above");

        let finder = MergeBaseFinder::new(|commit_id: &CommitId| {
            Ok(self.images().read_record(commit_id)?.parents)
        });
        let base_id = finder.find_merge_base(&head_id, &branch_id)?.ok_or_else(|| {
            anyhow::anyhow!("HEAD and '{}' share no common ancestor", branch_name)
        })?;

        let base_snapshot = self.images().snapshot_path(&base_id);
        let head_snapshot = self.images().snapshot_path(&head_id);
        let branch_snapshot = self.images().snapshot_path(&branch_id);
        let branch_files = self.images().snapshot_files(&branch_id)?;

        // Conflict scan runs to completion before any mutation
        let mut conflicts = Vec::new();
        for relative_path in &branch_files {
            let in_branch = branch_snapshot.join(relative_path);
            let in_base = base_snapshot.join(relative_path);
            let in_head = head_snapshot.join(relative_path);

            let branch_changed = !in_base.exists() || !files_identical(&in_branch, &in_base)?;
            if !branch_changed || !in_head.exists() {
                continue;
            }

            let head_changed = !in_base.exists() || !files_identical(&in_head, &in_base)?;
            if head_changed && !files_identical(&in_branch, &in_head)? {
                conflicts.push(relative_path.display().to_string());
            }
        }
        if !conflicts.is_empty() {
            conflicts.sort();
            return Err(WitError::MergeConflict(conflicts).into());
        }

        {
            let staging = self.staging();
            let staging = staging.lock().await;

            for relative_path in &branch_files {
                let in_branch = branch_snapshot.join(relative_path);
                let in_base = base_snapshot.join(relative_path);

                if !in_base.exists() {
                    // Added on the branch since the base
                    staging.add(&in_branch, relative_path)?;
                } else if !files_identical(&in_branch, &in_base)? {
                    staging.add(&in_branch, relative_path)?;
                }
            }
        }

        let merge_id = self.write_commit(branch_name).await?;

        // Rewrite the fresh record with both parents, branch tip first
        let record = self.images().read_record(&merge_id)?;
        self.images().write_record(
            &merge_id,
            &CommitRecord::new(
                vec![branch_id.clone(), head_id.clone()],
                record.date,
                record.message,
            ),
        )?;

        writeln!(
            self.writer(),
            "Merged '{}' into {} as {}",
            branch_name,
            head_id.to_short(),
            merge_id.to_short()
        )?;

        Ok(())
    }
}
