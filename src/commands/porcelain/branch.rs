use crate::areas::repository::Repository;
use crate::errors::WitError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current HEAD
    ///
    /// The new branch is not activated; checkout does that.
    pub async fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.refs().update(|refset| {
            let mut refset = refset.ok_or(WitError::NoCommitsYet)?;

            if refset.contains(name) {
                return Err(WitError::BranchAlreadyExists(name.to_string()).into());
            }

            let head = refset.head()?.clone();
            refset.set(name, head);

            Ok(refset)
        })?;

        writeln!(self.writer(), "Created branch '{}'", name)?;

        Ok(())
    }
}
