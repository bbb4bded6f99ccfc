use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::graph::GraphHandoff;
use crate::errors::WitError;
use std::io::Write;

impl Repository {
    /// Print the first-parent history from HEAD as a DOT digraph
    pub async fn graph(&mut self) -> anyhow::Result<()> {
        let refset = self.refs().read()?.ok_or(WitError::NoCommitsYet)?;
        let head = refset.head()?.clone();
        let master = refset.get(DEFAULT_BRANCH).cloned();

        let handoff = GraphHandoff::collect(
            |commit_id| Ok(self.images().read_record(commit_id)?.parents),
            head,
            master,
        )?;

        write!(self.writer(), "{}", handoff.to_dot())?;

        Ok(())
    }
}
