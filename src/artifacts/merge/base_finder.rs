//! Merge-base selection
//!
//! Finds the common ancestor two branch tips are folded around. The walk
//! consumes every recorded parent of a commit, so histories containing
//! earlier merges still produce complete ancestor sets.
//!
//! Selection is deterministic: among all common ancestors the finder picks
//! the one nearest to the head tip by BFS distance, breaking ties with the
//! smallest identifier. Re-running the same merge therefore always picks
//! the same base.

use crate::artifacts::objects::commit_id::CommitId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds merge bases between two commits
///
/// Generic over a parent-loader closure so the algorithm works against the
/// on-disk image store as well as in-memory graphs in tests.
pub struct MergeBaseFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&CommitId) -> anyhow::Result<Vec<CommitId>>,
{
    load_parents: ParentLoaderFn,
}

impl<ParentLoaderFn> MergeBaseFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&CommitId) -> anyhow::Result<Vec<CommitId>>,
{
    pub fn new(load_parents: ParentLoaderFn) -> Self {
        Self { load_parents }
    }

    /// Full ancestor set of `tip`, including `tip` itself
    pub fn ancestors(&self, tip: &CommitId) -> anyhow::Result<HashSet<CommitId>> {
        Ok(self.walk_with_depths(tip)?.into_keys().collect())
    }

    /// Nearest common ancestor of `head` and `other`
    ///
    /// Distance is measured from `head` by BFS level; ties resolve to the
    /// smallest identifier. Returns `None` when the histories share no
    /// commit.
    pub fn find_merge_base(
        &self,
        head: &CommitId,
        other: &CommitId,
    ) -> anyhow::Result<Option<CommitId>> {
        let head_depths = self.walk_with_depths(head)?;
        let other_ancestors = self.ancestors(other)?;

        Ok(head_depths
            .into_iter()
            .filter(|(id, _)| other_ancestors.contains(id))
            .min_by(|(left_id, left_depth), (right_id, right_depth)| {
                left_depth.cmp(right_depth).then(left_id.cmp(right_id))
            })
            .map(|(id, _)| id))
    }

    /// BFS over all parents, recording the shortest distance from `tip`
    fn walk_with_depths(&self, tip: &CommitId) -> anyhow::Result<HashMap<CommitId, usize>> {
        let mut depths = HashMap::from([(tip.clone(), 0)]);
        let mut queue = VecDeque::from([tip.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let depth = depths[&commit_id];

            for parent_id in (self.load_parents)(&commit_id)? {
                if !depths.contains_key(&parent_id) {
                    depths.insert(parent_id.clone(), depth + 1);
                    queue.push_back(parent_id);
                }
            }
        }

        Ok(depths)
    }
}
