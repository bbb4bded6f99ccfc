//! History traversal for the visualization hand-off
//!
//! Walks first-parent links from HEAD down to the root and packages the
//! result as (earlier, later) edges plus the HEAD and master bindings. The
//! rendering itself belongs to an external collaborator; the thin glue here
//! only emits Graphviz DOT source for it.

use crate::artifacts::objects::commit_id::CommitId;
use derive_new::new;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct GraphHandoff {
    /// (earlier, later) pairs, oldest link first
    pub edges: Vec<(CommitId, CommitId)>,
    pub head: CommitId,
    pub master: Option<CommitId>,
}

impl GraphHandoff {
    /// Collect the first-parent chain starting at `head`
    pub fn collect(
        load_parents: impl Fn(&CommitId) -> anyhow::Result<Vec<CommitId>>,
        head: CommitId,
        master: Option<CommitId>,
    ) -> anyhow::Result<Self> {
        let mut chain = vec![head.clone()];
        while let Some(parent) = load_parents(chain.last().expect("chain is never empty"))?
            .into_iter()
            .next()
        {
            chain.push(parent);
        }

        // chain runs newest to oldest; edges point from parent to child
        let edges = chain
            .windows(2)
            .map(|pair| (pair[1].clone(), pair[0].clone()))
            .rev()
            .collect();

        Ok(GraphHandoff::new(edges, head, master))
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph commits {\n");

        for (earlier, later) in &self.edges {
            let _ = writeln!(dot, "    \"{}\" -> \"{}\";", earlier, later);
        }

        let _ = writeln!(dot, "    \"HEAD\" [shape=plaintext];");
        let _ = writeln!(dot, "    \"HEAD\" -> \"{}\";", self.head);

        if let Some(master) = &self.master {
            let _ = writeln!(dot, "    \"master\" [shape=plaintext];");
            let _ = writeln!(dot, "    \"master\" -> \"{}\";", master);
        }

        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn oid(seed: &str) -> CommitId {
        let mut hex = seed
            .bytes()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();
        while hex.len() < 40 {
            hex.push('0');
        }
        hex.truncate(40);

        CommitId::try_parse(hex).unwrap()
    }

    #[test]
    fn collects_first_parent_chain_as_edges() {
        // a <- b <- m, where m is a merge whose second parent is ignored here
        let parents = HashMap::from([
            (oid("a"), vec![]),
            (oid("b"), vec![oid("a")]),
            (oid("c"), vec![oid("a")]),
            (oid("m"), vec![oid("b"), oid("c")]),
        ]);

        let handoff = GraphHandoff::collect(
            |id| Ok(parents[id].clone()),
            oid("m"),
            Some(oid("m")),
        )
        .unwrap();

        assert_eq!(
            handoff.edges,
            vec![(oid("a"), oid("b")), (oid("b"), oid("m"))]
        );
    }

    #[test]
    fn dot_output_names_head_and_master() {
        let handoff = GraphHandoff::new(
            vec![(oid("a"), oid("b"))],
            oid("b"),
            Some(oid("b")),
        );

        let dot = handoff.to_dot();
        assert!(dot.starts_with("digraph commits {"));
        assert!(dot.contains(&format!("\"{}\" -> \"{}\";", oid("a"), oid("b"))));
        assert!(dot.contains(&format!("\"HEAD\" -> \"{}\";", oid("b"))));
        assert!(dot.contains(&format!("\"master\" -> \"{}\";", oid("b"))));
    }

    #[test]
    fn single_commit_history_has_no_edges() {
        let handoff =
            GraphHandoff::collect(|_| Ok(vec![]), oid("a"), None).unwrap();

        assert!(handoff.edges.is_empty());
        assert!(handoff.to_dot().contains("HEAD"));
    }
}
