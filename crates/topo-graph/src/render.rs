use std::collections::BTreeSet;
use std::io::Write;

use topo_hash::ObjectId;

use crate::{BranchMap, CommitGraph, GraphError};

/// Render `order` as the topological report.
///
/// One line per commit: its hash, then its branch names (sorted) if any.
/// When a commit is not a parent of the line above it, a sticky end
/// separates them:
///
/// ```text
/// <parents of the previous commit>=
///
/// =<children of this commit>
/// ```
pub fn render(
    order: &[ObjectId],
    graph: &CommitGraph,
    branches: &BranchMap,
) -> Result<String, GraphError> {
    let mut out = String::new();
    let mut prev: Option<&BTreeSet<ObjectId>> = None;

    for oid in order {
        let node = graph.get(oid).ok_or(GraphError::UnknownCommit(*oid))?;

        if let Some(prev_parents) = prev {
            if !prev_parents.contains(oid) {
                out.push_str(&join(prev_parents));
                out.push_str("=\n\n=");
                out.push_str(&join(node.children()));
                out.push('\n');
            }
        }

        out.push_str(&oid.to_hex());
        if let Some(names) = branches.names(oid) {
            for name in names {
                out.push(' ');
                out.push_str(name);
            }
        }
        out.push('\n');

        prev = Some(node.parents());
    }
    Ok(out)
}

/// [`render`] straight into a writer.
pub fn render_to<W: Write + ?Sized>(
    writer: &mut W,
    order: &[ObjectId],
    graph: &CommitGraph,
    branches: &BranchMap,
) -> Result<(), GraphError> {
    let report = render(order, graph, branches)?;
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn join(ids: &BTreeSet<ObjectId>) -> String {
    ids.iter().map(ObjectId::to_hex).collect::<Vec<_>>().join(" ")
}
