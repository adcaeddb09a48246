//! Commit graph construction, topological ordering and report rendering.
//!
//! The pipeline is:
//!
//! 1. [`GraphBuilder`] walks parent links from every branch head through a
//!    [`ParentSource`] (normally the loose object store) and produces an
//!    immutable [`CommitGraph`] with parent and child edges plus the roots.
//! 2. [`topo_order`] runs a depth-first search from the roots along child
//!    edges and emits every commit after all of its descendants.
//! 3. [`render`] prints one line per commit, annotated with branch names,
//!    and inserts a sticky end wherever two adjacent lines are not a
//!    child/parent pair.
//!
//! Every iteration over a set of commits goes in ascending hash order, so
//! the report is reproducible.

mod branches;
mod graph;
mod order;
mod render;

pub use branches::BranchMap;
pub use graph::{build_graph, CommitGraph, CommitNode, GraphBuilder, ParentSource};
pub use order::topo_order;
pub use render::{render, render_to};

use topo_hash::ObjectId;

/// Errors produced while building or rendering the commit graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("commit {0} not found")]
    MissingCommit(ObjectId),

    #[error("cannot parse commit {oid}: {source}")]
    Parse {
        oid: ObjectId,
        #[source]
        source: topo_object::ObjectError,
    },

    #[error("{0} is not part of the commit graph")]
    UnknownCommit(ObjectId),

    #[error(transparent)]
    Loose(#[from] topo_loose::LooseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build, order and render in one call.
pub fn topo_report<S>(source: &S, branches: &BranchMap) -> Result<String, GraphError>
where
    S: ParentSource + ?Sized,
{
    let (graph, roots) = build_graph(source, branches)?;
    let order = topo_order(&graph, &roots);
    render(&order, &graph, branches)
}
