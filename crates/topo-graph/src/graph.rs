use std::collections::{BTreeSet, HashMap, HashSet};

use topo_hash::ObjectId;
use topo_loose::LooseObjectStore;

use crate::{BranchMap, GraphError};

/// Where the builder gets a commit's parents from.
pub trait ParentSource {
    /// Parent ids of `oid` in declaration order.
    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError>;
}

impl ParentSource for LooseObjectStore {
    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        let text = self.decode_commit(oid)?;
        topo_object::parse_parents(&text).map_err(|source| GraphError::Parse { oid: *oid, source })
    }
}

/// In-memory history, keyed by commit.
impl ParentSource for HashMap<ObjectId, Vec<ObjectId>> {
    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        self.get(oid).cloned().ok_or(GraphError::MissingCommit(*oid))
    }
}

/// One commit and its edges in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    id: ObjectId,
    parents: BTreeSet<ObjectId>,
    children: BTreeSet<ObjectId>,
}

impl CommitNode {
    fn new(id: ObjectId) -> Self {
        Self {
            id,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn parents(&self) -> &BTreeSet<ObjectId> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeSet<ObjectId> {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Every commit reachable from the branch heads. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    nodes: HashMap<ObjectId, CommitNode>,
    roots: BTreeSet<ObjectId>,
}

impl CommitGraph {
    pub fn get(&self, oid: &ObjectId) -> Option<&CommitNode> {
        self.nodes.get(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.nodes.contains_key(oid)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Commits without parents, ascending.
    pub fn roots(&self) -> &BTreeSet<ObjectId> {
        &self.roots
    }

    /// All commit ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.nodes.keys()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.values()
    }
}

/// Accumulates the graph across any number of head traversals.
///
/// Each distinct commit is asked of the [`ParentSource`] at most once per
/// builder, however many heads reach it.
pub struct GraphBuilder<'a, S: ParentSource + ?Sized> {
    source: &'a S,
    nodes: HashMap<ObjectId, CommitNode>,
    roots: BTreeSet<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a, S: ParentSource + ?Sized> GraphBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            nodes: HashMap::new(),
            roots: BTreeSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Walk every ancestor of `head` not seen by an earlier call.
    ///
    /// Iterative so long linear histories cannot exhaust the call stack.
    pub fn add_head(&mut self, head: ObjectId) -> Result<(), GraphError> {
        let mut stack = vec![head];
        while let Some(oid) = stack.pop() {
            if !self.visited.insert(oid) {
                continue;
            }
            self.nodes.entry(oid).or_insert_with(|| CommitNode::new(oid));

            let parents = self.source.parents(&oid)?;
            log::debug!("commit {} has {} parent(s)", oid, parents.len());

            for &parent in &parents {
                self.link(parent, oid);
                stack.push(parent);
            }
            if parents.is_empty() {
                self.roots.insert(oid);
            }
        }
        Ok(())
    }

    /// Record the edge `parent -> child` on both endpoints.
    fn link(&mut self, parent: ObjectId, child: ObjectId) {
        self.nodes
            .entry(parent)
            .or_insert_with(|| CommitNode::new(parent))
            .children
            .insert(child);
        self.nodes
            .entry(child)
            .or_insert_with(|| CommitNode::new(child))
            .parents
            .insert(parent);
    }

    /// Walk every head in `branches`, in ascending order.
    pub fn add_branches(&mut self, branches: &BranchMap) -> Result<(), GraphError> {
        for head in branches.heads() {
            self.add_head(*head)?;
        }
        Ok(())
    }

    pub fn build(self) -> CommitGraph {
        log::info!(
            "commit graph: {} commits, {} root(s)",
            self.nodes.len(),
            self.roots.len()
        );
        CommitGraph {
            nodes: self.nodes,
            roots: self.roots,
        }
    }
}

/// Build the graph for `branches` and return it with its root set.
pub fn build_graph<S>(
    source: &S,
    branches: &BranchMap,
) -> Result<(CommitGraph, BTreeSet<ObjectId>), GraphError>
where
    S: ParentSource + ?Sized,
{
    let mut builder = GraphBuilder::new(source);
    builder.add_branches(branches)?;
    let graph = builder.build();
    let roots = graph.roots().clone();
    Ok((graph, roots))
}
