use std::collections::{BTreeSet, HashSet};
use std::ops::Bound;

use topo_hash::ObjectId;

use crate::CommitGraph;

/// Order every commit so that each one comes after all of its children.
///
/// Starting from each root in ascending order, a depth-first search follows
/// child edges (smallest unvisited child first); a commit is emitted once it
/// has no unvisited children left. Commits already reached from an earlier
/// root are not entered again.
pub fn topo_order<'a, I>(graph: &CommitGraph, roots: I) -> Vec<ObjectId>
where
    I: IntoIterator<Item = &'a ObjectId>,
{
    let roots: BTreeSet<ObjectId> = roots.into_iter().copied().collect();
    let mut visited: HashSet<ObjectId> = HashSet::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());

    for root in &roots {
        if !graph.contains(root) {
            log::warn!("root {root} is not in the commit graph, skipping");
            continue;
        }
        if !visited.insert(*root) {
            continue;
        }

        // Each frame remembers the last child it descended into, so returning
        // to a commit resumes the scan of its children instead of restarting.
        let mut stack: Vec<(ObjectId, Option<ObjectId>)> = vec![(*root, None)];
        while let Some((current, resume_after)) = stack.last_mut() {
            let next = graph.get(current).and_then(|node| {
                let lower = match resume_after {
                    Some(last) => Bound::Excluded(*last),
                    None => Bound::Unbounded,
                };
                node.children()
                    .range((lower, Bound::Unbounded))
                    .find(|child| !visited.contains(*child))
                    .copied()
            });

            match next {
                Some(child) => {
                    *resume_after = Some(child);
                    visited.insert(child);
                    stack.push((child, None));
                }
                None => {
                    order.push(*current);
                    stack.pop();
                }
            }
        }
    }

    // Roots sharing descendants must not duplicate them.
    let mut seen = HashSet::with_capacity(order.len());
    order.retain(|oid| seen.insert(*oid));

    if order.len() != graph.len() {
        log::warn!(
            "ordered {} of {} commits; some commits are unreachable from the given roots",
            order.len(),
            graph.len()
        );
    }
    order
}
