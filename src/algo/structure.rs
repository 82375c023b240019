/*!
Structural queries that work on a private copy of the graph.

None of these algorithms mutate the graph they are called on: pruning returns a new graph, and the
destructive tree check runs on a clone per root.
*/

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::*;

/// Shape of a whole graph as reported by [`Structure::classify_tree_or_forest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TreeClassification {
    /// A single acyclic connected component
    Tree,
    /// More than one component, each of them a tree
    Forest,
    /// At least one component contains a cycle (or the graph is empty)
    Neither,
}

/// Outcome of the destructive depth-first search from one root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RootedComponent {
    acyclic: bool,
    visited: usize,
    edges: usize,
}

impl RootedComponent {
    fn is_tree(&self) -> bool {
        self.acyclic && self.visited == self.edges + 1
    }
}

/// Whole-graph structural queries
pub trait Structure: Clone + Degrees + GraphLabelEditing {
    /// Returns a copy of the graph without every vertex of odd degree.
    ///
    /// The vertices to drop are determined from the degrees of `self`; removing them
    /// does not trigger a second round even if it creates new odd-degree vertices.
    fn prune_odd_degree_vertices(&self) -> Self {
        let odd = self.odd_degree_vertices();
        debug!("pruning {} odd-degree vertices", odd.len());

        let mut pruned = self.clone();
        for u in odd {
            pruned.remove_node(u);
        }
        pruned
    }

    /// Returns a path with the fewest edges from `u1` to `u2` that does not pass through `v`.
    ///
    /// The path includes both endpoints. Fails with [`GraphError::NoPathFound`] if every path
    /// visits `v` or if `v` is one of the endpoints.
    fn path_avoiding(
        &self,
        u1: impl VertexRef,
        u2: impl VertexRef,
        v: impl VertexRef,
    ) -> Result<Vec<Node>> {
        let (u1, u2, v) = (u1.resolve(self)?, u2.resolve(self)?, v.resolve(self)?);
        if v == u1 || v == u2 {
            return Err(GraphError::NoPathFound);
        }

        self.bfs_path_avoiding(u1, u2, [v])
            .ok_or(GraphError::NoPathFound)
    }

    /// Classifies the graph as a [`TreeClassification::Tree`], a [`TreeClassification::Forest`]
    /// or [`TreeClassification::Neither`].
    ///
    /// Every vertex serves as the root of a destructive depth-first search on a private copy.
    /// The component of a root is tree-shaped iff no cycle was flagged and it has exactly one
    /// edge less than vertices.
    fn classify_tree_or_forest(&self) -> TreeClassification {
        if self.is_empty() {
            return TreeClassification::Neither;
        }

        let mut all_trees = true;
        let mut multiple_components = false;
        for root in self.vertices() {
            let component = explore_component(self, root);
            trace!("component of {root}: {component:?}");

            if component.is_tree() {
                multiple_components |= component.visited != self.len();
            } else {
                all_trees = false;
            }
        }

        match (all_trees, multiple_components) {
            (true, false) => TreeClassification::Tree,
            (true, true) => TreeClassification::Forest,
            (false, _) => TreeClassification::Neither,
        }
    }
}

impl<G> Structure for G where G: Clone + Degrees + GraphLabelEditing {}

/// Destructive depth-first search from `root` on a private copy of `graph`.
///
/// Every tree edge is removed once taken; a cycle is flagged whenever a newly reached node still
/// has an edge to an already visited node.
fn explore_component<G: Structure>(graph: &G, root: Node) -> RootedComponent {
    let mut work = graph.clone();
    let mut visited = graph.vertex_bitset_unset();
    visited.set_bit(root);

    let mut component = RootedComponent {
        acyclic: !work.has_self_loop(root),
        visited: 1,
        edges: 0,
    };

    // frames of the recursive search: node and a snapshot of its neighbors
    let mut stack = vec![(root, work.neighbors_of(root).collect::<Vec<_>>(), 0usize)];
    while component.visited < graph.len() {
        let Some((current, neighbors, pos)) = stack.last_mut() else {
            break;
        };
        let current = *current;

        let Some(&next) = neighbors.get(*pos) else {
            stack.pop();
            continue;
        };
        *pos += 1;

        if visited.set_bit(next) {
            continue;
        }
        component.visited += 1;
        work.try_remove_edge(current, next);

        if work.neighbors_of(next).any(|w| visited.get_bit(w)) {
            component.acyclic = false;
        }
        component.edges += 1;

        stack.push((next, work.neighbors_of(next).collect(), 0));
    }

    component
}
