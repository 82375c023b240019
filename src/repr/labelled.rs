/*!
# Labelled Graph Representation

[`LabelledGraph`] is the single graph store of this crate. Directedness and weightedness are runtime flags
(see [`GraphKind`]) so a graph read from a file or built by an algorithm can carry whatever kind it needs.

## Layout
- Vertices live in an arena: slot `u` holds the label of node `u` or a tombstone after removal.
- `index` maps labels back to slots.
- `out_nbs[u]` stores the weighted out-neighborhood of `u`. For undirected graphs both mirrored entries
  are kept, so `out_nbs` alone answers every query.
- `in_nbs[u]` stores the weighted in-neighborhood of `u`. It is only maintained for directed graphs and
  makes in-degrees and vertex removal local operations.

## Provided Representations
- [`Graph`]: neighborhoods backed by `Vec`.
- [`SparseGraph`]: neighborhoods backed by `SmallVec`, inline for up to 8 neighbors.
*/

use fxhash::FxHashMap;
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::testing::test_graph_ops;

use super::*;

/// An arena-backed graph over string-labelled vertices with weighted edges.
///
/// # Type parameters
/// - `Nbs`: [`Neighborhood`] implementation used for adjacency.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelledGraph<Nbs>
where
    Nbs: Neighborhood,
{
    kind: GraphKind,
    labels: Vec<Option<String>>,
    index: FxHashMap<String, Node>,
    out_nbs: Vec<Nbs>,
    in_nbs: Vec<Nbs>,
    num_nodes: NumNodes,
    num_edges: NumEdges,
}

/// Graph using adjacency arrays (`Vec<(Node, Weight)>`).
pub type Graph = LabelledGraph<ArrNeighborhood>;

/// Graph using sparse adjacency arrays (`SmallVec<[(Node, Weight); 8]>`).
pub type SparseGraph = LabelledGraph<SparseNeighborhood>;

impl<Nbs: Neighborhood> Default for LabelledGraph<Nbs> {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl<Nbs: Neighborhood> LabelledGraph<Nbs> {
    /// Creates an empty directed & weighted graph
    pub fn directed_weighted() -> Self {
        Self::new(GraphKind::directed_weighted())
    }

    /// Creates an empty directed & unweighted graph
    pub fn directed_unweighted() -> Self {
        Self::new(GraphKind::directed_unweighted())
    }

    /// Creates an empty undirected & weighted graph
    pub fn undirected_weighted() -> Self {
        Self::new(GraphKind::undirected_weighted())
    }

    /// Creates an empty undirected & unweighted graph
    pub fn undirected_unweighted() -> Self {
        Self::new(GraphKind::undirected_unweighted())
    }

    /// Returns an equivalent graph without tombstoned slots.
    /// Nodes are renumbered in ascending order of their old index; labels, weights and
    /// the order of every neighborhood are kept.
    pub fn compacted(&self) -> Self {
        let mut mapping = vec![INVALID_NODE; self.labels.len()];
        let mut graph = Self::new(self.kind);

        for u in self.vertices() {
            mapping[u as usize] = graph.add_vertex(self.label_of(u));
        }

        for u in self.vertices() {
            let new_u = mapping[u as usize];
            for (v, w) in self.out_nbs[u as usize].weighted_neighbors() {
                graph.out_nbs[new_u as usize].set_neighbor(mapping[v as usize], w);
            }
            if self.is_directed() {
                for (v, w) in self.in_nbs[u as usize].weighted_neighbors() {
                    graph.in_nbs[new_u as usize].set_neighbor(mapping[v as usize], w);
                }
            }
        }

        graph.num_edges = self.num_edges;
        graph
    }

    fn stored_weight(&self, weight: Weight) -> Weight {
        if self.kind.weighted {
            weight
        } else {
            UNWEIGHTED
        }
    }
}

impl<Nbs: Neighborhood> GraphType for LabelledGraph<Nbs> {
    fn kind(&self) -> GraphKind {
        self.kind
    }
}

impl<Nbs: Neighborhood> GraphNodeOrder for LabelledGraph<Nbs> {
    fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    fn node_capacity(&self) -> NumNodes {
        self.labels.len() as NumNodes
    }

    fn contains_node(&self, u: Node) -> bool {
        self.labels
            .get(u as usize)
            .is_some_and(|label| label.is_some())
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(u, label)| label.as_ref().map(|_| u as Node))
    }
}

impl<Nbs: Neighborhood> GraphEdgeOrder for LabelledGraph<Nbs> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<Nbs: Neighborhood> Labelled for LabelledGraph<Nbs> {
    fn label_of(&self, u: Node) -> &str {
        match &self.labels[u as usize] {
            Some(label) => label,
            None => panic!("Node {u} has been removed"),
        }
    }

    fn lookup(&self, label: &str) -> Option<Node> {
        self.index.get(label).copied()
    }
}

impl<Nbs: Neighborhood> AdjacencyList for LabelledGraph<Nbs> {
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.out_nbs[u as usize].weighted_neighbors()
    }

    fn out_degree_of(&self, u: Node) -> NumNodes {
        self.out_nbs[u as usize].num_of_neighbors()
    }
}

impl<Nbs: Neighborhood> InAdjacencyList for LabelledGraph<Nbs> {
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        if self.kind.directed {
            self.in_nbs[u as usize].neighbors()
        } else {
            self.out_nbs[u as usize].neighbors()
        }
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        if self.kind.directed {
            self.in_nbs[u as usize].num_of_neighbors()
        } else {
            self.out_nbs[u as usize].num_of_neighbors()
        }
    }
}

impl<Nbs: Neighborhood> AdjacencyTest for LabelledGraph<Nbs> {
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight> {
        self.out_nbs[u as usize].weight_of(v)
    }
}

impl<Nbs: Neighborhood> GraphNew for LabelledGraph<Nbs> {
    fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            index: FxHashMap::default(),
            out_nbs: Vec::new(),
            in_nbs: Vec::new(),
            num_nodes: 0,
            num_edges: 0,
        }
    }
}

impl<Nbs: Neighborhood> GraphEdgeEditing for LabelledGraph<Nbs> {
    fn set_edge(&mut self, u: Node, v: Node, weight: Weight) -> Option<Weight> {
        assert!(self.contains_node(u) && self.contains_node(v));
        let weight = self.stored_weight(weight);

        let prev = self.out_nbs[u as usize].set_neighbor(v, weight);
        if self.kind.directed {
            self.in_nbs[v as usize].set_neighbor(u, weight);
        } else if u != v {
            self.out_nbs[v as usize].set_neighbor(u, weight);
        }

        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> Option<Weight> {
        assert!(self.contains_node(u) && self.contains_node(v));

        let weight = self.out_nbs[u as usize].try_remove_neighbor(v)?;
        if self.kind.directed {
            assert!(self.in_nbs[v as usize].try_remove_neighbor(u).is_some());
        } else if u != v {
            assert!(self.out_nbs[v as usize].try_remove_neighbor(u).is_some());
        }

        self.num_edges -= 1;
        Some(weight)
    }
}

impl<Nbs: Neighborhood> GraphVertexEditing for LabelledGraph<Nbs> {
    fn add_vertex(&mut self, label: &str) -> Node {
        if let Some(u) = self.lookup(label) {
            return u;
        }

        let u = self.labels.len() as Node;
        assert!(u < INVALID_NODE);

        self.labels.push(Some(label.to_string()));
        self.index.insert(label.to_string(), u);
        self.out_nbs.push(Nbs::default());
        self.in_nbs.push(Nbs::default());
        self.num_nodes += 1;
        u
    }

    fn remove_node(&mut self, u: Node) {
        if !self.contains_node(u) {
            return;
        }

        let out_nbs = std::mem::take(&mut self.out_nbs[u as usize]);
        let in_nbs = std::mem::take(&mut self.in_nbs[u as usize]);

        let mut removed = 0;
        for v in out_nbs.neighbors() {
            removed += 1;
            if v == u {
                continue;
            }
            if self.kind.directed {
                self.in_nbs[v as usize].try_remove_neighbor(u);
            } else {
                self.out_nbs[v as usize].try_remove_neighbor(u);
            }
        }

        // incoming self-loop was already counted as outgoing edge
        for v in in_nbs.neighbors().filter(|&v| v != u) {
            removed += 1;
            self.out_nbs[v as usize].try_remove_neighbor(u);
        }

        self.num_edges -= removed;

        if let Some(label) = self.labels[u as usize].take() {
            trace!("removed vertex {label} and {removed} incident edges");
            self.index.remove(&label);
        }
        self.num_nodes -= 1;
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_graph,
    Graph,
    (
        GraphNew,
        AdjacencyList,
        InAdjacencyList,
        GraphEdgeEditing,
        GraphVertexEditing
    )
);

test_graph_ops!(
    test_sparse_graph,
    SparseGraph,
    (
        GraphNew,
        AdjacencyList,
        InAdjacencyList,
        GraphEdgeEditing,
        GraphVertexEditing
    )
);

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = Graph::default();
        let a = graph.add_vertex("A");
        assert_eq!(graph.add_vertex("A"), a);
        assert_eq!(graph.number_of_nodes(), 1);
        assert_eq!(graph.label_of(a), "A");
        assert_eq!(graph.node("A").unwrap(), a);
        assert!(matches!(graph.node("B"), Err(GraphError::VertexNotFound(l)) if l == "B"));
    }

    #[test]
    fn add_edge_overwrites_in_place() {
        let mut graph = Graph::undirected_weighted();
        graph.add_edge("A", "B", 5);
        graph.add_edge("A", "C", 1);
        assert_eq!(graph.add_edge("B", "A", 7), Some(5));

        let (a, b, c) = (graph.node("A").unwrap(), graph.node("B").unwrap(), graph.node("C").unwrap());
        assert_eq!(graph.weight_of(a, b), Some(7));
        assert_eq!(graph.weight_of(b, a), Some(7));
        assert_eq!(graph.neighbors_of(a).collect_vec(), vec![b, c]);
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn unweighted_graphs_store_sentinel() {
        let mut graph = Graph::directed_unweighted();
        graph.add_edge("A", "B", 42);

        let (a, b) = (graph.node("A").unwrap(), graph.node("B").unwrap());
        assert_eq!(graph.weight_of(a, b), Some(UNWEIGHTED));
        assert_eq!(graph.edge_cost(a, b), Some(1));
        assert_eq!(graph.edge_cost(b, a), None);
    }

    #[test]
    fn remove_edge_missing_vertex_is_noop() {
        let mut graph = Graph::default();
        graph.add_edge("A", "B", 1);
        assert_eq!(graph.remove_edge("A", "Z"), None);
        assert_eq!(graph.remove_edge("B", "A"), None);
        assert_eq!(graph.remove_edge("A", "B"), Some(1));
        assert!(graph.is_edgeless());
    }

    #[test]
    fn remove_vertex_tombstones_slot() {
        let mut graph = Graph::default();
        graph.add_edges([("A", "B", 1), ("B", "C", 2), ("C", "A", 3), ("B", "B", 4)]);

        assert!(graph.remove_vertex("B"));
        assert!(!graph.remove_vertex("B"));

        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.node_capacity(), 3);
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.labels().collect_vec(), vec!["A", "C"]);

        let b = graph.add_vertex("B");
        assert_eq!(b, 3);
        assert_eq!(graph.out_degree_of(b), 0);
        assert_eq!(graph.in_degree_of(b), 0);
    }

    #[test]
    fn compacted_renumbers_nodes() {
        let mut graph = Graph::default();
        graph.add_edges([("A", "B", 1), ("B", "C", 2), ("C", "D", 3), ("D", "A", 4)]);
        graph.remove_vertex("B");

        let compact = graph.compacted();
        assert_eq!(compact.node_capacity(), 3);
        assert_eq!(compact.number_of_edges(), 2);
        assert_eq!(compact.labels().collect_vec(), vec!["A", "C", "D"]);

        let (c, d, a) = (compact.node("C").unwrap(), compact.node("D").unwrap(), compact.node("A").unwrap());
        assert_eq!(compact.weight_of(c, d), Some(3));
        assert_eq!(compact.weight_of(d, a), Some(4));
        assert_eq!(compact.in_neighbors_of(a).collect_vec(), vec![d]);
    }

    #[test]
    fn clone_is_deep() {
        let mut graph = Graph::default();
        graph.add_edge("A", "B", 1);

        let mut copy = graph.clone();
        copy.remove_vertex("A");

        assert!(graph.has_vertex("A"));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(copy.number_of_edges(), 0);
    }
}
