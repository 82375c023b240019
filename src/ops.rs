use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, Result},
    *,
};

/// Graph-wide flags fixed at construction time.
///
/// Graphs are directed and weighted by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphKind {
    /// Edges `(u, v)` and `(v, u)` are distinct
    pub directed: bool,
    /// Edges carry a real weight; otherwise every weight is stored as [`UNWEIGHTED`]
    pub weighted: bool,
}

impl Default for GraphKind {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl GraphKind {
    pub const fn new(directed: bool, weighted: bool) -> Self {
        Self { directed, weighted }
    }

    pub const fn directed_weighted() -> Self {
        Self::new(true, true)
    }

    pub const fn directed_unweighted() -> Self {
        Self::new(true, false)
    }

    pub const fn undirected_weighted() -> Self {
        Self::new(false, true)
    }

    pub const fn undirected_unweighted() -> Self {
        Self::new(false, false)
    }
}

/// Provides the runtime type of a graph
pub trait GraphType {
    /// Returns the flags the graph was created with
    fn kind(&self) -> GraphKind;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        self.kind().directed
    }

    /// Returns *true* if the graph is undirected
    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }

    /// Returns *true* if edges carry real weights
    fn is_weighted(&self) -> bool {
        self.kind().weighted
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of live nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns an upper bound (exclusive) on every node index ever handed out.
    /// Per-node arrays indexed by `Node` must have at least this length.
    fn node_capacity(&self) -> NumNodes;

    /// Returns *true* if `u` is a live node of the graph
    fn contains_node(&self, u: Node) -> bool;

    /// Returns an iterator over all live nodes in ascending index order
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns empty bitset with one entry per node slot
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.node_capacity())
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of logical edges; an undirected edge counts once
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_edgeless(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Maps between user labels and node indices
pub trait Labelled: GraphNodeOrder {
    /// Returns the label of a live node.
    /// ** Panics if `u` is not a live node **
    fn label_of(&self, u: Node) -> &str;

    /// Returns the node carrying `label` if present
    fn lookup(&self, label: &str) -> Option<Node>;

    /// Like [`Labelled::lookup`] but reports a missing label as [`GraphError::VertexNotFound`]
    fn node(&self, label: &str) -> Result<Node> {
        self.lookup(label)
            .ok_or_else(|| GraphError::VertexNotFound(label.to_string()))
    }

    /// Returns *true* if a vertex with the given label exists
    fn has_vertex(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    /// Returns an iterator over the labels of all live nodes in node order
    fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices().map(|u| self.label_of(u))
    }

    /// Translates a sequence of nodes into owned labels
    fn labels_of<I>(&self, nodes: I) -> Vec<String>
    where
        I: IntoIterator<Item = Node>,
    {
        nodes
            .into_iter()
            .map(|u| self.label_of(u).to_string())
            .collect()
    }
}

/// Anything that identifies a vertex of a labelled graph: its label or its node index.
///
/// Algorithms taking user input accept `impl VertexRef` and report unknown vertices
/// as [`GraphError::VertexNotFound`] instead of panicking.
pub trait VertexRef {
    /// Returns the live node referred to by `self`
    fn resolve<G: Labelled + ?Sized>(&self, graph: &G) -> Result<Node>;
}

impl VertexRef for Node {
    fn resolve<G: Labelled + ?Sized>(&self, graph: &G) -> Result<Node> {
        if graph.contains_node(*self) {
            Ok(*self)
        } else {
            Err(GraphError::VertexNotFound(format!("#{self}")))
        }
    }
}

impl VertexRef for &str {
    fn resolve<G: Labelled + ?Sized>(&self, graph: &G) -> Result<Node> {
        graph.node(self)
    }
}

impl VertexRef for String {
    fn resolve<G: Labelled + ?Sized>(&self, graph: &G) -> Result<Node> {
        graph.node(self)
    }
}

impl VertexRef for &String {
    fn resolve<G: Labelled + ?Sized>(&self, graph: &G) -> Result<Node> {
        graph.node(self)
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + GraphType {
    /// Returns an iterator over the out-neighbors of `u` together with the stored weights.
    /// For undirected graphs these are all neighbors.
    /// ** Panics if `u` is not a live node **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns the number of stored adjacency entries of `u`
    /// ** Panics if `u` is not a live node **
    fn out_degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the (open) out-neighborhood of a given vertex.
    /// ** Panics if `u` is not a live node **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.weighted_neighbors_of(u).map(|(v, _)| v)
    }

    /// Translates a stored weight into the cost algorithms work with:
    /// the weight itself for weighted graphs and `1` for unweighted graphs.
    fn cost(&self, weight: Weight) -> Weight {
        if self.is_weighted() { weight } else { 1 }
    }

    /// Like [`AdjacencyList::weighted_neighbors_of`] but yields costs instead of stored weights
    fn neighbor_costs_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        let weighted = self.is_weighted();
        self.weighted_neighbors_of(u)
            .map(move |(v, w)| (v, if weighted { w } else { 1 }))
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn weighted_edges_of(
        &self,
        u: Node,
        only_normalized: bool,
    ) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.weighted_neighbors_of(u)
            .map(move |(v, w)| WeightedEdge(u, v, w))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all stored adjacency entries in node order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered,
    /// which lists every undirected edge exactly once.
    fn weighted_edges(&self, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices()
            .flat_map(move |u| self.weighted_edges_of(u, only_normalized))
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.weighted_edges(only_normalized).map(|e| e.edge())
    }

    /// Returns all edges in the graph in sorted order.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted().collect()
    }
}

/// Access to incoming neighborhoods
pub trait InAdjacencyList: AdjacencyList {
    /// Returns an iterator over nodes `v` with edges `(v, u)`.
    /// For undirected graphs this equals the neighborhood of `u`.
    /// ** Panics if `u` is not a live node **
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of nodes `v` with an edge `(v, u)`
    /// ** Panics if `u` is not a live node **
    fn in_degree_of(&self, u: Node) -> NumNodes;
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphType {
    /// Returns the weight stored for `(u, v)` or `None` if there is no such edge.
    /// ** Panics if `u` is not a live node **
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight>;

    /// Returns the cost of `(u, v)`: the stored weight for weighted graphs, `1` otherwise.
    /// ** Panics if `u` is not a live node **
    fn edge_cost(&self, u: Node, v: Node) -> Option<Weight> {
        let weighted = self.is_weighted();
        self.weight_of(u, v).map(|w| if weighted { w } else { 1 })
    }

    /// Returns *true* if the egde (u,v) exists in the graph.
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.weight_of(u, v).is_some()
    }

    /// Returns *true* if a self-loop (u,u) exists.
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph of the given kind
    fn new(kind: GraphKind) -> Self;
}

/// Provides functions to insert/delete edges between existing nodes
pub trait GraphEdgeEditing: AdjacencyTest {
    /// Writes the edge `(u, v)` (and `(v, u)` for undirected graphs) overwriting any prior weight.
    /// The weight is replaced by [`UNWEIGHTED`] for unweighted graphs.
    /// Returns the previously stored weight.
    /// ** Panics if `u` or `v` is not a live node **
    fn set_edge(&mut self, u: Node, v: Node, weight: Weight) -> Option<Weight>;

    /// Removes the edge `(u, v)` (and its mirror for undirected graphs).
    /// Returns the removed weight or `None` if the edge was not present.
    /// ** Panics if `u` or `v` is not a live node **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> Option<Weight>;
}

/// Provides functions to insert/delete vertices
pub trait GraphVertexEditing: Labelled {
    /// Returns the node carrying `label`, creating it with an empty neighborhood if absent
    fn add_vertex(&mut self, label: &str) -> Node;

    /// Removes all edges incident to `u` in either direction and then `u` itself.
    /// Non-op if `u` is not a live node.
    fn remove_node(&mut self, u: Node);
}

/// Label-level editing API. Implemented for every graph that can edit nodes and edges.
pub trait GraphLabelEditing: GraphEdgeEditing + GraphVertexEditing {
    /// Ensures both vertices exist and writes the edge between them, overwriting any prior weight.
    /// Returns the previously stored weight.
    fn add_edge(&mut self, label1: &str, label2: &str, weight: Weight) -> Option<Weight> {
        let u = self.add_vertex(label1);
        let v = self.add_vertex(label2);
        self.set_edge(u, v, weight)
    }

    /// Adds all edges in the collection
    fn add_edges<I, S, T>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (S, T, Weight)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        for (u, v, w) in edges {
            self.add_edge(u.as_ref(), v.as_ref(), w);
        }
    }

    /// Removes the edge between both labels. Non-op if either vertex or the edge is missing.
    fn remove_edge(&mut self, label1: &str, label2: &str) -> Option<Weight> {
        let u = self.lookup(label1)?;
        let v = self.lookup(label2)?;
        self.try_remove_edge(u, v)
    }

    /// Removes the vertex and every incident edge. Returns *false* if the label was unknown.
    fn remove_vertex(&mut self, label: &str) -> bool {
        match self.lookup(label) {
            Some(u) => {
                self.remove_node(u);
                true
            }
            None => false,
        }
    }
}

impl<G> GraphLabelEditing for G where G: GraphEdgeEditing + GraphVertexEditing {}

/// A super trait for creating a graph from scratch from a set of labelled edges
pub trait GraphFromScratch: Sized {
    /// Create a graph of the given kind from an iterator over `(label, label, weight)` triples
    fn from_edges<I, S, T>(kind: GraphKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (S, T, Weight)>,
        S: AsRef<str>,
        T: AsRef<str>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphLabelEditing,
{
    fn from_edges<I, S, T>(kind: GraphKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (S, T, Weight)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut graph = Self::new(kind);
        graph.add_edges(edges);
        graph
    }
}
