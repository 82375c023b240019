use num::Integer;

use super::*;

/// Degree queries that follow the incidence semantics of labelled graphs:
/// a directed self-loop is one incident edge, not two.
pub trait Degrees: InAdjacencyList + AdjacencyTest + Labelled + Sized {
    /// Returns the number of edges incident to `u`.
    ///
    /// For directed graphs this is in-degree plus out-degree, counting a self-loop once.
    /// For undirected graphs every incident edge is stored once at `u`, so this is the out-degree.
    /// ** Panics if `u` is not a live node **
    fn degree_of(&self, u: Node) -> NumNodes {
        if self.is_directed() {
            self.in_degree_of(u) + self.out_degree_of(u) - self.has_self_loop(u) as NumNodes
        } else {
            self.out_degree_of(u)
        }
    }

    /// Label-level [`Degrees::degree_of`]
    fn degree(&self, v: impl VertexRef) -> Result<NumNodes> {
        Ok(self.degree_of(v.resolve(self)?))
    }

    /// Returns the number of vertices with an edge pointing at `v`.
    /// For undirected graphs this equals [`Degrees::degree`].
    fn in_degree(&self, v: impl VertexRef) -> Result<NumNodes> {
        Ok(self.in_degree_of(v.resolve(self)?))
    }

    /// Returns the degree of every live node as `(node, degree)` pairs in node order
    fn degrees(&self) -> impl Iterator<Item = (Node, NumNodes)> + '_ {
        self.vertices().map(|u| (u, self.degree_of(u)))
    }

    /// Returns all nodes of odd degree
    fn odd_degree_vertices(&self) -> Vec<Node> {
        self.degrees()
            .filter_map(|(u, d)| d.is_odd().then_some(u))
            .collect()
    }

    /// Returns every other vertex that shares no edge with `v` in either direction.
    ///
    /// Only defined for directed graphs; undirected graphs report [`GraphError::NotDirected`].
    fn non_adjacent_vertices(&self, v: impl VertexRef) -> Result<Vec<Node>> {
        let u = v.resolve(self)?;
        if !self.is_directed() {
            return Err(GraphError::NotDirected);
        }

        let mut adjacent = self.vertex_bitset_unset();
        adjacent.set_bit(u);
        for w in self.neighbors_of(u).chain(self.in_neighbors_of(u)) {
            adjacent.set_bit(w);
        }

        Ok(self.vertices().filter(|&w| !adjacent.get_bit(w)).collect())
    }
}

impl<G> Degrees for G where G: InAdjacencyList + AdjacencyTest + Labelled + Sized {}
