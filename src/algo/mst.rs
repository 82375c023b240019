use std::{cmp::Reverse, collections::BinaryHeap};

use log::{debug, trace, warn};

use super::*;

/// A spanning tree extracted from a graph together with its total cost
#[derive(Debug, Clone)]
pub struct SpanningTree<G> {
    /// Undirected, weighted graph over the labels of the input graph
    pub tree: G,
    /// Sum of the costs of all tree edges
    pub total_weight: Weight,
}

impl<G> SpanningTree<G> {
    /// Consumes the result and returns the tree graph
    pub fn into_graph(self) -> G {
        self.tree
    }
}

/// Minimum spanning trees over edge costs
pub trait MinimumSpanningTree: AdjacencyList + Labelled + Sized {
    /// Computes a minimum spanning tree with Prim's algorithm grown from `start`.
    ///
    /// Every vertex must be reachable from `start`, otherwise [`GraphError::Disconnected`] is
    /// returned and no tree is built. For directed graphs the tree is grown along out-edges only.
    /// Edges are compared by cost (`1` per edge for unweighted graphs); ties go to the edge with
    /// the smaller endpoints. The result is a fresh undirected, weighted graph containing every
    /// vertex and `n - 1` edges; the input is left untouched. A total cost outside the range of
    /// [`Weight`] is reported as [`GraphError::WeightOverflow`].
    ///
    /// # Examples
    /// ```
    /// use lwgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     GraphKind::undirected_weighted(),
    ///     [("a", "b", 1), ("b", "c", 2), ("a", "c", 5)],
    /// );
    /// let mst = g.prim("a").unwrap();
    ///
    /// assert_eq!(mst.total_weight, 3);
    /// assert_eq!(mst.tree.number_of_edges(), 2);
    /// ```
    fn prim(&self, start: impl VertexRef) -> Result<SpanningTree<Self>>
    where
        Self: GraphNew + GraphLabelEditing,
    {
        let start = start.resolve(self)?;
        debug!("prim from {} on {} vertices", self.label_of(start), self.len());

        let reached = self.count_reachable(start);
        if reached != self.len() {
            warn!(
                "prim aborted: {} reaches only {reached} of {} vertices",
                self.label_of(start),
                self.len()
            );
            return Err(GraphError::Disconnected {
                reached,
                total: self.len(),
            });
        }

        let mut tree = Self::new(GraphKind::undirected_weighted());
        for u in self.vertices() {
            tree.add_vertex(self.label_of(u));
        }

        let mut frontier = self.vertex_bitset_unset();
        let mut heap = BinaryHeap::new();
        let mut total_weight = 0;

        let mut next = Some(start);
        while let Some(u) = next.take() {
            frontier.set_bit(u);
            heap.extend(
                self.neighbor_costs_of(u)
                    .filter(|&(v, _)| !frontier.get_bit(v))
                    .map(|(v, cost)| Reverse((cost, u, v))),
            );

            while let Some(Reverse((cost, u, v))) = heap.pop() {
                if frontier.get_bit(v) {
                    continue;
                }

                trace!("prim picks ({}, {}) at cost {cost}", self.label_of(u), self.label_of(v));
                tree.add_edge(self.label_of(u), self.label_of(v), cost);
                total_weight = Weight::checked_add(total_weight, cost).ok_or(GraphError::WeightOverflow)?;
                next = Some(v);
                break;
            }
        }

        Ok(SpanningTree { tree, total_weight })
    }
}

impl<G> MinimumSpanningTree for G where G: AdjacencyList + Labelled + Sized {}
