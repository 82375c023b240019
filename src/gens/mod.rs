/*!
# Graph Generators

This module provides generators for whole graphs and for substructures inside existing graphs.

Random generators follow a builder-style pattern:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).prob(p).weights(1..=10)`).
3. Generate edges via `generate()` or `stream()`.

The [`RandomGraph`] trait wraps these edge generators into constructors for whole graphs whose
vertices are labelled `0` to `n - 1`, and [`CompleteGraph`] builds the complete graph over a set of
labels. All graph types implementing [`GraphNew`] and [`GraphLabelEditing`] can use both.

Supported models include:
- G(n,p): Erdős–Rényi model with independent edge probability and uniformly drawn weights
*/

use log::debug;
use rand::Rng;

use crate::prelude::*;

mod gnp;
mod substructures;

pub use gnp::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
///
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of weighted edges over nodes `0..n`.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<WeightedEdge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge>
    where
        R: Rng;
}

/// Creates a graph of the given kind with vertices labelled `0..n` and the given edges between them
fn from_indexed_edges<G, I>(kind: GraphKind, n: NumNodes, edges: I) -> G
where
    G: GraphNew + GraphLabelEditing,
    I: IntoIterator<Item = WeightedEdge>,
{
    let mut graph = G::new(kind);
    let nodes: Vec<Node> = (0..n).map(|u| graph.add_vertex(&u.to_string())).collect();
    for WeightedEdge(u, v, w) in edges {
        graph.set_edge(nodes[u as usize], nodes[v as usize], w);
    }
    graph
}

/// Trait for building full graph instances from common random models.
///
/// Vertices are labelled `0` to `n - 1` and all of them are present even if isolated.
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,p)` graph using edge probability `p` and weights drawn from `weights`.
    /// Undirected graphs consider every unordered pair once.
    fn gnp<R>(
        rng: &mut R,
        kind: GraphKind,
        n: NumNodes,
        p: f64,
        weights: std::ops::RangeInclusive<Weight>,
    ) -> Self
    where
        R: Rng;

    /// Creates a `G(n,p)` graph with no self-loops.
    fn gnp_no_loops<R>(
        rng: &mut R,
        kind: GraphKind,
        n: NumNodes,
        p: f64,
        weights: std::ops::RangeInclusive<Weight>,
    ) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphNew + GraphLabelEditing,
{
    fn gnp<R>(
        rng: &mut R,
        kind: GraphKind,
        n: NumNodes,
        p: f64,
        weights: std::ops::RangeInclusive<Weight>,
    ) -> Self
    where
        R: Rng,
    {
        debug!("generating G({n}, {p}) of kind {kind:?}");
        from_indexed_edges(
            kind,
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .weights(weights)
                .stream(rng)
                .filter(|e| kind.directed || e.edge().is_normalized()),
        )
    }

    fn gnp_no_loops<R>(
        rng: &mut R,
        kind: GraphKind,
        n: NumNodes,
        p: f64,
        weights: std::ops::RangeInclusive<Weight>,
    ) -> Self
    where
        R: Rng,
    {
        debug!("generating loop-free G({n}, {p}) of kind {kind:?}");
        from_indexed_edges(
            kind,
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .weights(weights)
                .stream(rng)
                .filter(|e| !e.edge().is_loop() && (kind.directed || e.edge().is_normalized())),
        )
    }
}

/// Trait for building the complete graph over a set of labels
pub trait CompleteGraph: Sized {
    /// Creates the undirected, unweighted graph in which every pair of distinct labels is
    /// connected. Repeated labels are only added once.
    ///
    /// # Example
    /// ```rust
    /// use lwgraphs::{prelude::*, gens::*};
    ///
    /// let g = Graph::complete_graph(["a", "b", "c", "d"]);
    ///
    /// assert_eq!(g.number_of_nodes(), 4);
    /// assert_eq!(g.number_of_edges(), 6);
    /// assert!(!g.has_self_loop(0));
    /// ```
    fn complete_graph<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;
}

impl<G> CompleteGraph for G
where
    G: GraphNew + GraphLabelEditing,
{
    fn complete_graph<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = G::new(GraphKind::undirected_unweighted());
        graph.connect_clique(labels, UNWEIGHTED, false);
        graph
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn gnp_extremes() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        let empty = Graph::gnp(rng, GraphKind::directed_weighted(), 10, 0.0, 1..=5);
        assert_eq!(empty.number_of_nodes(), 10);
        assert!(empty.is_edgeless());

        let full = Graph::gnp(rng, GraphKind::directed_weighted(), 10, 1.0, 1..=5);
        assert_eq!(full.number_of_edges(), 100);

        let full = Graph::gnp_no_loops(rng, GraphKind::directed_weighted(), 10, 1.0, 1..=5);
        assert_eq!(full.number_of_edges(), 90);

        let full = SparseGraph::gnp_no_loops(rng, GraphKind::undirected_weighted(), 10, 1.0, 1..=5);
        assert_eq!(full.number_of_edges(), 45);
    }

    #[test]
    fn gnp_weights_in_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for _ in 0..10 {
            let graph = Graph::gnp(rng, GraphKind::undirected_weighted(), 20, 0.3, -3..=7);
            assert!(
                graph
                    .weighted_edges(false)
                    .all(|WeightedEdge(_, _, w)| (-3..=7).contains(&w))
            );
            assert_eq!(graph.labels().collect_vec(), (0..20).map(|u| u.to_string()).collect_vec());
        }
    }

    #[test]
    fn gnp_is_seeded() {
        let generate = |seed| {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            Gnp::new().nodes(15).prob(0.2).weights(0..=9).generate(rng)
        };
        assert_eq!(generate(5), generate(5));
    }

    #[test]
    fn complete_graph() {
        let graph = Graph::complete_graph(["a", "b", "c", "b"]);
        assert_eq!(graph.kind(), GraphKind::undirected_unweighted());
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert!(graph.vertices().all(|u| !graph.has_self_loop(u)));

        let empty = Graph::complete_graph(Vec::<String>::new());
        assert!(empty.is_empty());
    }
}
