/*!
# Substructure Generators

This module provides utility methods to generate additional **substructures**
inside an already existing graph.

It allows adding common motifs such as:

- **Paths**
- **Cycles**
- **Cliques**

Vertices are referenced by label and created on demand. Every created edge carries the same weight
(which unweighted graphs replace by `-1` as usual).

# Example

```rust
use lwgraphs::{prelude::*, gens::*};

let mut g = Graph::undirected_weighted();
g.connect_path(["a", "b", "c"], 1);
g.connect_cycle(["c", "d", "e"], 2);
g.connect_clique(["a", "c", "e"], 3, false);

assert_eq!(g.number_of_nodes(), 5);
assert_eq!(g.number_of_edges(), 7);
assert_eq!(g.weight_of(g.node("a").unwrap(), g.node("c").unwrap()), Some(3));
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques)
/// inside an already existing graph.
///
/// Implemented for all graphs that support label editing.
pub trait GeneratorSubstructures {
    /// Connects the given vertices in order with a **simple path**.
    ///
    /// Each consecutive pair of vertices is connected by a single edge.
    ///
    /// # Example
    /// ```rust
    /// use lwgraphs::{prelude::*, gens::*};
    ///
    /// let mut g = Graph::directed_weighted();
    /// g.connect_path(["0", "1", "2", "3"], 5);
    ///
    /// assert!(g.has_edge(0, 1));
    /// assert!(g.has_edge(1, 2));
    /// assert!(g.has_edge(2, 3));
    /// ```
    fn connect_path<P, S>(&mut self, labels_on_path: P, weight: Weight)
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Connects the given vertices with a **cycle**.
    ///
    /// - Consecutive vertices are connected by edges.
    /// - Additionally, the last vertex is connected back to the first.
    fn connect_cycle<C, S>(&mut self, labels_in_cycle: C, weight: Weight)
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Connects all given vertices into a **clique** (complete subgraph).
    ///
    /// - If `with_loops` is `true`, each vertex also gets a self-loop.
    /// - Repeated labels are only considered once.
    fn connect_clique<C, S>(&mut self, labels: C, weight: Weight, with_loops: bool)
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>;
}

impl<G> GeneratorSubstructures for G
where
    G: GraphLabelEditing,
{
    fn connect_path<P, S>(&mut self, labels_on_path: P, weight: Weight)
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (u, v) in labels_on_path
            .into_iter()
            .map(|l| self.add_vertex(l.as_ref()))
            .collect_vec()
            .into_iter()
            .tuple_windows()
        {
            self.set_edge(u, v, weight);
        }
    }

    fn connect_cycle<C, S>(&mut self, labels_in_cycle: C, weight: Weight)
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = labels_in_cycle
            .into_iter()
            .map(|l| self.add_vertex(l.as_ref()))
            .collect_vec();

        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            for (&u, &v) in nodes.iter().tuple_windows() {
                self.set_edge(u, v, weight);
            }
            self.set_edge(last, first, weight);
        }
    }

    fn connect_clique<C, S>(&mut self, labels: C, weight: Weight, with_loops: bool)
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = labels
            .into_iter()
            .map(|l| self.add_vertex(l.as_ref()))
            .sorted_unstable()
            .dedup()
            .collect_vec();

        for &u in &nodes {
            for &v in &nodes {
                let e = Edge(u, v);
                if (!with_loops && e.is_loop()) || (self.is_undirected() && !e.is_normalized()) {
                    continue;
                }

                self.set_edge(u, v, weight);
            }
        }
    }
}
