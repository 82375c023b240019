/*!
# Maximum Flow

This module computes maximum `(s, t)`-flows with the **Edmonds–Karp** algorithm, i.e.
Ford–Fulkerson where every augmenting path is a shortest path in the residual network.

## Core concepts
- The **capacity** of an edge is its cost: the stored weight for weighted graphs and `1` for
  unweighted graphs. Negative weights are treated as capacity `0`.
- An undirected edge `{u, v}` contributes capacity in both directions.
- The **residual capacity** of `(u, v)` is its capacity minus the current flow on it. Pushing flow
  along `(u, v)` lowers the flow on `(v, u)` by the same amount, which makes it available again.

## Implementations
- [`ResidualNetwork`] stores dense capacity and flow matrices over the live vertices.
- [`EdmondsKarp`] iterates over augmenting paths, updating the residual network as it goes.
- [`MaxFlowAlgorithms::max_flow`] runs the iterator to completion and returns a [`MaxFlow`].
*/

use std::collections::VecDeque;

use log::{debug, trace};

use super::*;

/// Residual network over the live vertices of a graph.
///
/// Vertices are renumbered to `0..n`; `labels` maps these local indices back to graph nodes.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    s: usize,
    t: usize,
    n: usize,
    capacity: Vec<Weight>,
    flow: Vec<Weight>,
    labels: Vec<Node>,
    index: Vec<Option<usize>>,
}

impl ResidualNetwork {
    /// Builds the residual network of `graph` for source `s` and target `t` with zero flow.
    /// ** Panics if `s` or `t` is not a live node **
    pub fn new<G>(graph: &G, s: Node, t: Node) -> Self
    where
        G: AdjacencyList,
    {
        assert!(graph.contains_node(s) && graph.contains_node(t));

        let labels: Vec<Node> = graph.vertices().collect();
        let n = labels.len();
        let mut index = vec![None; graph.node_capacity() as usize];
        for (i, &u) in labels.iter().enumerate() {
            index[u as usize] = Some(i);
        }

        let mut capacity = vec![0; n * n];
        for (i, &u) in labels.iter().enumerate() {
            for (v, cost) in graph.neighbor_costs_of(u) {
                if let Some(j) = index[v as usize].filter(|&j| j != i) {
                    capacity[i * n + j] = cost.max(0);
                }
            }
        }

        Self {
            s: index[s as usize].unwrap_or_default(),
            t: index[t as usize].unwrap_or_default(),
            n,
            capacity,
            flow: vec![0; n * n],
            labels,
            index,
        }
    }

    /// Returns the graph node of local index `i`
    fn label(&self, i: usize) -> Node {
        self.labels[i]
    }

    fn residual(&self, i: usize, j: usize) -> Weight {
        self.capacity[i * self.n + j] - self.flow[i * self.n + j]
    }

    fn push(&mut self, i: usize, j: usize, amount: Weight) {
        self.flow[i * self.n + j] += amount;
        self.flow[j * self.n + i] -= amount;
    }

    /// Returns the source node
    pub fn source(&self) -> Node {
        self.label(self.s)
    }

    /// Returns the target node
    pub fn target(&self) -> Node {
        self.label(self.t)
    }

    /// Returns the capacity of `(u, v)`; `0` if there is no such edge
    pub fn capacity_of(&self, u: Node, v: Node) -> Weight {
        self.local(u, v).map_or(0, |(i, j)| self.capacity[i * self.n + j])
    }

    /// Returns the net flow currently routed from `u` to `v`; negative if it runs from `v` to `u`
    pub fn flow_of(&self, u: Node, v: Node) -> Weight {
        self.local(u, v).map_or(0, |(i, j)| self.flow[i * self.n + j])
    }

    fn local(&self, u: Node, v: Node) -> Option<(usize, usize)> {
        let i = self.index.get(u as usize).copied().flatten()?;
        let j = self.index.get(v as usize).copied().flatten()?;
        Some((i, j))
    }
}

/// An augmenting path with the amount of flow pushed along it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    pub path: Vec<Node>,
    pub bottleneck: Weight,
}

/// Implementation of the Edmonds–Karp algorithm.
///
/// Each call to [`Iterator::next`] finds a shortest augmenting path by BFS over edges with positive
/// residual capacity, pushes the path's bottleneck along it and returns the path.
/// The iterator terminates when the target is no longer reachable in the residual network.
pub struct EdmondsKarp {
    residual_network: ResidualNetwork,
    predecessor: Vec<usize>,
    bottleneck: Vec<Weight>,
}

impl EdmondsKarp {
    /// Creates a new Edmonds–Karp solver from a given residual network.
    pub fn new(residual_network: ResidualNetwork) -> Self {
        let n = residual_network.n;
        Self {
            residual_network,
            predecessor: vec![0; n],
            bottleneck: vec![0; n],
        }
    }

    /// Performs BFS to find an augmenting path from source to target.
    /// Updates predecessor and bottleneck arrays and returns whether the target was reached.
    fn bfs(&mut self) -> bool {
        let network = &self.residual_network;
        let (s, t) = (network.s, network.t);

        let mut visited = NodeBitSet::new(network.n as NumNodes);
        let mut queue = VecDeque::from([s]);
        visited.set_bit(s as Node);
        self.bottleneck[s] = Weight::MAX;

        while let Some(u) = queue.pop_front() {
            for v in 0..network.n {
                let residual = network.residual(u, v);
                if residual <= 0 || visited.set_bit(v as Node) {
                    continue;
                }

                self.predecessor[v] = u;
                self.bottleneck[v] = self.bottleneck[u].min(residual);
                if v == t {
                    return true;
                }
                queue.push_back(v);
            }
        }

        false
    }

    /// Returns all augmenting paths until the flow is maximal
    pub fn augmenting_paths(&mut self) -> Vec<AugmentingPath> {
        self.collect()
    }

    /// Returns the total flow routed from source to target so far
    pub fn flow_value(&self) -> Weight {
        let network = &self.residual_network;
        (0..network.n).map(|j| network.flow[network.s * network.n + j]).sum()
    }

    /// Returns every node reachable from the source in the residual network.
    /// After termination this is the source side of a minimum cut.
    pub fn source_side(&self) -> Vec<Node> {
        let network = &self.residual_network;
        let mut visited = NodeBitSet::new(network.n as NumNodes);
        let mut queue = VecDeque::from([network.s]);
        visited.set_bit(network.s as Node);

        let mut side = Vec::new();
        while let Some(u) = queue.pop_front() {
            side.push(network.label(u));
            for v in 0..network.n {
                if network.residual(u, v) > 0 && !visited.set_bit(v as Node) {
                    queue.push_back(v);
                }
            }
        }

        side.sort_unstable();
        side
    }

    /// Consumes the solver and returns the underlying residual network
    pub fn take(self) -> ResidualNetwork {
        self.residual_network
    }
}

impl Iterator for EdmondsKarp {
    type Item = AugmentingPath;

    fn next(&mut self) -> Option<Self::Item> {
        let (s, t) = (self.residual_network.s, self.residual_network.t);
        if s == t || !self.bfs() {
            return None;
        }

        let bottleneck = self.bottleneck[t];
        let mut path = vec![self.residual_network.label(t)];
        let mut v = t;
        while v != s {
            let u = self.predecessor[v];
            self.residual_network.push(u, v, bottleneck);
            path.push(self.residual_network.label(u));
            v = u;
        }
        path.reverse();

        Some(AugmentingPath { path, bottleneck })
    }
}

/// Result of a maximum flow computation
#[derive(Debug, Clone)]
pub struct MaxFlow {
    /// Total flow from source to target
    pub value: Weight,
    /// Augmenting paths in the order they were found
    pub paths: Vec<AugmentingPath>,
    source_side: Vec<Node>,
    network: ResidualNetwork,
}

impl MaxFlow {
    /// Returns the flow routed along the edge `(u, v)`, never negative
    pub fn flow_on(&self, u: Node, v: Node) -> Weight {
        self.network.flow_of(u, v).max(0)
    }

    /// Returns the nodes on the source side of a minimum cut in ascending order
    pub fn source_side(&self) -> &[Node] {
        &self.source_side
    }

    /// Returns all edges of a minimum cut: edges of positive capacity leaving the source side.
    /// Their capacities sum up to [`MaxFlow::value`].
    pub fn min_cut(&self) -> Vec<WeightedEdge> {
        let network = &self.network;
        let mut on_source_side = vec![false; network.n];
        for &u in &self.source_side {
            if let Some(i) = network.index[u as usize] {
                on_source_side[i] = true;
            }
        }

        let mut cut = Vec::new();
        for i in (0..network.n).filter(|&i| on_source_side[i]) {
            for j in (0..network.n).filter(|&j| !on_source_side[j]) {
                let capacity = network.capacity[i * network.n + j];
                if capacity > 0 {
                    cut.push(WeightedEdge(network.label(i), network.label(j), capacity));
                }
            }
        }
        cut
    }

    /// Returns the residual network after the last augmentation
    pub fn residual_network(&self) -> &ResidualNetwork {
        &self.network
    }
}

/// Maximum flows over edge costs as capacities
pub trait MaxFlowAlgorithms: AdjacencyList + Labelled + Sized {
    /// Computes a maximum flow from `source` to `sink` with Edmonds–Karp.
    ///
    /// A flow from a vertex to itself is `0`.
    ///
    /// # Examples
    /// ```
    /// use lwgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(
    ///     GraphKind::directed_weighted(),
    ///     [("s", "a", 3), ("s", "b", 2), ("a", "t", 2), ("b", "t", 3)],
    /// );
    /// assert_eq!(g.max_flow("s", "t").unwrap().value, 4);
    /// ```
    fn max_flow(&self, source: impl VertexRef, sink: impl VertexRef) -> Result<MaxFlow> {
        let (s, t) = (source.resolve(self)?, sink.resolve(self)?);
        debug!(
            "max flow from {} to {} on {} vertices",
            self.label_of(s),
            self.label_of(t),
            self.len()
        );

        let mut ek = EdmondsKarp::new(ResidualNetwork::new(self, s, t));
        let paths: Vec<_> = ek
            .by_ref()
            .inspect(|p| trace!("augmenting {:?} by {}", self.labels_of(p.path.iter().copied()), p.bottleneck))
            .collect();

        let value = paths.iter().map(|p| p.bottleneck).sum();
        debug_assert_eq!(value, ek.flow_value());

        Ok(MaxFlow {
            value,
            paths,
            source_side: ek.source_side(),
            network: ek.take(),
        })
    }
}

impl<G> MaxFlowAlgorithms for G where G: AdjacencyList + Labelled + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    const EDGES: [(&str, &str); 13] = [
        ("0", "1"),
        ("0", "2"),
        ("0", "3"),
        ("1", "2"),
        ("2", "3"),
        ("2", "6"),
        ("3", "6"),
        ("4", "2"),
        ("4", "7"),
        ("5", "1"),
        ("5", "7"),
        ("6", "7"),
        ("6", "5"),
    ];

    fn unit_graph(kind: GraphKind) -> Graph {
        Graph::from_edges(kind, EDGES.iter().map(|&(u, v)| (u, v, 1)))
    }

    #[test]
    fn edge_disjoint_paths() {
        let directed = unit_graph(GraphKind::directed_unweighted());
        assert_eq!(directed.max_flow("0", "7").unwrap().value, 2);

        let undirected = unit_graph(GraphKind::undirected_unweighted());
        let flow = undirected.max_flow("0", "7").unwrap();
        assert_eq!(flow.value, 3);
        assert_eq!(flow.paths.len(), 3);
        assert!(flow.paths.iter().all(|p| p.bottleneck == 1));
    }

    #[test]
    fn diamond() {
        let graph = Graph::from_edges(
            GraphKind::directed_weighted(),
            [("s", "a", 3), ("s", "b", 2), ("a", "t", 2), ("b", "t", 3)],
        );
        let node = |l: &str| graph.node(l).unwrap();

        let flow = graph.max_flow("s", "t").unwrap();
        assert_eq!(flow.value, 4);
        assert_eq!(flow.flow_on(node("s"), node("a")), 2);
        assert_eq!(flow.flow_on(node("s"), node("b")), 2);
        assert_eq!(flow.flow_on(node("a"), node("s")), 0);
        assert_eq!(flow.min_cut().iter().map(|e| e.2).sum::<Weight>(), 4);

        let reverse = graph.max_flow("t", "s").unwrap();
        assert_eq!(reverse.value, 0);
        assert!(reverse.paths.is_empty());
    }

    #[test]
    fn residual_edges_are_used() {
        // the first path s-a-b-t blocks s-c-b-t; the second one has to cancel the flow on a-b
        let graph = Graph::from_edges(
            GraphKind::directed_weighted(),
            [("s", "a", 1), ("a", "b", 1), ("s", "c", 1), ("c", "b", 1), ("b", "t", 1), ("a", "d", 1), ("d", "t", 1)],
        );
        let flow = graph.max_flow("s", "t").unwrap();
        assert_eq!(flow.value, 2);
        assert_eq!(
            flow.paths.iter().map(|p| graph.labels_of(p.path.iter().copied())).collect_vec(),
            vec![vec!["s", "a", "b", "t"], vec!["s", "c", "b", "a", "d", "t"]]
        );
        assert_eq!(flow.flow_on(graph.node("a").unwrap(), graph.node("b").unwrap()), 0);
    }

    #[test]
    fn degenerate_inputs() {
        let mut graph = Graph::from_edges(GraphKind::directed_weighted(), [("s", "t", -5), ("s", "s", 7)]);
        graph.add_vertex("x");

        assert_eq!(graph.max_flow("s", "t").unwrap().value, 0);
        assert_eq!(graph.max_flow("s", "s").unwrap().value, 0);
        assert_eq!(graph.max_flow("s", "x").unwrap().value, 0);
        assert!(matches!(graph.max_flow("s", "y"), Err(GraphError::VertexNotFound(_))));
    }

    #[test]
    fn flow_equals_min_cut() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [4u32, 8, 16] {
            for _ in 0..10 {
                let edges = (0..n * 3)
                    .map(|_| {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);
                        (format!("{u}"), format!("{v}"), rng.random_range(0..10))
                    })
                    .collect_vec();
                let graph = Graph::from_edges(GraphKind::directed_weighted(), edges);

                let nodes = graph.vertices().collect_vec();
                let (s, t) = (nodes[0], nodes[nodes.len() - 1]);
                if s == t {
                    continue;
                }
                let flow = graph.max_flow(s, t).unwrap();

                let cut = flow.min_cut();
                assert_eq!(cut.iter().map(|e| e.2).sum::<Weight>(), flow.value);
                assert!(flow.source_side().contains(&s));
                assert!(!flow.source_side().contains(&t));

                // conservation at every inner vertex
                for &u in nodes.iter().filter(|&&u| u != s && u != t) {
                    let inflow: Weight = nodes.iter().map(|&v| flow.flow_on(v, u)).sum();
                    let outflow: Weight = nodes.iter().map(|&v| flow.flow_on(u, v)).sum();
                    assert_eq!(inflow, outflow);
                }
            }
        }
    }
}
