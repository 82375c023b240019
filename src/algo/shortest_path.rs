/*!
# Shortest Paths

Single-source ([`ShortestPathAlgorithms::dijkstra`], [`ShortestPathAlgorithms::bellman_ford_from`]) and
all-pairs ([`ShortestPathAlgorithms::floyd_warshall`]) shortest paths over edge costs.

Costs are the stored weights for weighted graphs and `1` per edge for unweighted graphs
(see [`AdjacencyList::cost`]); the `-1` sentinel never enters a distance. Unreachable vertices
have distance `None`.
*/

use std::{cmp::Reverse, collections::BinaryHeap};

use log::{debug, trace, warn};

use super::*;

/// Distances and shortest-path tree from a single source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: Node,
    distances: Vec<Option<Weight>>,
    predecessors: Vec<Node>,
}

impl ShortestPaths {
    fn new(capacity: NumNodes, source: Node) -> Self {
        let mut distances = vec![None; capacity as usize];
        distances[source as usize] = Some(0);
        Self {
            source,
            distances,
            predecessors: vec![INVALID_NODE; capacity as usize],
        }
    }

    /// Returns the source of all paths
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the distance from the source to `v` or `None` if `v` is unreachable
    pub fn distance_to(&self, v: Node) -> Option<Weight> {
        self.distances.get(v as usize).copied().flatten()
    }

    /// Returns *true* if there is a path from the source to `v`
    pub fn is_reachable(&self, v: Node) -> bool {
        self.distance_to(v).is_some()
    }

    /// Returns the node before `v` on the shortest path to `v`
    pub fn predecessor_of(&self, v: Node) -> Option<Node> {
        self.predecessors
            .get(v as usize)
            .copied()
            .filter(|&p| p != INVALID_NODE)
    }

    /// Returns the shortest path from the source to `v` including both endpoints
    pub fn path_to(&self, v: Node) -> Option<Vec<Node>> {
        self.distance_to(v)?;

        let mut path = vec![v];
        let mut node = v;
        while node != self.source {
            node = self.predecessor_of(node)?;
            path.push(node);
            if path.len() > self.distances.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Returns an iterator over all reachable nodes and their distances in node order
    pub fn iter(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.map(|d| (v as Node, d)))
    }

    /// Returns the raw distance array indexed by node
    pub fn distances(&self) -> &[Option<Weight>] {
        &self.distances
    }
}

/// A single shortest path with its total cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub distance: Weight,
    pub path: Vec<Node>,
}

/// All-pairs distances over the live vertices of a graph at the time of computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    nodes: Vec<Node>,
    index: Vec<Option<usize>>,
    distances: Vec<Option<Weight>>,
    predecessors: Vec<usize>,
}

impl DistanceMatrix {
    fn slot(&self, i: usize, j: usize) -> usize {
        i * self.nodes.len() + j
    }

    fn position(&self, u: Node) -> Option<usize> {
        self.index.get(u as usize).copied().flatten()
    }

    /// Returns the nodes of the matrix in row order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the distance from `u` to `v` or `None` if `v` is unreachable from `u`
    pub fn distance(&self, u: Node, v: Node) -> Option<Weight> {
        let (i, j) = (self.position(u)?, self.position(v)?);
        self.distances[self.slot(i, j)]
    }

    /// Returns the shortest path from `u` to `v` including both endpoints.
    /// Returns `None` if `v` is unreachable or the path runs into a negative cycle.
    pub fn path(&self, u: Node, v: Node) -> Option<Vec<Node>> {
        let (i, j) = (self.position(u)?, self.position(v)?);
        self.distances[self.slot(i, j)]?;

        let mut path = vec![v];
        let mut k = j;
        while k != i {
            k = self.predecessors[self.slot(i, k)];
            path.push(self.nodes[k]);
            if path.len() > self.nodes.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Returns an iterator over all ordered pairs `(u, v, distance)` with `u != v` and `v` reachable from `u`
    pub fn pairs(&self) -> impl Iterator<Item = (Node, Node, Weight)> + '_ {
        let n = self.nodes.len();
        (0..n)
            .flat_map(move |i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j)
            .filter_map(|(i, j)| {
                self.distances[self.slot(i, j)].map(|d| (self.nodes[i], self.nodes[j], d))
            })
    }

    /// Returns *true* if some vertex lies on a cycle of negative total cost
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.nodes.len()).any(|i| self.distances[self.slot(i, i)].is_some_and(|d| d < 0))
    }
}

/// Shortest-path algorithms over edge costs
pub trait ShortestPathAlgorithms: AdjacencyList + Labelled + Sized {
    /// Computes distances from `source` to every vertex with Dijkstra's algorithm.
    ///
    /// Requires non-negative costs: a negative edge anywhere in the graph is reported as
    /// [`GraphError::NegativeWeight`] before any work is done. Ties between equally distant
    /// vertices are broken by node index. Paths whose cost exceeds [`Weight::MAX`] are not
    /// followed, so their endpoints count as unreachable.
    ///
    /// # Examples
    /// ```
    /// use lwgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(GraphKind::directed_weighted(), [("a", "b", 4), ("a", "c", 1), ("c", "b", 2)]);
    /// let paths = g.dijkstra("a").unwrap();
    ///
    /// assert_eq!(paths.distance_to(g.node("b").unwrap()), Some(3));
    /// assert_eq!(g.labels_of(paths.path_to(g.node("b").unwrap()).unwrap()), vec!["a", "c", "b"]);
    /// ```
    fn dijkstra(&self, source: impl VertexRef) -> Result<ShortestPaths> {
        let source = source.resolve(self)?;
        if let Some(WeightedEdge(u, v, w)) = self
            .weighted_edges(false)
            .find(|e| self.cost(e.weight()) < 0)
        {
            return Err(GraphError::NegativeWeight {
                from: self.label_of(u).to_string(),
                to: self.label_of(v).to_string(),
                weight: w,
            });
        }
        debug!("dijkstra from {} on {} vertices", self.label_of(source), self.len());

        let mut paths = ShortestPaths::new(self.node_capacity(), source);
        let mut settled = self.vertex_bitset_unset();
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0 as Weight, source)));

        while let Some(Reverse((dist, u))) = heap.pop() {
            if settled.set_bit(u) {
                continue;
            }

            for (v, cost) in self.neighbor_costs_of(u) {
                if settled.get_bit(v) {
                    continue;
                }

                let Some(new_dist) = dist.checked_add(cost) else {
                    trace!("dijkstra drops ({}, {}): distance out of range", self.label_of(u), self.label_of(v));
                    continue;
                };
                if paths.distances[v as usize].is_none_or(|d| new_dist < d) {
                    paths.distances[v as usize] = Some(new_dist);
                    paths.predecessors[v as usize] = u;
                    heap.push(Reverse((new_dist, v)));
                }
            }
        }

        Ok(paths)
    }

    /// Computes distances from `source` with the Bellman-Ford algorithm.
    ///
    /// Negative costs are allowed. A negative cycle reachable from `source` is reported as
    /// [`GraphError::NegativeCycleDetected`]; an undirected edge of negative cost is such a cycle.
    /// As with [`ShortestPathAlgorithms::dijkstra`], paths whose cost leaves the range of
    /// [`Weight`] are not followed.
    fn bellman_ford_from(&self, source: impl VertexRef) -> Result<ShortestPaths> {
        let source = source.resolve(self)?;
        debug!("bellman-ford from {} on {} vertices", self.label_of(source), self.len());

        let mut paths = ShortestPaths::new(self.node_capacity(), source);
        let edges: Vec<_> = self
            .weighted_edges(false)
            .map(|WeightedEdge(u, v, w)| (u, v, self.cost(w)))
            .collect();

        let relax = |paths: &mut ShortestPaths| {
            let mut changed = false;
            for &(u, v, cost) in &edges {
                let Some(new_dist) = paths.distances[u as usize].and_then(|d| d.checked_add(cost)) else {
                    continue;
                };
                if paths.distances[v as usize].is_none_or(|d| new_dist < d) {
                    paths.distances[v as usize] = Some(new_dist);
                    paths.predecessors[v as usize] = u;
                    changed = true;
                }
            }
            changed
        };

        for round in 1..self.len() {
            if !relax(&mut paths) {
                trace!("bellman-ford converged after {round} rounds");
                break;
            }
        }

        if relax(&mut paths) {
            warn!("negative cycle reachable from {}", self.label_of(source));
            return Err(GraphError::NegativeCycleDetected);
        }

        Ok(paths)
    }

    /// Computes the shortest path from `source` to `target` with the Bellman-Ford algorithm.
    ///
    /// Reports [`GraphError::NegativeCycleDetected`] if a negative cycle is reachable from `source`
    /// (even if it does not lie on a path to `target`), and [`GraphError::NoPathFound`] if `target`
    /// is unreachable.
    fn bellman_ford(&self, source: impl VertexRef, target: impl VertexRef) -> Result<ShortestPath> {
        let target = target.resolve(self)?;
        let paths = self.bellman_ford_from(source)?;

        match (paths.distance_to(target), paths.path_to(target)) {
            (Some(distance), Some(path)) => Ok(ShortestPath { distance, path }),
            _ => Err(GraphError::NoPathFound),
        }
    }

    /// Computes all-pairs distances with the Floyd-Warshall algorithm.
    ///
    /// Self-loops are ignored and every vertex has distance 0 to itself unless it lies on a
    /// negative cycle. Once a negative cycle shows up the computation stops and the remaining
    /// distances are not meaningful (see [`DistanceMatrix::has_negative_cycle`]). Sums that leave
    /// the range of [`Weight`] are skipped.
    fn floyd_warshall(&self) -> DistanceMatrix {
        let nodes: Vec<Node> = self.vertices().collect();
        let n = nodes.len();
        debug!("floyd-warshall on {n} vertices");

        let mut index = vec![None; self.node_capacity() as usize];
        for (i, &u) in nodes.iter().enumerate() {
            index[u as usize] = Some(i);
        }

        let mut matrix = DistanceMatrix {
            nodes,
            index,
            distances: vec![None; n * n],
            predecessors: vec![0; n * n],
        };

        for i in 0..n {
            let slot = matrix.slot(i, i);
            matrix.distances[slot] = Some(0);
            matrix.predecessors[slot] = i;

            for (v, cost) in self.neighbor_costs_of(matrix.nodes[i]) {
                let Some(j) = matrix.position(v) else {
                    continue;
                };
                if i == j {
                    continue;
                }
                let slot = matrix.slot(i, j);
                matrix.distances[slot] = Some(cost);
                matrix.predecessors[slot] = i;
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(d_ik) = matrix.distances[matrix.slot(i, k)] else {
                    continue;
                };
                for j in 0..n {
                    let Some(d_ij) = matrix.distances[matrix.slot(k, j)].and_then(|d_kj| d_ik.checked_add(d_kj))
                    else {
                        continue;
                    };
                    let slot = matrix.slot(i, j);
                    if matrix.distances[slot].is_none_or(|d| d_ij < d) {
                        matrix.distances[slot] = Some(d_ij);
                        matrix.predecessors[slot] = matrix.predecessors[matrix.slot(k, j)];
                    }
                }
            }

            // distances around a negative cycle only keep shrinking
            if matrix.has_negative_cycle() {
                warn!("floyd-warshall stopped after {} of {n} rounds: negative cycle", k + 1);
                break;
            }
        }

        matrix
    }

    /// Returns the largest distance from `u` to any other vertex, or `None` if some vertex
    /// is unreachable from `u`. Uses [`ShortestPathAlgorithms::dijkstra`].
    fn eccentricity(&self, u: impl VertexRef) -> Result<Option<Weight>> {
        let paths = self.dijkstra(u)?;
        if self.vertices().any(|v| !paths.is_reachable(v)) {
            return Ok(None);
        }

        Ok(paths.iter().map(|(_, d)| d).max())
    }

    /// Returns the minimum eccentricity over all vertices, or `None` if the graph is empty or
    /// no vertex reaches every other vertex.
    fn radius(&self) -> Result<Option<Weight>> {
        let mut radius = None;
        for u in self.vertices() {
            if let Some(ecc) = self.eccentricity(u)? {
                radius = Some(radius.map_or(ecc, |r: Weight| r.min(ecc)));
            }
        }
        Ok(radius)
    }
}

impl<G> ShortestPathAlgorithms for G where G: AdjacencyList + Labelled + Sized {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::directed_weighted();
        graph.add_edges([
            ("A", "B", 4),
            ("A", "C", 1),
            ("C", "B", 2),
            ("B", "D", 1),
            ("C", "D", 5),
            ("D", "E", 3),
        ]);
        graph.add_vertex("F");
        graph
    }

    #[test]
    fn dijkstra_distances() {
        let graph = sample();
        let paths = graph.dijkstra("A").unwrap();

        let dist = |l: &str| paths.distance_to(graph.node(l).unwrap());
        assert_eq!(dist("A"), Some(0));
        assert_eq!(dist("B"), Some(3));
        assert_eq!(dist("D"), Some(4));
        assert_eq!(dist("E"), Some(7));
        assert_eq!(dist("F"), None);

        let path = paths.path_to(graph.node("E").unwrap()).unwrap();
        assert_eq!(graph.labels_of(path), vec!["A", "C", "B", "D", "E"]);
        assert_eq!(paths.path_to(graph.node("F").unwrap()), None);
    }

    #[test]
    fn dijkstra_rejects_negative_weights() {
        let mut graph = sample();
        graph.add_edge("E", "F", -1);
        assert!(matches!(
            graph.dijkstra("A"),
            Err(GraphError::NegativeWeight { weight: -1, .. })
        ));
        assert!(matches!(graph.dijkstra("Z"), Err(GraphError::VertexNotFound(_))));
    }

    #[test]
    fn unweighted_costs_are_hops() {
        let graph = Graph::from_edges(
            GraphKind::undirected_unweighted(),
            [("A", "B", 9), ("B", "C", 9), ("C", "D", 9), ("A", "D", 9)],
        );
        let paths = graph.dijkstra("A").unwrap();
        assert_eq!(paths.distance_to(graph.node("C").unwrap()), Some(2));
        assert_eq!(graph.bellman_ford("A", "C").unwrap().distance, 2);
    }

    #[test]
    fn bellman_ford_negative_edges() {
        let mut graph = sample();
        graph.add_edge("B", "E", -2);

        let result = graph.bellman_ford("A", "E").unwrap();
        assert_eq!(result.distance, 1);
        assert_eq!(graph.labels_of(result.path), vec!["A", "C", "B", "E"]);

        assert!(matches!(graph.bellman_ford("A", "F"), Err(GraphError::NoPathFound)));
        assert!(matches!(graph.bellman_ford("A", "Y"), Err(GraphError::VertexNotFound(_))));
    }

    #[test]
    fn bellman_ford_negative_cycle() {
        let mut graph = sample();
        graph.add_edge("E", "C", -10);

        assert!(matches!(
            graph.bellman_ford("A", "E"),
            Err(GraphError::NegativeCycleDetected)
        ));
        // the cycle is not reachable from F
        assert!(matches!(graph.bellman_ford("F", "A"), Err(GraphError::NoPathFound)));

        let matrix = graph.floyd_warshall();
        assert!(matrix.has_negative_cycle());
    }

    #[test]
    fn floyd_paths() {
        let mut graph = sample();
        graph.add_edge("B", "E", -2);
        let matrix = graph.floyd_warshall();
        let node = |l: &str| graph.node(l).unwrap();

        assert!(!matrix.has_negative_cycle());
        assert_eq!(matrix.distance(node("A"), node("E")), Some(1));
        assert_eq!(matrix.distance(node("E"), node("A")), None);
        assert_eq!(matrix.distance(node("F"), node("F")), Some(0));
        assert_eq!(
            graph.labels_of(matrix.path(node("A"), node("E")).unwrap()),
            vec!["A", "C", "B", "E"]
        );
        assert_eq!(matrix.path(node("D"), node("D")), Some(vec![node("D")]));

        let pairs = matrix.pairs().count();
        assert_eq!(pairs, 4 + 3 + 2 + 1);
    }

    #[test]
    fn distances_out_of_range() {
        let graph = Graph::from_edges(
            GraphKind::directed_weighted(),
            [("A", "B", Weight::MAX), ("B", "C", 1), ("C", "D", 0)],
        );
        let node = |l: &str| graph.node(l).unwrap();

        let paths = graph.dijkstra("A").unwrap();
        assert_eq!(paths.distance_to(node("B")), Some(Weight::MAX));
        assert_eq!(paths.distance_to(node("C")), None);
        assert_eq!(paths.distance_to(node("D")), None);
        assert_eq!(graph.dijkstra("B").unwrap().distance_to(node("D")), Some(1));

        assert_eq!(graph.bellman_ford_from("A").unwrap().distance_to(node("B")), Some(Weight::MAX));
        assert!(matches!(graph.bellman_ford("A", "C"), Err(GraphError::NoPathFound)));

        let matrix = graph.floyd_warshall();
        assert!(!matrix.has_negative_cycle());
        assert_eq!(matrix.distance(node("A"), node("B")), Some(Weight::MAX));
        assert_eq!(matrix.distance(node("A"), node("D")), None);
        assert_eq!(matrix.distance(node("B"), node("D")), Some(1));

        let negative = Graph::from_edges(
            GraphKind::directed_weighted(),
            [("A", "B", Weight::MIN), ("B", "C", -1)],
        );
        let paths = negative.bellman_ford_from("A").unwrap();
        assert_eq!(paths.distance_to(negative.node("B").unwrap()), Some(Weight::MIN));
        assert_eq!(paths.distance_to(negative.node("C").unwrap()), None);
    }

    #[test]
    fn floyd_dense_negative_cycle() {
        let n = 80;
        let mut graph = Graph::directed_weighted();
        for u in 0..n {
            for v in 0..n {
                if u != v {
                    graph.add_edge(&format!("{u}"), &format!("{v}"), -1);
                }
            }
        }

        let matrix = graph.floyd_warshall();
        assert!(matrix.has_negative_cycle());
        assert!(matches!(
            graph.bellman_ford_from("0"),
            Err(GraphError::NegativeCycleDetected)
        ));
    }

    #[test]
    fn floyd_agrees_with_dijkstra() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for n in [5u32, 10, 25] {
            for _ in 0..5 {
                let mut graph = Graph::directed_weighted();
                for u in 0..n {
                    graph.add_vertex(&format!("{u}"));
                }
                for _ in 0..n * 3 {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    graph.add_edge(&format!("{u}"), &format!("{v}"), rng.random_range(0..20));
                }

                let matrix = graph.floyd_warshall();
                for u in graph.vertices() {
                    let paths = graph.dijkstra(u).unwrap();
                    for v in graph.vertices() {
                        assert_eq!(paths.distance_to(v), matrix.distance(u, v));
                    }
                }
            }
        }
    }

    #[test]
    fn radius_and_eccentricity() {
        let graph = Graph::from_edges(
            GraphKind::undirected_weighted(),
            [("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "E", 1)],
        );
        assert_eq!(graph.eccentricity("A").unwrap(), Some(4));
        assert_eq!(graph.eccentricity("C").unwrap(), Some(2));
        assert_eq!(graph.radius().unwrap(), Some(2));

        let directed = sample();
        assert_eq!(directed.radius().unwrap(), None);
        assert_eq!(Graph::default().radius().unwrap(), None);

        let mut single = Graph::default();
        single.add_vertex("A");
        assert_eq!(single.radius().unwrap(), Some(0));
        assert_eq!(
            directed.vertices().map(|u| directed.eccentricity(u).unwrap()).collect_vec(),
            vec![None; 6]
        );
    }
}
