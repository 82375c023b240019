/// Every graph backend should pass the same store invariants for all four graph kinds
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{ops::*, repr::*, testing::test_graph_ops};
            use fxhash::FxHashMap;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            const KINDS: [GraphKind; 4] = [
                GraphKind::directed_weighted(),
                GraphKind::directed_unweighted(),
                GraphKind::undirected_weighted(),
                GraphKind::undirected_unweighted(),
            ];

            /// Creates at most `m_ub` random labelled edges over labels `v0..v{n-1}`
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<(String, String, Weight)> {
                (0..m_ub).map(|_| {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    let w = rng.random_range(-10..=10);
                    (format!("v{u}"), format!("v{v}"), w)
                }).collect_vec()
            }

            /// Reference model: latest weight per (possibly mirrored) label pair
            fn reference(kind: GraphKind, edges: &[(String, String, Weight)]) -> FxHashMap<(String, String), Weight> {
                let mut adj = FxHashMap::default();
                for (u, v, w) in edges {
                    let w = if kind.weighted { *w } else { UNWEIGHTED };
                    adj.insert((u.clone(), v.clone()), w);
                    if !kind.directed {
                        adj.insert((v.clone(), u.clone()), w);
                    }
                }
                adj
            }

            fn logical_edges(kind: GraphKind, adj: &FxHashMap<(String, String), Weight>) -> NumEdges {
                adj.keys()
                    .filter(|(u, v)| kind.directed || u <= v)
                    .count() as NumEdges
            }

            $(
                test_graph_ops!($graph: $trait);
            )*
        }
    };
    ($graph:ident: GraphNew) => {
        #[test]
        fn graph_new() {
            for kind in KINDS {
                let graph = <$graph>::new(kind);

                assert_eq!(graph.kind(), kind);
                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), 0);
                assert!(graph.is_empty());
                assert_eq!(graph.vertices().count(), 0);
            }
        }
    };
    ($graph:ident: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for kind in KINDS {
                for n in [5 as NumNodes, 10, 30] {
                    for m_ub in [n, n * 3, n * 6] {
                        let edges = random_edges(rng, n, m_ub);
                        let adj = reference(kind, &edges);
                        let graph = <$graph>::from_edges(kind, edges.iter().cloned());

                        assert_eq!(graph.number_of_edges(), logical_edges(kind, &adj));

                        let stored = graph
                            .weighted_edges(false)
                            .map(|WeightedEdge(u, v, w)| {
                                ((graph.label_of(u).to_string(), graph.label_of(v).to_string()), w)
                            })
                            .collect::<FxHashMap<_, _>>();
                        assert_eq!(stored, adj);

                        for u in graph.vertices() {
                            assert_eq!(graph.out_degree_of(u) as usize, graph.neighbors_of(u).count());
                            for (v, w) in graph.weighted_neighbors_of(u) {
                                assert_eq!(graph.weight_of(u, v), Some(w));
                                if !kind.directed {
                                    assert_eq!(graph.weight_of(v, u), Some(w));
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    ($graph:ident: InAdjacencyList) => {
        #[test]
        fn test_in_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(4);

            for kind in KINDS {
                for n in [5 as NumNodes, 10, 30] {
                    let edges = random_edges(rng, n, n * 4);
                    let graph = <$graph>::from_edges(kind, edges);

                    for u in graph.vertices() {
                        let expected = graph
                            .vertices()
                            .filter(|&v| graph.has_edge(v, u))
                            .collect_vec();

                        assert_eq!(graph.in_neighbors_of(u).sorted().collect_vec(), expected);
                        assert_eq!(graph.in_degree_of(u) as usize, expected.len());
                    }
                }
            }
        }
    };
    ($graph:ident: GraphEdgeEditing) => {
        #[test]
        fn test_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for kind in KINDS {
                for n in [5 as NumNodes, 10, 30] {
                    let edges = random_edges(rng, n, n * 4);
                    let mut adj = reference(kind, &edges);
                    let mut graph = <$graph>::from_edges(kind, edges);

                    let mut m = graph.number_of_edges();
                    for _ in 0..n * 2 {
                        let u = format!("v{}", rng.random_range(0..n));
                        let v = format!("v{}", rng.random_range(0..n));

                        let expected = adj.remove(&(u.clone(), v.clone()));
                        if !kind.directed {
                            adj.remove(&(v.clone(), u.clone()));
                        }

                        assert_eq!(graph.remove_edge(&u, &v), expected);
                        if expected.is_some() {
                            m -= 1;
                        }
                        assert_eq!(graph.number_of_edges(), m);
                    }

                    assert_eq!(graph.number_of_edges(), logical_edges(kind, &adj));

                    let nodes = graph.vertices().collect_vec();
                    for u in nodes.iter().copied() {
                        for v in nodes.iter().copied() {
                            graph.try_remove_edge(u, v);
                        }
                    }
                    assert!(graph.is_edgeless());
                    assert_eq!(graph.weighted_edges(false).count(), 0);
                }
            }
        }
    };
    ($graph:ident: GraphVertexEditing) => {
        #[test]
        fn test_graph_vertex_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(6);

            for kind in KINDS {
                for n in [5 as NumNodes, 10, 30] {
                    let edges = random_edges(rng, n, n * 4);
                    let mut adj = reference(kind, &edges);
                    let mut graph = <$graph>::from_edges(kind, edges);

                    for _ in 0..n / 2 {
                        let label = format!("v{}", rng.random_range(0..n));
                        let existed = graph.has_vertex(&label);
                        assert_eq!(graph.remove_vertex(&label), existed);

                        adj.retain(|(u, v), _| *u != label && *v != label);

                        assert!(!graph.has_vertex(&label));
                        assert_eq!(graph.number_of_edges(), logical_edges(kind, &adj));
                        assert!(graph
                            .weighted_edges(false)
                            .all(|WeightedEdge(u, v, _)| graph.contains_node(u) && graph.contains_node(v)));
                        for u in graph.vertices() {
                            assert!(graph.in_neighbors_of(u).all(|v| graph.contains_node(v)));
                        }
                    }

                    let live = graph.vertices().count();
                    assert_eq!(graph.number_of_nodes() as usize, live);
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
