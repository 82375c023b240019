//! End-to-end checks of the store invariants and the algorithm suite through the public API.

use itertools::Itertools;
use lwgraphs::{algo::*, gens::*, prelude::*};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_labelled_edges(rng: &mut impl Rng, n: u32, m: u32) -> Vec<(String, String, Weight)> {
    (0..m)
        .map(|_| {
            (
                format!("v{}", rng.random_range(0..n)),
                format!("v{}", rng.random_range(0..n)),
                rng.random_range(-5..=20),
            )
        })
        .collect()
}

// --- store ---

#[test]
fn undirected_adjacency_stays_symmetric() {
    let rng = &mut Pcg64Mcg::seed_from_u64(100);
    let mut graph = Graph::undirected_weighted();

    for step in 0..500 {
        let u = format!("v{}", rng.random_range(0..12));
        let v = format!("v{}", rng.random_range(0..12));
        match step % 5 {
            0 => {
                graph.remove_edge(&u, &v);
            }
            1 => {
                graph.remove_vertex(&u);
            }
            _ => {
                graph.add_edge(&u, &v, rng.random_range(-10..=10));
            }
        }

        for a in graph.vertices() {
            for b in graph.vertices() {
                assert_eq!(graph.has_edge(a, b), graph.has_edge(b, a));
                assert_eq!(graph.weight_of(a, b), graph.weight_of(b, a));
            }
        }
    }
}

#[test]
fn add_edge_keeps_latest_weight() {
    for kind in [GraphKind::directed_weighted(), GraphKind::undirected_weighted()] {
        let mut graph = Graph::new(kind);
        assert_eq!(graph.add_edge("A", "B", 3), None);
        assert_eq!(graph.add_edge("A", "B", 8), Some(3));

        let (a, b) = (graph.node("A").unwrap(), graph.node("B").unwrap());
        assert_eq!(graph.weight_of(a, b), Some(8));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.out_degree_of(a), 1);
    }

    let mut unweighted = Graph::undirected_unweighted();
    unweighted.add_edge("A", "B", 3);
    assert_eq!(unweighted.weight_of(0, 1), Some(UNWEIGHTED));
}

#[test]
fn removed_vertex_leaves_no_references() {
    let rng = &mut Pcg64Mcg::seed_from_u64(101);

    for kind in [GraphKind::directed_weighted(), GraphKind::undirected_unweighted()] {
        let mut graph = SparseGraph::from_edges(kind, random_labelled_edges(rng, 15, 60));
        let victims = (0..5).map(|i| format!("v{}", i * 3)).collect_vec();

        for label in &victims {
            graph.remove_vertex(label);
            assert!(graph.lookup(label).is_none());
        }

        assert!(graph.labels().all(|l| !victims.iter().any(|v| v.as_str() == l)));
        for WeightedEdge(u, v, _) in graph.weighted_edges(false) {
            assert!(graph.contains_node(u) && graph.contains_node(v));
        }
        for u in graph.vertices() {
            assert!(graph.in_neighbors_of(u).all(|v| graph.contains_node(v)));
        }

        // removing an unknown vertex is a no-op
        let before = graph.clone();
        assert!(!graph.remove_vertex("unknown"));
        assert_eq!(graph.ordered_edges(false), before.ordered_edges(false));
    }
}

#[test]
fn degree_counts_self_loops_once() {
    let rng = &mut Pcg64Mcg::seed_from_u64(102);

    for kind in [GraphKind::directed_weighted(), GraphKind::undirected_weighted()] {
        let graph = Graph::from_edges(kind, random_labelled_edges(rng, 10, 40));

        for u in graph.vertices() {
            let incident = graph
                .edges(!kind.directed)
                .filter(|e| e.0 == u || e.1 == u)
                .count();
            assert_eq!(graph.degree(u).unwrap() as usize, incident);
        }
    }
}

#[test]
fn shared_graph_guards_every_operation() {
    let shared = SharedGraph::new(Graph::undirected_weighted());
    let handles = (0..4)
        .map(|t| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for i in 0..10 {
                    shared.write(|g| g.add_edge(&format!("t{t}"), &format!("x{i}"), i));
                }
            })
        })
        .collect_vec();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.read(|g| g.number_of_edges()), 40);
    assert_eq!(shared.read(|g| g.degree("x3").unwrap()), 4);
}

// --- algorithms ---

#[test]
fn dijkstra_agrees_with_floyd_warshall() {
    init_logging();
    let rng = &mut Pcg64Mcg::seed_from_u64(103);

    for kind in [GraphKind::directed_weighted(), GraphKind::undirected_weighted(), GraphKind::directed_unweighted()] {
        for _ in 0..5 {
            let graph = Graph::gnp(rng, kind, 20, 0.15, 0..=30);
            let matrix = graph.floyd_warshall();

            for s in graph.vertices() {
                let paths = graph.dijkstra(s).unwrap();
                for v in graph.vertices() {
                    assert_eq!(paths.distance_to(v), matrix.distance(s, v));
                }
            }
        }
    }
}

#[test]
fn bellman_ford_reports_negative_cycles() {
    init_logging();
    let mut graph = Graph::directed_weighted();
    graph.add_edges([("S", "A", 1), ("A", "B", 2), ("B", "C", -4), ("C", "A", 1), ("C", "T", 2)]);

    assert!(matches!(graph.bellman_ford("S", "T"), Err(GraphError::NegativeCycleDetected)));
    assert!(matches!(graph.bellman_ford("T", "S"), Err(GraphError::NoPathFound)));

    graph.add_edge("C", "A", 3);
    let result = graph.bellman_ford("S", "T").unwrap();
    assert_eq!(result.distance, 1);
    assert_eq!(graph.labels_of(result.path), vec!["S", "A", "B", "C", "T"]);
}

#[test]
fn max_flow_of_diamond() {
    init_logging();
    let graph = Graph::from_edges(
        GraphKind::directed_weighted(),
        [("s", "a", 3), ("s", "b", 2), ("a", "t", 2), ("b", "t", 3)],
    );

    let flow = graph.max_flow("s", "t").unwrap();
    assert_eq!(flow.value, 4);
    assert_eq!(flow.min_cut().iter().map(|e| e.weight()).sum::<Weight>(), 4);
}

#[test]
fn prim_rejects_disconnected_graphs() {
    init_logging();
    let mut graph = Graph::from_edges(
        GraphKind::undirected_weighted(),
        [("A", "B", 1), ("B", "C", 2), ("D", "E", 1)],
    );

    assert!(matches!(
        graph.prim("A"),
        Err(GraphError::Disconnected { reached: 3, total: 5 })
    ));

    graph.add_edge("C", "D", 10);
    let mst = graph.prim("A").unwrap();
    assert_eq!(mst.total_weight, 14);
    assert_eq!(mst.tree.number_of_edges() as usize, graph.len() - 1);
}

#[test]
fn classify_paths_forests_and_cycles() {
    let path = Graph::from_edges(GraphKind::undirected_unweighted(), [("A", "B", 1), ("B", "C", 1)]);
    assert_eq!(path.classify_tree_or_forest(), TreeClassification::Tree);

    let mut forest = path.clone();
    forest.connect_path(["D", "E", "F"], 1);
    assert_eq!(forest.classify_tree_or_forest(), TreeClassification::Forest);

    let mut triangle = path.clone();
    triangle.add_edge("C", "A", 1);
    assert_eq!(triangle.classify_tree_or_forest(), TreeClassification::Neither);

    assert_eq!(
        Graph::complete_graph(["a", "b"]).classify_tree_or_forest(),
        TreeClassification::Tree
    );
    assert_eq!(
        Graph::complete_graph(["a", "b", "c"]).classify_tree_or_forest(),
        TreeClassification::Neither
    );
}

#[test]
fn read_only_queries_do_not_mutate() {
    let rng = &mut Pcg64Mcg::seed_from_u64(104);
    let graph = Graph::gnp_no_loops(rng, GraphKind::undirected_weighted(), 12, 0.3, 1..=9);
    let before = graph.ordered_edges(false);

    let _ = graph.classify_tree_or_forest();
    let _ = graph.path_avoiding("0", "5", "3");
    let pruned = graph.prune_odd_degree_vertices();
    let _ = graph.prim("0");

    assert_eq!(graph.ordered_edges(false), before);
    let odd = graph.odd_degree_vertices();
    assert_eq!(pruned.len(), graph.len() - odd.len());
    assert!(odd.into_iter().all(|u| !pruned.has_vertex(graph.label_of(u))));
}
