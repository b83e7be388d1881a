use dagscope_core::graph::topo::is_valid_order;
use dagscope_core::{Condensation, DagPath, Graph, NoopMetrics, Objective, TopoSort, find_sccs};
use petgraph::graph::DiGraph;
use proptest::prelude::*;

use generators::*;

fn petgraph_sccs(n: usize, edges: &[(usize, usize, i64)]) -> Vec<Vec<usize>> {
    let mut g = DiGraph::<(), i64>::new();
    let nodes: Vec<_> = (0..n).map(|_| g.add_node(())).collect();
    for &(u, v, w) in edges {
        g.add_edge(nodes[u], nodes[v], w);
    }
    let mut sccs: Vec<Vec<usize>> = petgraph::algo::tarjan_scc(&g)
        .into_iter()
        .map(|c| {
            let mut c: Vec<usize> = c.into_iter().map(|ix| ix.index()).collect();
            c.sort_unstable();
            c
        })
        .collect();
    sccs.sort();
    sccs
}

fn petgraph_is_cyclic(n: usize, edges: &[(usize, usize, i64)]) -> bool {
    let mut g = DiGraph::<(), i64>::new();
    let nodes: Vec<_> = (0..n).map(|_| g.add_node(())).collect();
    for &(u, v, w) in edges {
        g.add_edge(nodes[u], nodes[v], w);
    }
    petgraph::algo::is_cyclic_directed(&g)
}

/// Weight of the edge `u → v` the relaxation would have picked.
fn best_edge(g: &Graph, u: usize, v: usize, objective: Objective) -> Option<i64> {
    let weights = g.edges_from(u).iter().filter(|e| e.to == v).map(|e| e.weight);
    match objective {
        Objective::Minimize => weights.min(),
        Objective::Maximize => weights.max(),
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn scc_partition_matches_petgraph((n, edges) in arb_graph(24, 60)) {
        let g = Graph::from_edges(n, &edges);
        let mut ours = find_sccs(&g, &mut NoopMetrics);
        prop_assert!(!ours.is_empty());
        ours.sort();
        prop_assert_eq!(ours, petgraph_sccs(n, &edges));
    }

    #[test]
    fn scc_partition_covers_every_vertex_once((n, edges) in arb_graph(24, 60)) {
        let g = Graph::from_edges(n, &edges);
        let sccs = find_sccs(&g, &mut NoopMetrics);

        let mut seen = vec![0usize; n];
        for component in &sccs {
            for &v in component {
                seen[v] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn scc_members_are_mutually_reachable((n, edges) in arb_graph(16, 40)) {
        let g = Graph::from_edges(n, &edges);
        for component in find_sccs(&g, &mut NoopMetrics) {
            for &a in &component {
                let reach = reachable_from(n, &edges, a);
                for &b in &component {
                    prop_assert!(reach[b], "{} should reach {}", a, b);
                }
            }
        }
    }

    #[test]
    fn condensation_is_always_acyclic((n, edges) in arb_graph(24, 80)) {
        let g = Graph::from_edges(n, &edges);
        let cond = Condensation::build(&g, find_sccs(&g, &mut NoopMetrics));
        prop_assert!(cond.is_acyclic());
        prop_assert!(TopoSort::new(cond.graph()).kahn(&mut NoopMetrics).is_some());
    }

    #[test]
    fn both_orders_respect_every_edge((n, edges) in arb_dag(20, 60)) {
        let g = Graph::from_edges(n, &edges);
        let sorter = TopoSort::new(&g);

        let kahn = sorter.kahn(&mut NoopMetrics);
        let dfs = sorter.dfs(&mut NoopMetrics);
        prop_assert!(kahn.as_deref().is_some_and(|o| is_valid_order(&g, o)));
        prop_assert!(dfs.as_deref().is_some_and(|o| is_valid_order(&g, o)));
    }

    #[test]
    fn cyclic_graphs_have_no_order((n, edges) in arb_graph(16, 40)) {
        let g = Graph::from_edges(n, &edges);
        let sorter = TopoSort::new(&g);
        let kahn = sorter.kahn(&mut NoopMetrics);
        let dfs = sorter.dfs(&mut NoopMetrics);

        if petgraph_is_cyclic(n, &edges) {
            prop_assert!(kahn.is_none());
            prop_assert!(dfs.is_none());
        } else {
            prop_assert!(kahn.as_deref().is_some_and(|o| is_valid_order(&g, o)));
            prop_assert!(dfs.as_deref().is_some_and(|o| is_valid_order(&g, o)));
        }
    }

    #[test]
    fn minimize_and_maximize_agree_on_reachability((n, edges) in arb_dag(20, 60), pick in any::<usize>()) {
        let g = Graph::from_edges(n, &edges);
        let source = pick % n;
        let paths = DagPath::new(&g);
        let short = paths.shortest(source, &mut NoopMetrics).expect("acyclic");
        let long = paths.longest(source, &mut NoopMetrics).expect("acyclic");

        let expected = reachable_from(n, &edges, source);
        for (v, &reachable) in expected.iter().enumerate() {
            prop_assert_eq!(short.is_reachable(v), reachable);
            prop_assert_eq!(long.is_reachable(v), reachable);
        }
    }

    #[test]
    fn reconstructed_paths_sum_to_distance((n, edges) in arb_dag(20, 60), pick in any::<usize>()) {
        let g = Graph::from_edges(n, &edges);
        let source = pick % n;
        let paths = DagPath::new(&g);

        for objective in [Objective::Minimize, Objective::Maximize] {
            let result = paths.compute(source, objective, &mut NoopMetrics).expect("acyclic");
            for target in result.reachable() {
                let path = result.reconstruct_path(target);
                prop_assert_eq!(path.first(), Some(&source));
                prop_assert_eq!(path.last(), Some(&target));

                let mut total = 0i64;
                for pair in path.windows(2) {
                    let w = best_edge(&g, pair[0], pair[1], objective);
                    prop_assert!(w.is_some(), "consecutive vertices must share an edge");
                    total += w.unwrap_or_default();
                }
                prop_assert_eq!(Some(total), result.distance(target));
            }
        }
    }

    #[test]
    fn path_stages_reject_cycles((n, edges) in arb_graph(12, 30)) {
        let g = Graph::from_edges(n, &edges);
        let result = DagPath::new(&g).shortest(0, &mut NoopMetrics);
        prop_assert_eq!(result.is_err(), petgraph_is_cyclic(n, &edges));
    }
}
