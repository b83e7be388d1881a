#![no_main]

use dagscope_core::graph::topo::is_valid_order;
use dagscope_core::{Graph, NoopMetrics, TopoSort};
use libfuzzer_sys::fuzz_target;

// First byte picks the vertex count; each following triple is (u, v, w).
fuzz_target!(|data: &[u8]| {
    let Some((&n, rest)) = data.split_first() else {
        return;
    };
    let n = usize::from(n % 64);
    let mut graph = Graph::new(n, true);
    if n > 0 {
        for chunk in rest.chunks_exact(3) {
            let u = usize::from(chunk[0]) % n;
            let v = usize::from(chunk[1]) % n;
            graph.add_edge(u, v, i64::from(chunk[2]));
        }
    }

    let sorter = TopoSort::new(&graph);
    let kahn = sorter.kahn(&mut NoopMetrics);
    let dfs = sorter.dfs(&mut NoopMetrics);
    assert_eq!(kahn.is_some(), dfs.is_some());
    if let Some(order) = kahn {
        assert!(is_valid_order(&graph, &order));
    }
    if let Some(order) = dfs {
        assert!(is_valid_order(&graph, &order));
    }
});
