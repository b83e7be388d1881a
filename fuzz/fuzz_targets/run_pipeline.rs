#![no_main]

use dagscope_core::{GraphData, Pipeline, PipelineOptions, TopoStrategy};
use libfuzzer_sys::fuzz_target;

// Vertex counts beyond this only slow the fuzzer down.
const MAX_VERTICES: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = GraphData::from_json_str(text) else {
        return;
    };
    if graph.n > MAX_VERTICES {
        return;
    }

    for strategy in [TopoStrategy::Kahn, TopoStrategy::Dfs] {
        let Ok(report) = Pipeline::new(PipelineOptions { strategy }).run(&graph) else {
            continue;
        };

        assert!(report.condensation.is_dag);
        let covered: usize = report.sccs.iter().map(Vec::len).sum();
        assert_eq!(covered, graph.n);
        let order = report.vertex_order.as_ref().expect("condensation always orders");
        assert_eq!(order.len(), graph.n);

        let _ = serde_json::to_string(&report);
    }
});
