//! End-to-end analysis of one graph description.
//!
//! A [`Pipeline`] run owns a fresh [`Counters`] per stage, so reports from
//! different runs never share instrumentation:
//!
//! 1. SCC decomposition of the input graph.
//! 2. Condensation plus its independent acyclicity check.
//! 3. Topological order of the condensation (configured strategy), expanded
//!    back to original vertices.
//! 4. Shortest paths, longest paths and the critical path over the
//!    condensation, starting from the component that contains the source.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::DagError;
use crate::graph::condensation::Condensation;
use crate::graph::dag_path::{CriticalPath, DagPath, PathResult, critical_path_of};
use crate::graph::scc::find_sccs;
use crate::graph::topo::{TopoSort, TopoStrategy};
use crate::metrics::{Counters, StageMetrics, counter};
use crate::model::GraphData;

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub strategy: TopoStrategy,
}

/// Shape of the condensation DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondensationSummary {
    pub components: usize,
    pub edges: usize,
    pub is_dag: bool,
}

/// Instrumentation captured for each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineMetrics {
    pub scc: StageMetrics,
    pub topo: StageMetrics,
    pub shortest: StageMetrics,
    pub longest: StageMetrics,
}

/// Everything one run computed.
///
/// The path results are `None` when the description's source does not name
/// a vertex of the graph.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub sccs: Vec<Vec<usize>>,
    pub condensation: CondensationSummary,
    pub strategy: TopoStrategy,
    pub component_order: Option<Vec<usize>>,
    pub vertex_order: Option<Vec<usize>>,
    pub source: Option<usize>,
    pub source_component: Option<usize>,
    pub shortest: Option<PathResult>,
    pub longest: Option<PathResult>,
    pub critical_path: Option<CriticalPath>,
    pub metrics: PipelineMetrics,
}

impl PipelineReport {
    /// Mean component size, `0.0` for an empty graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_scc_size(&self) -> f64 {
        if self.sccs.is_empty() {
            return 0.0;
        }
        self.vertex_count as f64 / self.sccs.len() as f64
    }

    /// Sum of a counter across every stage.
    #[must_use]
    pub fn total(&self, key: &str) -> u64 {
        [
            &self.metrics.scc,
            &self.metrics.topo,
            &self.metrics.shortest,
            &self.metrics.longest,
        ]
        .iter()
        .map(|stage| stage.count(key))
        .sum()
    }

    /// Original vertices of the given components, concatenated in order.
    ///
    /// Path results are indexed by component; this maps them back.
    #[must_use]
    pub fn expand_components(&self, components: &[usize]) -> Vec<usize> {
        TopoSort::expand_to_vertices(components, &self.sccs)
    }

    /// Relaxation attempts across both path stages.
    #[must_use]
    pub fn relaxations(&self) -> u64 {
        self.metrics.shortest.count(counter::EDGE_RELAXATIONS)
            + self.metrics.longest.count(counter::EDGE_RELAXATIONS)
    }
}

/// Runs every stage over a graph description.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    #[must_use]
    pub const fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Analyze `data`.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::VertexOutOfRange`] if an edge names a vertex
    /// outside `[0, n)`, and [`DagError::NotADag`] if the condensation is not
    /// acyclic (only possible with a broken SCC partition).
    #[instrument(skip_all, fields(n = data.n, edges = data.edges.len(), strategy = %self.options.strategy))]
    pub fn run(&self, data: &GraphData) -> Result<PipelineReport, DagError> {
        let graph = data.to_graph()?;

        let mut scc_metrics = Counters::new();
        let sccs = find_sccs(&graph, &mut scc_metrics);

        let condensation = Condensation::build(&graph, sccs);
        let summary = CondensationSummary {
            components: condensation.component_count(),
            edges: condensation.graph().edge_count(),
            is_dag: condensation.is_acyclic(),
        };

        let mut topo_metrics = Counters::new();
        let component_order =
            TopoSort::new(condensation.graph()).order(self.options.strategy, &mut topo_metrics);
        if component_order.is_none() {
            warn!("condensation has no topological order");
        }
        let vertex_order = component_order
            .as_deref()
            .map(|order| TopoSort::expand_to_vertices(order, condensation.sccs()));

        let source = data.source_vertex();
        let source_component = source.and_then(|s| condensation.component_of(s));

        let mut short_metrics = Counters::new();
        let mut long_metrics = Counters::new();
        let (shortest, longest, critical_path) = match source_component {
            Some(component) => {
                let paths = DagPath::new(condensation.graph());
                let shortest = paths.shortest(component, &mut short_metrics)?;
                let longest = paths.longest(component, &mut long_metrics)?;
                let critical = critical_path_of(&longest);
                (Some(shortest), Some(longest), Some(critical))
            }
            None => {
                warn!(source = data.source, n = data.n, "source is not a vertex; skipping paths");
                (None, None, None)
            }
        };

        info!(
            sccs = condensation.component_count(),
            condensed_edges = summary.edges,
            "pipeline finished"
        );

        Ok(PipelineReport {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            directed: graph.is_directed(),
            sccs: condensation.sccs().to_vec(),
            condensation: summary,
            strategy: self.options.strategy,
            component_order,
            vertex_order,
            source,
            source_component,
            shortest,
            longest,
            critical_path,
            metrics: PipelineMetrics {
                scc: scc_metrics.snapshot(),
                topo: topo_metrics.snapshot(),
                shortest: short_metrics.snapshot(),
                longest: long_metrics.snapshot(),
            },
        })
    }
}
