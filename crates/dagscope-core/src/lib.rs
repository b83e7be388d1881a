#![forbid(unsafe_code)]
//! dagscope-core library.
//!
//! Decomposes weighted directed graphs (possibly cyclic) into an acyclic
//! component structure and runs path analysis over it:
//!
//! ```text
//! GraphData (JSON)
//!        ↓  model::GraphData::to_graph()
//! Graph (adjacency lists, may contain cycles)
//!        ↓  graph::scc::find_sccs()
//! SCC partition (reverse topological order)
//!        ↓  graph::condensation::Condensation::build()
//! Condensation DAG (one vertex per component, min-weight edges)
//!        ↓  graph::topo::TopoSort::{kahn, dfs}
//! Topological order
//!        ↓  graph::dag_path::DagPath::{shortest, longest, find_critical_path}
//! PathResult / CriticalPath
//! ```
//!
//! # Conventions
//!
//! - **Errors**: library errors are [`error::DagError`]; config and I/O
//!   helpers return `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Instrumentation**: every algorithm takes an explicit
//!   [`metrics::Metrics`] collaborator owned by the calling run.

pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{DagError, ErrorCode};
pub use graph::{
    Edge, Graph,
    condensation::Condensation,
    dag_path::{CriticalPath, DagPath, Objective, PathResult},
    scc::find_sccs,
    topo::{TopoSort, TopoStrategy},
};
pub use metrics::{Counters, Metrics, NoopMetrics};
pub use model::{EdgeData, GraphData};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport};
