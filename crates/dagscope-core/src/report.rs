//! Batch CSV report over a directory of graph descriptions.
//!
//! One row per `*.json` file, processed in file-name order. Files that fail
//! to load or analyze are logged and skipped so one bad dataset does not
//! hide the rest.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::metrics::counter;
use crate::model::GraphData;
use crate::pipeline::{Pipeline, PipelineOptions, PipelineReport};

/// Column names, in output order.
pub const CSV_HEADER: &str = "file,n,edges,directed,scc_count,avg_scc_size,condensed_n,\
condensed_edges,is_condensation_dag,topo_time_ms,scc_time_ms,dags_short_ms,dags_long_ms,\
dfs_visits,edge_checks,stack_pops,queue_pushes,edge_relaxations,successful_relaxations";

/// Summary of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub file: String,
    pub n: usize,
    pub edges: usize,
    pub directed: bool,
    pub scc_count: usize,
    pub avg_scc_size: f64,
    pub condensed_n: usize,
    pub condensed_edges: usize,
    pub is_condensation_dag: bool,
    pub topo_time_ms: f64,
    pub scc_time_ms: f64,
    pub dags_short_ms: f64,
    pub dags_long_ms: f64,
    pub dfs_visits: u64,
    pub edge_checks: u64,
    pub stack_pops: u64,
    pub queue_pushes: u64,
    pub edge_relaxations: u64,
    pub successful_relaxations: u64,
}

impl ReportRow {
    /// Flatten a pipeline report into a row.
    ///
    /// SCC traversal counters come from the SCC stage, `queue_pushes` from
    /// the topological stage, and relaxation counters are summed over both
    /// path stages.
    #[must_use]
    pub fn from_report(file: impl Into<String>, data: &GraphData, report: &PipelineReport) -> Self {
        let m = &report.metrics;
        Self {
            file: file.into(),
            n: data.n,
            edges: report.edge_count,
            directed: data.directed,
            scc_count: report.sccs.len(),
            avg_scc_size: report.average_scc_size(),
            condensed_n: report.condensation.components,
            condensed_edges: report.condensation.edges,
            is_condensation_dag: report.condensation.is_dag,
            topo_time_ms: m.topo.elapsed_millis(),
            scc_time_ms: m.scc.elapsed_millis(),
            dags_short_ms: m.shortest.elapsed_millis(),
            dags_long_ms: m.longest.elapsed_millis(),
            dfs_visits: m.scc.count(counter::DFS_VISITS),
            edge_checks: m.scc.count(counter::EDGE_CHECKS),
            stack_pops: m.scc.count(counter::STACK_POPS),
            queue_pushes: m.topo.count(counter::QUEUE_PUSHES),
            edge_relaxations: report.relaxations(),
            successful_relaxations: m.shortest.count(counter::SUCCESSFUL_RELAXATIONS)
                + m.longest.count(counter::SUCCESSFUL_RELAXATIONS),
        }
    }

    /// One CSV line, without trailing newline.
    #[must_use]
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{:.2},{},{},{},{:.3},{:.3},{:.3},{:.3},{},{},{},{},{},{}",
            csv_field(&self.file),
            self.n,
            self.edges,
            self.directed,
            self.scc_count,
            self.avg_scc_size,
            self.condensed_n,
            self.condensed_edges,
            self.is_condensation_dag,
            self.topo_time_ms,
            self.scc_time_ms,
            self.dags_short_ms,
            self.dags_long_ms,
            self.dfs_visits,
            self.edge_checks,
            self.stack_pops,
            self.queue_pushes,
            self.edge_relaxations,
            self.successful_relaxations,
        )
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Render header plus rows as CSV text.
#[must_use]
pub fn to_csv(rows: &[ReportRow]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + rows.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let _ = writeln!(out, "{}", row.to_csv_line());
    }
    out
}

/// Write header plus rows to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, to_csv(rows))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `*.json` files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn dataset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run the pipeline over every dataset in `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed. Individual datasets
/// that fail are skipped with a warning.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn run_directory(dir: &Path, options: PipelineOptions) -> Result<Vec<ReportRow>> {
    let pipeline = Pipeline::new(options);
    let mut rows = Vec::new();

    for path in dataset_files(dir)? {
        let file = path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());

        let data = match GraphData::from_path(&path) {
            Ok(data) => data,
            Err(err) => {
                warn!(file = %file, error = %err, "skipping unreadable dataset");
                continue;
            }
        };
        match pipeline.run(&data) {
            Ok(report) => rows.push(ReportRow::from_report(file, &data, &report)),
            Err(err) => warn!(file = %file, error = %err, "skipping dataset"),
        }
    }

    info!(rows = rows.len(), "report complete");
    Ok(rows)
}
