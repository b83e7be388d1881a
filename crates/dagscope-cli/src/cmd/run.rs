//! `dagscope run`: full pipeline over one graph description.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dagscope_core::config::DagscopeConfig;
use dagscope_core::graph::scc::SccListing;
use dagscope_core::metrics::StageMetrics;
use dagscope_core::{GraphData, Pipeline, PipelineOptions, PipelineReport};
use serde::Serialize;
use tracing::debug;

use super::StrategyArg;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `dagscope run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Graph description (JSON).
    pub file: PathBuf,

    /// Topological sort strategy (defaults to `[pipeline] topo_strategy`).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Source vertex for path analysis, overriding the file's `source`.
    #[arg(long, allow_negative_numbers = true)]
    pub source: Option<i64>,
}

#[derive(Debug, Serialize)]
struct RunOutput {
    file: String,
    #[serde(flatten)]
    report: PipelineReport,
}

/// Execute `dagscope run`.
pub fn run_run(args: &RunArgs, config: &DagscopeConfig, output: OutputMode) -> anyhow::Result<()> {
    let mut data = match GraphData::from_path(&args.file) {
        Ok(data) => data,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err).with_context(|| format!("failed to load {}", args.file.display()));
        }
    };
    if let Some(source) = args.source {
        data.source = source;
    }

    let options = PipelineOptions {
        strategy: args
            .strategy
            .map_or(config.pipeline.topo_strategy, Into::into),
    };
    debug!(strategy = %options.strategy, source = data.source, "running pipeline");

    let report = match Pipeline::new(options).run(&data) {
        Ok(report) => report,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err).with_context(|| format!("failed to analyze {}", args.file.display()));
        }
    };

    let payload = RunOutput {
        file: args.file.display().to_string(),
        report,
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_text(payload: &RunOutput, w: &mut dyn Write) -> io::Result<()> {
    let r = &payload.report;
    writeln!(
        w,
        "file={} n={} edges={} sccs={} condensed_n={} condensed_edges={} is_dag={}",
        payload.file,
        r.vertex_count,
        r.edge_count,
        r.sccs.len(),
        r.condensation.components,
        r.condensation.edges,
        r.condensation.is_dag
    )?;
    match &r.vertex_order {
        Some(order) => writeln!(w, "order={}", join(order))?,
        None => writeln!(w, "order=none")?,
    }
    match &r.critical_path {
        Some(cp) => writeln!(
            w,
            "critical_path={} length={}",
            join(&r.expand_components(&cp.path)),
            cp.length
        ),
        None => writeln!(w, "critical_path=none"),
    }
}

fn render_stage(w: &mut dyn Write, name: &str, stage: &StageMetrics) -> io::Result<()> {
    writeln!(w, "{name}:")?;
    write!(w, "{stage}")
}

fn render_pretty(payload: &RunOutput, w: &mut dyn Write) -> io::Result<()> {
    let r = &payload.report;

    pretty_section(w, "Graph")?;
    pretty_kv(w, "File", &payload.file)?;
    pretty_kv(w, "Vertices", r.vertex_count.to_string())?;
    pretty_kv(w, "Edges", r.edge_count.to_string())?;
    pretty_kv(w, "Directed", r.directed.to_string())?;
    writeln!(w)?;

    write!(w, "{}", SccListing(&r.sccs))?;
    writeln!(w)?;

    pretty_section(w, "Condensation")?;
    pretty_kv(w, "Components", r.condensation.components.to_string())?;
    pretty_kv(w, "Edges", r.condensation.edges.to_string())?;
    pretty_kv(w, "Is DAG", r.condensation.is_dag.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Topological order")?;
    pretty_kv(w, "Strategy", r.strategy.as_str())?;
    match (&r.component_order, &r.vertex_order) {
        (Some(components), Some(vertices)) => {
            pretty_kv(w, "Components", format!("{components:?}"))?;
            pretty_kv(w, "Vertices", format!("{vertices:?}"))?;
        }
        _ => pretty_kv(w, "Order", "none (cycle detected)")?,
    }
    writeln!(w)?;

    pretty_section(w, "Paths over components")?;
    match (r.source, r.source_component) {
        (Some(source), Some(component)) => {
            pretty_kv(w, "Source", format!("vertex {source} (component {component})"))?;
        }
        _ => pretty_kv(w, "Source", "none")?,
    }
    if let Some(shortest) = &r.shortest {
        write!(w, "{shortest}")?;
    }
    if let Some(longest) = &r.longest {
        write!(w, "{longest}")?;
    }
    if let Some(critical) = &r.critical_path {
        write!(w, "{critical}")?;
        pretty_kv(
            w,
            "Vertices",
            format!("{:?}", r.expand_components(&critical.path)),
        )?;
    }
    writeln!(w)?;

    pretty_section(w, "Metrics")?;
    render_stage(w, "scc", &r.metrics.scc)?;
    render_stage(w, "topo", &r.metrics.topo)?;
    render_stage(w, "shortest", &r.metrics.shortest)?;
    render_stage(w, "longest", &r.metrics.longest)
}
