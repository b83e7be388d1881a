//! `dagscope report`: batch CSV report over a directory of datasets.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dagscope_core::config::DagscopeConfig;
use dagscope_core::report::{ReportRow, run_directory, write_csv};
use dagscope_core::{ErrorCode, PipelineOptions};
use serde::Serialize;
use tracing::info;

use super::StrategyArg;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `dagscope report`.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Directory of `*.json` graph descriptions (defaults to `[report] data_dir`).
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// CSV output path (defaults to `[report] output`).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Topological sort strategy (defaults to `[pipeline] topo_strategy`).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    data_dir: String,
    output: String,
    rows: Vec<ReportRow>,
}

/// Execute `dagscope report`.
pub fn run_report(args: &ReportArgs, config: &DagscopeConfig, output: OutputMode) -> anyhow::Result<()> {
    let data_dir = args.data.clone().unwrap_or_else(|| config.report.data_dir.clone());
    let out_path = args.out.clone().unwrap_or_else(|| config.report.output.clone());
    let options = PipelineOptions {
        strategy: args
            .strategy
            .map_or(config.pipeline.topo_strategy, Into::into),
    };

    let rows = match run_directory(&data_dir, options) {
        Ok(rows) => rows,
        Err(err) => {
            let code = ErrorCode::InputReadFailed;
            render_error(
                output,
                &CliError::with_details(
                    format!("{err:#}"),
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            return Err(err);
        }
    };

    if let Err(err) = write_csv(&out_path, &rows) {
        let code = ErrorCode::ReportWriteFailed;
        render_error(
            output,
            &CliError::with_details(format!("{err:#}"), code.hint().unwrap_or_default(), code.code()),
        )?;
        return Err(err);
    }
    info!(rows = rows.len(), output = %out_path.display(), "report written");

    let payload = ReportOutput {
        data_dir: data_dir.display().to_string(),
        output: out_path.display().to_string(),
        rows,
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &ReportOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "wrote {} rows to {}", payload.rows.len(), payload.output)
}

fn render_pretty(payload: &ReportOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Report")?;
    pretty_kv(w, "Data", &payload.data_dir)?;
    pretty_kv(w, "Output", &payload.output)?;
    pretty_kv(w, "Datasets", payload.rows.len().to_string())?;
    writeln!(w)?;

    if payload.rows.is_empty() {
        writeln!(w, "No datasets found.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{:<22} {:>5} {:>6} {:>5} {:>7} {:>9} {:>9}",
        "file", "n", "edges", "sccs", "dag", "scc_ms", "topo_ms"
    )?;
    for row in &payload.rows {
        writeln!(
            w,
            "{:<22} {:>5} {:>6} {:>5} {:>7} {:>9.3} {:>9.3}",
            row.file,
            row.n,
            row.edges,
            row.scc_count,
            row.is_condensation_dag,
            row.scc_time_ms,
            row.topo_time_ms
        )?;
    }
    Ok(())
}
