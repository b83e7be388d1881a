//! `dagscope generate`: write the standard dataset suite.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dagscope_core::ErrorCode;
use dagscope_core::config::DagscopeConfig;
use dagscope_sim::write_suite;
use serde::Serialize;

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `dagscope generate`.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Output directory (defaults to `[generate] output_dir`).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// RNG seed (defaults to `[generate] seed`).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    seed: u64,
    output_dir: String,
    files: Vec<String>,
}

/// Execute `dagscope generate`.
pub fn run_generate(
    args: &GenerateArgs,
    config: &DagscopeConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let dir = args
        .out
        .clone()
        .unwrap_or_else(|| config.generate.output_dir.clone());
    let seed = args.seed.unwrap_or(config.generate.seed);

    let written = match write_suite(&dir, seed) {
        Ok(written) => written,
        Err(err) => {
            let code = ErrorCode::ReportWriteFailed;
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

    let payload = GenerateOutput {
        seed,
        output_dir: dir.display().to_string(),
        files: written
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &GenerateOutput, w: &mut dyn Write) -> io::Result<()> {
    for file in &payload.files {
        writeln!(w, "{file}")?;
    }
    Ok(())
}

fn render_pretty(payload: &GenerateOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Generated datasets")?;
    pretty_kv(w, "Seed", payload.seed.to_string())?;
    pretty_kv(w, "Directory", &payload.output_dir)?;
    for file in &payload.files {
        writeln!(w, "  {file}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn generate_args_parse() {
        let parsed = Wrapper::parse_from(["test", "--out", "suite", "--seed", "7"]);
        assert_eq!(parsed.args.out, Some(PathBuf::from("suite")));
        assert_eq!(parsed.args.seed, Some(7));
    }

    #[test]
    fn pretty_output_lists_files() {
        let payload = GenerateOutput {
            seed: 42,
            output_dir: "data".to_string(),
            files: vec!["data/data_small_1.json".to_string()],
        };
        let mut buf = Vec::new();
        render_pretty(&payload, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Seed:"));
        assert!(text.contains("  data/data_small_1.json"));
    }
}
