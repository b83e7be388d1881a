#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use dagscope_core::ErrorCode;
use dagscope_core::config::{DagscopeConfig, load_config, load_config_from};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dagscope: SCC condensation, topological order, and DAG path analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to ./dagscope.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Analyze one graph description",
        long_about = "Run SCC detection, condensation, topological sort, and shortest/longest \
                      paths over one JSON graph description.",
        after_help = "EXAMPLES:\n    # Analyze a dataset\n    dagscope run data/data_small_3.json\n\n    # Use DFS ordering and a different source\n    dagscope run graph.json --strategy dfs --source 4\n\n    # Emit machine-readable output\n    dagscope run graph.json --json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Write a CSV report for a directory of datasets",
        long_about = "Run the pipeline over every *.json file in a directory and write one CSV row per dataset.",
        after_help = "EXAMPLES:\n    # Report on ./data into report/results.csv\n    dagscope report\n\n    # Choose input and output\n    dagscope report --data suite --out out/metrics.csv"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Datasets",
        about = "Generate the standard dataset suite",
        long_about = "Write nine deterministic graph descriptions (small, medium, large) as JSON.",
        after_help = "EXAMPLES:\n    # Write the suite into ./data\n    dagscope generate\n\n    # Different seed and directory\n    dagscope generate --seed 7 --out suite"
    )]
    Generate(cmd::generate::GenerateArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    dagscope completions bash\n\n    # Generate zsh completions\n    dagscope completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DAGSCOPE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "dagscope=debug,info"
        } else {
            "dagscope=info,warn"
        })
    });

    let format = env::var("DAGSCOPE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<DagscopeConfig> {
    match &cli.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            load_config_from(path)
        }
        None => {
            let cwd = env::current_dir().context("Failed to resolve working directory")?;
            load_config(&cwd)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            let code = ErrorCode::ConfigParseError;
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
    debug!(?config, "config resolved");

    match cli.command {
        Commands::Run(ref args) => cmd::run::run_run(args, &config, output),
        Commands::Report(ref args) => cmd::report::run_report(args, &config, output),
        Commands::Generate(ref args) => cmd::generate::run_generate(args, &config, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["dagscope", "--json", "run", "g.json"]);
        assert!(cli.json);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["dagscope", "run", "g.json", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["dagscope", "report", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn verbose_short_flag() {
        let cli = Cli::parse_from(["dagscope", "-v", "generate"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn run_requires_a_file() {
        assert!(Cli::try_parse_from(["dagscope", "run"]).is_err());
    }

    #[test]
    fn run_subcommand_parses() {
        let cli = Cli::parse_from(["dagscope", "run", "g.json", "--strategy", "kahn"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.file, PathBuf::from("g.json"));
        assert_eq!(args.strategy, Some(cmd::StrategyArg::Kahn));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["dagscope", "run", "g.json", "--strategy", "bfs"]).is_err());
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["dagscope", "completions", "bash"]);
        assert!(matches!(cli.command, Commands::Completions(_)));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["dagscope", "--config", "/definitely/missing.toml", "generate"]);
        assert!(resolve_config(&cli).is_err());
    }
}
