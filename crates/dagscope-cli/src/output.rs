//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use dagscope_core::DagError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Compact `key=value` text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(json_flag: bool, format_env: Option<&str>, is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value, fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from the `--json` flag, `FORMAT`, and TTY defaults.
pub fn resolve_output_mode(json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(json_flag, env_val.as_deref(), is_tty)
}

/// Render a serializable value into `out` with explicit pretty/text renderers.
pub fn render_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// [`render_to`] on stdout.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, mode, value, text_fn, pretty_fn)
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2002").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

impl From<&DagError> for CliError {
    fn from(err: &DagError) -> Self {
        let code = err.code();
        Self {
            message: err.to_string(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render an error into `out` in the requested format.
pub fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── OutputMode ──────────────────────────────────────────────────────────

    #[test]
    fn json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(true, Some("text"), true);
        assert_eq!(mode, OutputMode::Json);
        assert!(mode.is_json());
    }

    #[test]
    fn format_env_is_case_insensitive() {
        assert_eq!(resolve_output_mode_inner(false, Some("JSON"), true), OutputMode::Json);
        assert_eq!(resolve_output_mode_inner(false, Some("Text"), true), OutputMode::Text);
        assert_eq!(resolve_output_mode_inner(false, Some("pretty"), false), OutputMode::Pretty);
    }

    #[test]
    fn unknown_env_falls_through_to_tty() {
        assert_eq!(resolve_output_mode_inner(false, Some("yaml"), true), OutputMode::Pretty);
        assert_eq!(resolve_output_mode_inner(false, Some("yaml"), false), OutputMode::Text);
    }

    #[test]
    fn default_depends_on_tty() {
        assert_eq!(resolve_output_mode_inner(false, None, true), OutputMode::Pretty);
        assert_eq!(resolve_output_mode_inner(false, None, false), OutputMode::Text);
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: u32,
    }

    const SAMPLE: Sample = Sample {
        name: "diamond",
        count: 4,
    };

    fn render_sample(mode: OutputMode) -> String {
        let mut buf = Vec::new();
        render_to(
            &mut buf,
            mode,
            &SAMPLE,
            |s, w| writeln!(w, "name={} count={}", s.name, s.count),
            |s, w| pretty_kv(w, "Name", s.name),
        )
        .expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn render_dispatches_per_mode() {
        let json: serde_json::Value =
            serde_json::from_str(&render_sample(OutputMode::Json)).expect("valid json");
        assert_eq!(json["count"], 4);

        assert_eq!(render_sample(OutputMode::Text), "name=diamond count=4\n");
        assert!(render_sample(OutputMode::Pretty).starts_with("Name:"));
    }

    #[test]
    fn pretty_section_draws_rule() {
        let mut buf = Vec::new();
        pretty_section(&mut buf, "SCCs").expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("SCCs\n"));
        assert!(text.contains(&"-".repeat(PRETTY_RULE_WIDTH)));
    }

    // ── Errors ──────────────────────────────────────────────────────────────

    #[test]
    fn cli_error_from_dag_error_carries_code() {
        let err = CliError::from(&DagError::NotADag);
        assert_eq!(err.error_code.as_deref(), Some("E2002"));
        assert!(err.message.contains("not a DAG"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn render_error_json_wraps_in_error_key() {
        let mut buf = Vec::new();
        let err = CliError::with_details("bad input", "try again", "E1003");
        render_error_to(&mut buf, OutputMode::Json, &err).expect("render");

        let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(json["error"]["message"], "bad input");
        assert_eq!(json["error"]["error_code"], "E1003");
    }

    #[test]
    fn render_error_human_shows_suggestion() {
        let mut buf = Vec::new();
        let err = CliError::with_details("bad input", "try again", "E1003");
        render_error_to(&mut buf, OutputMode::Text, &err).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "error: bad input\n  suggestion: try again\n");
    }
}
