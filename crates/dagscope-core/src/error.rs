use std::fmt;
use std::io;

/// Machine-readable error codes for scripted consumers of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputReadFailed,
    InputParseError,
    VertexOutOfRange,
    NotADag,
    VertexCountTooLarge,
    ReportWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InputReadFailed => "E1002",
            Self::InputParseError => "E1003",
            Self::VertexOutOfRange => "E2001",
            Self::NotADag => "E2002",
            Self::VertexCountTooLarge => "E2003",
            Self::ReportWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputReadFailed => "Graph description could not be read",
            Self::InputParseError => "Graph description is not valid JSON",
            Self::VertexOutOfRange => "Edge endpoint outside the vertex range",
            Self::NotADag => "Graph is not a DAG",
            Self::VertexCountTooLarge => "Vertex count exceeds the supported maximum",
            Self::ReportWriteFailed => "Report write failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in dagscope.toml and retry."),
            Self::InputReadFailed => Some("Check that the file exists and is readable."),
            Self::InputParseError => Some(
                "Expected {\"directed\", \"n\", \"edges\": [{\"u\", \"v\", \"w\"}], \"source\"}.",
            ),
            Self::VertexOutOfRange => Some("Every edge endpoint must lie in [0, n)."),
            Self::NotADag => Some("Condense the graph by SCCs before computing DAG paths."),
            Self::VertexCountTooLarge => Some("Reduce \"n\" or split the graph into smaller descriptions."),
            Self::ReportWriteFailed => Some("Check disk space and write permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by graph construction and DAG path computation.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A DAG-only stage received a graph containing a cycle.
    #[error("invalid input: graph is not a DAG")]
    NotADag,

    /// An edge references a vertex outside `[0, n)`.
    #[error("vertex {vertex} out of range for graph with {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },

    /// The declared vertex count is above the limit or cannot be allocated.
    #[error("vertex count {n} exceeds the supported maximum of {max}")]
    VertexCountTooLarge { n: usize, max: usize },

    /// The graph description could not be read.
    #[error("failed to read graph description: {0}")]
    Io(#[from] io::Error),

    /// The graph description is not valid JSON for the expected shape.
    #[error("failed to parse graph description: {0}")]
    Json(#[from] serde_json::Error),
}

impl DagError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotADag => ErrorCode::NotADag,
            Self::VertexOutOfRange { .. } => ErrorCode::VertexOutOfRange,
            Self::VertexCountTooLarge { .. } => ErrorCode::VertexCountTooLarge,
            Self::Io(_) => ErrorCode::InputReadFailed,
            Self::Json(_) => ErrorCode::InputParseError,
        }
    }
}
