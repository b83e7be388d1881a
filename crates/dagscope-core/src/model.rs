//! JSON graph description.
//!
//! ```json
//! {
//!   "directed": true,
//!   "n": 4,
//!   "edges": [{"u": 0, "v": 1, "w": 2}],
//!   "source": 0,
//!   "weight_model": "edge"
//! }
//! ```
//!
//! `source` is signed on the wire: negative values are accepted and simply
//! select no source vertex, so the path stages produce empty results.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DagError;
use crate::graph::Graph;

/// One edge of a graph description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub u: usize,
    pub v: usize,
    pub w: i64,
}

/// Serializable description of a weighted graph plus a path source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default)]
    pub source: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_model: Option<String>,
}

const fn default_directed() -> bool {
    true
}

impl GraphData {
    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::Json`] if the text is not a valid description.
    pub fn from_json_str(text: &str) -> Result<Self, DagError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a description from a file.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::Io`] if the file cannot be read and
    /// [`DagError::Json`] if its contents do not parse.
    pub fn from_path(path: &Path) -> Result<Self, DagError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, DagError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The source as a vertex index, if it names one in `[0, n)`.
    #[must_use]
    pub fn source_vertex(&self) -> Option<usize> {
        usize::try_from(self.source).ok().filter(|&s| s < self.n)
    }

    /// Build the adjacency-list graph, validating every endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::VertexCountTooLarge`] if `n` exceeds
    /// [`MAX_VERTICES`](crate::graph::MAX_VERTICES), and
    /// [`DagError::VertexOutOfRange`] for the first edge whose endpoint lies
    /// outside `[0, n)`.
    pub fn to_graph(&self) -> Result<Graph, DagError> {
        let mut graph = Graph::try_new(self.n, self.directed)?;
        for edge in &self.edges {
            graph.try_add_edge(edge.u, edge.v, edge.w)?;
        }
        Ok(graph)
    }
}

impl Graph {
    /// Build a graph from its serializable description.
    ///
    /// # Errors
    ///
    /// See [`GraphData::to_graph`].
    pub fn from_data(data: &GraphData) -> Result<Self, DagError> {
        data.to_graph()
    }
}
