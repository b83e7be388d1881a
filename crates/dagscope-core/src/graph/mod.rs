//! Weighted adjacency-list graph and the algorithms that run over it.
//!
//! # Overview
//!
//! Vertices are dense indices in `[0, n)`; there is no vertex object. Each
//! vertex owns its outgoing edges in insertion order. The graph is built once
//! and then only read by the downstream stages:
//!
//! ```text
//! Graph (may contain cycles)
//!        ↓  scc::find_sccs()
//! Vec<Vec<usize>> (components, reverse topological order)
//!        ↓  condensation::Condensation::build()
//! Graph over component indices (always acyclic)
//!        ↓  topo::TopoSort / dag_path::DagPath
//! orders, distances, critical path
//! ```
//!
//! ## Undirected mode
//!
//! An undirected graph stores every edge twice (`u→v` and `v→u`), both added
//! by the same [`Graph::add_edge`] call. There is no way to insert one half of
//! a pair, so [`Graph::edge_count`] can halve the stored count exactly.

use std::fmt;

use crate::error::DagError;

pub mod condensation;
pub mod dag_path;
pub mod scc;
pub mod topo;

/// Largest vertex count accepted by [`Graph::try_new`].
///
/// Graph descriptions read from disk are checked against this before any
/// adjacency storage is allocated.
pub const MAX_VERTICES: usize = 1 << 22;

/// A directed, weighted edge `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
}

/// Adjacency-list graph over vertices `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    directed: bool,
    adj: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph over `n` vertices.
    #[must_use]
    pub fn new(n: usize, directed: bool) -> Self {
        Self {
            directed,
            adj: vec![Vec::new(); n],
        }
    }

    /// Checked variant of [`Graph::new`] for vertex counts from external data.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::VertexCountTooLarge`] if `n` is above
    /// [`MAX_VERTICES`] or the adjacency table cannot be allocated.
    pub fn try_new(n: usize, directed: bool) -> Result<Self, DagError> {
        let too_large = DagError::VertexCountTooLarge {
            n,
            max: MAX_VERTICES,
        };
        if n > MAX_VERTICES {
            return Err(too_large);
        }
        let mut adj = Vec::new();
        if adj.try_reserve_exact(n).is_err() {
            return Err(too_large);
        }
        adj.resize_with(n, Vec::new);
        Ok(Self { directed, adj })
    }

    /// Build a directed graph from `(u, v, w)` triples.
    ///
    /// # Panics
    ///
    /// Panics if any endpoint is outside `[0, n)`.
    #[must_use]
    pub fn from_edges(n: usize, edges: &[(usize, usize, i64)]) -> Self {
        let mut graph = Self::new(n, true);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w);
        }
        graph
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Append `u → v` with weight `w` (and `v → u` when undirected).
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is outside `[0, n)`. Out-of-range indices are a
    /// programmer error; use [`Graph::try_add_edge`] for external data.
    pub fn add_edge(&mut self, u: usize, v: usize, w: i64) {
        if let Err(err) = self.try_add_edge(u, v, w) {
            panic!("add_edge({u}, {v}): {err}");
        }
    }

    /// Checked variant of [`Graph::add_edge`].
    ///
    /// # Errors
    ///
    /// Returns [`DagError::VertexOutOfRange`] if either endpoint is outside
    /// `[0, n)`. The graph is unchanged on error.
    pub fn try_add_edge(&mut self, u: usize, v: usize, w: i64) -> Result<(), DagError> {
        let n = self.vertex_count();
        for vertex in [u, v] {
            if vertex >= n {
                return Err(DagError::VertexOutOfRange { vertex, n });
            }
        }

        self.adj[u].push(Edge {
            from: u,
            to: v,
            weight: w,
        });
        if !self.directed {
            self.adj[v].push(Edge {
                from: v,
                to: u,
                weight: w,
            });
        }
        Ok(())
    }

    /// Outgoing edges of `u`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `u` is outside `[0, n)`.
    #[must_use]
    pub fn edges_from(&self, u: usize) -> &[Edge] {
        &self.adj[u]
    }

    /// Iterate every stored edge, grouped by source vertex.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adj.iter().flatten()
    }

    /// Total edge count; undirected graphs count each symmetric pair once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.adj.iter().map(Vec::len).sum();
        if self.directed { stored } else { stored / 2 }
    }

    /// A new directed graph with every stored edge flipped.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut rev = Self::new(self.vertex_count(), true);
        for edge in self.edges() {
            rev.adj[edge.to].push(Edge {
                from: edge.to,
                to: edge.from,
                weight: edge.weight,
            });
        }
        rev
    }

    /// In-degree of every vertex.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertex_count()];
        for edge in self.edges() {
            degrees[edge.to] += 1;
        }
        degrees
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph: {} vertices, {} edges, {}",
            self.vertex_count(),
            self.edge_count(),
            if self.directed { "directed" } else { "undirected" }
        )?;
        for (u, edges) in self.adj.iter().enumerate() {
            if edges.is_empty() {
                continue;
            }
            write!(f, "{u} →")?;
            for edge in edges {
                write!(f, " {}(w={})", edge.to, edge.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
