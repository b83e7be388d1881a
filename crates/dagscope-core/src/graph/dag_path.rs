//! Single-source shortest and longest paths over a DAG.
//!
//! # Algorithm
//!
//! 1. Compute a topological order (DFS strategy). No order means the input
//!    has a cycle: fail with [`DagError::NotADag`].
//! 2. `dist[source] = 0`, every other vertex unreachable (`None`).
//! 3. Walk the order; skip vertices still unreachable. For each edge
//!    `u → v` with weight `w`, relax `dist[v]` with `dist[u] + w` when it
//!    improves under the objective (`<` for [`Objective::Minimize`], `>` for
//!    [`Objective::Maximize`]).
//!
//! One pass suffices because every predecessor of `v` precedes `v` in the
//! order. Distances are `Option<i64>` and additions saturate, so no sentinel
//! value can overflow during relaxation.
//!
//! The longest-path variant is the critical path used for scheduling: the
//! maximum-weight chain of dependent work from the source.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::DagError;
use crate::graph::Graph;
use crate::graph::topo::TopoSort;
use crate::metrics::{Metrics, NoopMetrics, counter};

/// Direction of relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Shortest paths.
    Minimize,
    /// Longest paths.
    Maximize,
}

impl Objective {
    const fn improves(self, candidate: i64, current: Option<i64>) -> bool {
        match current {
            None => true,
            Some(current) => match self {
                Self::Minimize => candidate < current,
                Self::Maximize => candidate > current,
            },
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Minimize => "Shortest",
            Self::Maximize => "Longest",
        }
    }
}

/// Distances and predecessors from one source vertex.
///
/// Both arrays are empty when the query was degenerate (empty graph or
/// source out of range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    source: usize,
    objective: Objective,
    distances: Vec<Option<i64>>,
    predecessors: Vec<Option<usize>>,
}

impl PathResult {
    fn empty(source: usize, objective: Objective) -> Self {
        Self {
            source,
            objective,
            distances: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    /// Number of vertices covered (`0` for a degenerate query).
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance to `v`, `None` if unreachable or out of range.
    #[must_use]
    pub fn distance(&self, v: usize) -> Option<i64> {
        self.distances.get(v).copied().flatten()
    }

    #[must_use]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.distance(v).is_some()
    }

    /// Predecessor of `v` on its best path, `None` for the source and for
    /// unreachable vertices.
    #[must_use]
    pub fn predecessor(&self, v: usize) -> Option<usize> {
        self.predecessors.get(v).copied().flatten()
    }

    #[must_use]
    pub fn distances(&self) -> &[Option<i64>] {
        &self.distances
    }

    #[must_use]
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// Vertices reachable from the source, ascending.
    pub fn reachable(&self) -> impl Iterator<Item = usize> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.map(|_| v))
    }

    /// Path from the source to `target`, source first.
    ///
    /// Empty when `target` is unreachable or out of range.
    #[must_use]
    pub fn reconstruct_path(&self, target: usize) -> Vec<usize> {
        if !self.is_reachable(target) {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessor(current) {
            // A predecessor chain never revisits a vertex in a DAG.
            if path.len() > self.len() {
                break;
            }
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} Paths from source {}:",
            self.objective.label(),
            self.source
        )?;
        for v in self.reachable() {
            if let Some(d) = self.distance(v) {
                writeln!(
                    f,
                    "  To {v}: distance={d}, path={:?}",
                    self.reconstruct_path(v)
                )?;
            }
        }
        Ok(())
    }
}

/// The longest path from a source to the farthest reachable vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Vertices along the path, source first.
    pub path: Vec<usize>,
    /// Total weight of the path.
    pub length: i64,
    /// Last vertex of the path; `None` for a degenerate query.
    pub end_vertex: Option<usize>,
}

impl fmt::Display for CriticalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Critical Path (Longest):")?;
        writeln!(f, "  Path: {:?}", self.path)?;
        writeln!(f, "  Length: {}", self.length)?;
        match self.end_vertex {
            Some(v) => writeln!(f, "  End vertex: {v}"),
            None => writeln!(f, "  End vertex: none"),
        }
    }
}

/// Relaxation engine over a borrowed DAG.
#[derive(Debug, Clone, Copy)]
pub struct DagPath<'g> {
    graph: &'g Graph,
}

impl<'g> DagPath<'g> {
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Single-source paths under `objective`.
    ///
    /// A source outside `[0, n)` (including any source on an empty graph)
    /// returns an empty result rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NotADag`] if the graph contains a cycle.
    #[instrument(skip(self, metrics), fields(n = self.graph.vertex_count()))]
    pub fn compute(
        &self,
        source: usize,
        objective: Objective,
        metrics: &mut dyn Metrics,
    ) -> Result<PathResult, DagError> {
        let n = self.graph.vertex_count();
        if source >= n {
            debug!(source, n, "source out of range; empty result");
            return Ok(PathResult::empty(source, objective));
        }

        let order = TopoSort::new(self.graph)
            .dfs(&mut NoopMetrics)
            .ok_or(DagError::NotADag)?;

        let mut distances: Vec<Option<i64>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        distances[source] = Some(0);

        metrics.start_timer();
        for u in order {
            metrics.increment(counter::VERTICES_PROCESSED);
            let Some(dist_u) = distances[u] else {
                continue;
            };

            for edge in self.graph.edges_from(u) {
                metrics.increment(counter::EDGE_RELAXATIONS);
                let candidate = dist_u.saturating_add(edge.weight);
                if objective.improves(candidate, distances[edge.to]) {
                    distances[edge.to] = Some(candidate);
                    predecessors[edge.to] = Some(u);
                    metrics.increment(counter::SUCCESSFUL_RELAXATIONS);
                }
            }
        }
        metrics.stop_timer();

        Ok(PathResult {
            source,
            objective,
            distances,
            predecessors,
        })
    }

    /// Shortest paths from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NotADag`] if the graph contains a cycle.
    pub fn shortest(&self, source: usize, metrics: &mut dyn Metrics) -> Result<PathResult, DagError> {
        self.compute(source, Objective::Minimize, metrics)
    }

    /// Longest paths from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NotADag`] if the graph contains a cycle.
    pub fn longest(&self, source: usize, metrics: &mut dyn Metrics) -> Result<PathResult, DagError> {
        self.compute(source, Objective::Maximize, metrics)
    }

    /// Longest path from `source` to the vertex with the greatest distance.
    ///
    /// Ties go to the lowest vertex index. If nothing but the source is
    /// reachable the path is `[source]` with length zero.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NotADag`] if the graph contains a cycle.
    pub fn find_critical_path(
        &self,
        source: usize,
        metrics: &mut dyn Metrics,
    ) -> Result<CriticalPath, DagError> {
        let result = self.longest(source, metrics)?;
        Ok(critical_path_of(&result))
    }
}

/// Extract the critical path from a longest-path result.
#[must_use]
pub fn critical_path_of(result: &PathResult) -> CriticalPath {
    let mut best: Option<(usize, i64)> = None;
    for v in result.reachable() {
        let Some(d) = result.distance(v) else {
            continue;
        };
        if best.is_none_or(|(_, best_d)| d > best_d) {
            best = Some((v, d));
        }
    }

    match best {
        Some((end, length)) => CriticalPath {
            path: result.reconstruct_path(end),
            length,
            end_vertex: Some(end),
        },
        None => CriticalPath {
            path: Vec::new(),
            length: 0,
            end_vertex: None,
        },
    }
}
