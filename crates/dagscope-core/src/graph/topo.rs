//! Topological ordering of an (assumed) acyclic graph.
//!
//! Two independent strategies are provided. Neither verifies acyclicity up
//! front; both detect a cycle while running and report it by returning
//! `None`, never a partial order.
//!
//! | Strategy | Tie-break | Cycle signal |
//! |----------|-----------|--------------|
//! | [`TopoSort::kahn`] | zero in-degree vertices dequeued FIFO, seeded ascending | fewer than `n` vertices emitted |
//! | [`TopoSort::dfs`]  | roots tried ascending, reverse finish order | edge into a gray vertex |
//!
//! The two orders may differ but both respect every edge.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::metrics::{Metrics, counter};

/// Which ordering algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopoStrategy {
    /// In-degree elimination with a FIFO queue.
    #[default]
    Kahn,
    /// Depth-first postorder.
    Dfs,
}

impl TopoStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kahn => "kahn",
            Self::Dfs => "dfs",
        }
    }
}

impl fmt::Display for TopoStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Topological sorter over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct TopoSort<'g> {
    graph: &'g Graph,
}

impl<'g> TopoSort<'g> {
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Run the selected strategy.
    #[must_use]
    pub fn order(&self, strategy: TopoStrategy, metrics: &mut dyn Metrics) -> Option<Vec<usize>> {
        match strategy {
            TopoStrategy::Kahn => self.kahn(metrics),
            TopoStrategy::Dfs => self.dfs(metrics),
        }
    }

    /// In-degree elimination (Kahn's algorithm).
    ///
    /// Returns `None` if the graph contains a cycle.
    #[must_use]
    #[instrument(skip_all, fields(n = self.graph.vertex_count()))]
    pub fn kahn(&self, metrics: &mut dyn Metrics) -> Option<Vec<usize>> {
        let n = self.graph.vertex_count();
        let mut in_degree = self.graph.in_degrees();

        metrics.start_timer();

        let mut queue: VecDeque<usize> = VecDeque::new();
        for (v, &degree) in in_degree.iter().enumerate() {
            if degree == 0 {
                queue.push_back(v);
                metrics.increment(counter::QUEUE_PUSHES);
            }
        }

        let mut order = Vec::with_capacity(n);
        while let Some(u) = queue.pop_front() {
            metrics.increment(counter::QUEUE_POPS);
            order.push(u);

            for edge in self.graph.edges_from(u) {
                metrics.increment(counter::EDGE_RELAXATIONS);
                let v = edge.to;
                in_degree[v] -= 1;
                if in_degree[v] == 0 {
                    queue.push_back(v);
                    metrics.increment(counter::QUEUE_PUSHES);
                }
            }
        }

        metrics.stop_timer();

        if order.len() == n {
            Some(order)
        } else {
            debug!(emitted = order.len(), n, "kahn: cycle detected");
            None
        }
    }

    /// Depth-first postorder sort.
    ///
    /// Returns `None` as soon as an edge into a gray (in-progress) vertex is
    /// found.
    #[must_use]
    #[instrument(skip_all, fields(n = self.graph.vertex_count()))]
    pub fn dfs(&self, metrics: &mut dyn Metrics) -> Option<Vec<usize>> {
        let n = self.graph.vertex_count();
        let mut color = vec![Color::White; n];
        let mut finished: Vec<usize> = Vec::with_capacity(n);

        metrics.start_timer();

        for root in 0..n {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            metrics.increment(counter::DFS_VISITS);
            let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(&(u, next_edge)) = frames.last() {
                let Some(edge) = self.graph.edges_from(u).get(next_edge) else {
                    color[u] = Color::Black;
                    finished.push(u);
                    metrics.increment(counter::STACK_PUSHES);
                    frames.pop();
                    continue;
                };
                if let Some(top) = frames.last_mut() {
                    top.1 += 1;
                }
                metrics.increment(counter::EDGE_CHECKS);

                match color[edge.to] {
                    Color::Gray => {
                        metrics.stop_timer();
                        debug!(from = u, to = edge.to, "dfs: back edge, cycle detected");
                        return None;
                    }
                    Color::White => {
                        color[edge.to] = Color::Gray;
                        metrics.increment(counter::DFS_VISITS);
                        frames.push((edge.to, 0));
                    }
                    Color::Black => {}
                }
            }
        }

        metrics.stop_timer();

        let mut order = Vec::with_capacity(n);
        while let Some(v) = finished.pop() {
            order.push(v);
            metrics.increment(counter::STACK_POPS);
        }
        Some(order)
    }

    /// Expand an order over component indices into original vertices by
    /// concatenating each component's members.
    ///
    /// Component indices outside `sccs` are skipped.
    #[must_use]
    pub fn expand_to_vertices(component_order: &[usize], sccs: &[Vec<usize>]) -> Vec<usize> {
        component_order
            .iter()
            .filter_map(|&c| sccs.get(c))
            .flat_map(|members| members.iter().copied())
            .collect()
    }
}

/// Check that `order` is a permutation of `0..n` respecting every edge.
#[must_use]
pub fn is_valid_order(graph: &Graph, order: &[usize]) -> bool {
    let n = graph.vertex_count();
    if order.len() != n {
        return false;
    }
    let mut position = vec![None; n];
    for (i, &v) in order.iter().enumerate() {
        if v >= n || position[v].is_some() {
            return false;
        }
        position[v] = Some(i);
    }
    graph
        .edges()
        .all(|e| matches!((position[e.from], position[e.to]), (Some(a), Some(b)) if a < b))
}
