//! Strongly connected components via Tarjan's algorithm.
//!
//! # Algorithm
//!
//! One depth-first pass assigns each vertex a discovery index and a low-link
//! value (the smallest discovery index reachable through the DFS tree plus at
//! most one back edge). Vertices are pushed onto a component stack on first
//! visit. For each edge `u → v`:
//!
//! - `v` unvisited (tree edge): descend, then `low[u] = min(low[u], low[v])`.
//! - `v` on the stack (back edge): `low[u] = min(low[u], disc[v])`.
//! - otherwise (cross edge into a closed component): ignored.
//!
//! A vertex that finishes with `low == disc` is a component root; the stack is
//! popped down to it.
//!
//! The DFS is iterative: an explicit frame stack of `(vertex, next edge)`
//! replaces recursion so deep graphs cannot overflow the call stack.
//!
//! # Output order
//!
//! Components are emitted in reverse topological order of the condensation
//! (sinks first). Members of each component are sorted ascending.

use std::fmt;

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::metrics::{Metrics, counter};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next_edge: usize,
}

struct TarjanState {
    next_index: usize,
    disc: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    sccs: Vec<Vec<usize>>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            next_index: 0,
            disc: vec![None; n],
            low: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            sccs: Vec::new(),
        }
    }

    fn discover(&mut self, v: usize, metrics: &mut dyn Metrics) {
        metrics.increment(counter::DFS_VISITS);
        self.disc[v] = Some(self.next_index);
        self.low[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn pop_component(&mut self, root: usize, metrics: &mut dyn Metrics) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            metrics.increment(counter::STACK_POPS);
            if w == root {
                break;
            }
        }
        component.sort_unstable();
        self.sccs.push(component);
        metrics.increment(counter::SCCS_FOUND);
    }

    fn strong_connect(&mut self, graph: &Graph, root: usize, metrics: &mut dyn Metrics) {
        self.discover(root, metrics);
        let mut frames = vec![Frame {
            vertex: root,
            next_edge: 0,
        }];

        while let Some(&Frame { vertex: u, next_edge }) = frames.last() {
            if let Some(edge) = graph.edges_from(u).get(next_edge) {
                if let Some(top) = frames.last_mut() {
                    top.next_edge += 1;
                }
                metrics.increment(counter::EDGE_CHECKS);

                let v = edge.to;
                match self.disc[v] {
                    None => {
                        self.discover(v, metrics);
                        frames.push(Frame {
                            vertex: v,
                            next_edge: 0,
                        });
                    }
                    Some(disc_v) if self.on_stack[v] => {
                        self.low[u] = self.low[u].min(disc_v);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All edges of `u` examined: u finishes.
            frames.pop();
            if let Some(parent) = frames.last() {
                self.low[parent.vertex] = self.low[parent.vertex].min(self.low[u]);
            }
            if self.disc[u] == Some(self.low[u]) {
                self.pop_component(u, metrics);
            }
        }
    }
}

/// Find all strongly connected components of `graph`.
///
/// Returns components in reverse topological order, each sorted ascending.
/// Every vertex appears in exactly one component; an empty graph yields no
/// components.
#[instrument(skip_all, fields(n = graph.vertex_count()))]
pub fn find_sccs(graph: &Graph, metrics: &mut dyn Metrics) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut state = TarjanState::new(n);

    metrics.start_timer();
    for v in 0..n {
        if state.disc[v].is_none() {
            state.strong_connect(graph, v, metrics);
        }
    }
    metrics.stop_timer();

    debug!(components = state.sccs.len(), "tarjan finished");
    state.sccs
}

/// Map each vertex in `0..vertex_count` to the index of its component.
///
/// Vertices missing from `sccs` map to `None`; entries outside the range are
/// ignored.
#[must_use]
pub fn component_map(sccs: &[Vec<usize>], vertex_count: usize) -> Vec<Option<usize>> {
    let mut map = vec![None; vertex_count];
    for (index, component) in sccs.iter().enumerate() {
        for &v in component {
            if let Some(slot) = map.get_mut(v) {
                *slot = Some(index);
            }
        }
    }
    map
}

/// Human-readable listing of an SCC partition.
#[derive(Debug, Clone, Copy)]
pub struct SccListing<'a>(pub &'a [Vec<usize>]);

impl fmt::Display for SccListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strongly Connected Components ({}):", self.0.len())?;
        for (i, component) in self.0.iter().enumerate() {
            writeln!(f, "  SCC {i} (size={}): {component:?}", component.len())?;
        }
        Ok(())
    }
}
