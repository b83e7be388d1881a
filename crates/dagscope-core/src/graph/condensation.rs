//! SCC condensation: contract every strongly connected component to a single
//! vertex.
//!
//! # Construction
//!
//! 1. Derive the component map (vertex → component index) from the partition.
//! 2. For every original edge `u → v` whose endpoints lie in different
//!    components, record a candidate keyed by `(component(u), component(v))`,
//!    keeping the smaller weight when the key repeats.
//! 3. Materialize one edge per key, in ascending key order.
//!
//! Edges inside a component (including self-loops) are dropped.
//!
//! Given a correct SCC partition the result is acyclic by construction: a
//! cycle between components would make them mutually reachable and therefore
//! one component. [`Condensation::is_acyclic`] re-checks this independently.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::graph::scc::component_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Component-level DAG derived from a graph and its SCC partition.
#[derive(Debug, Clone)]
pub struct Condensation {
    graph: Graph,
    sccs: Vec<Vec<usize>>,
    component_map: Vec<Option<usize>>,
}

impl Condensation {
    /// Build the condensation of `original` under the partition `sccs`.
    #[must_use]
    #[instrument(skip_all, fields(n = original.vertex_count(), components = sccs.len()))]
    pub fn build(original: &Graph, sccs: Vec<Vec<usize>>) -> Self {
        let component_map = component_map(&sccs, original.vertex_count());

        let mut min_weights: BTreeMap<(usize, usize), i64> = BTreeMap::new();
        for edge in original.edges() {
            let (Some(from), Some(to)) = (component_map[edge.from], component_map[edge.to]) else {
                continue;
            };
            if from == to {
                continue;
            }
            min_weights
                .entry((from, to))
                .and_modify(|w| *w = (*w).min(edge.weight))
                .or_insert(edge.weight);
        }

        let mut graph = Graph::new(sccs.len(), true);
        for (&(from, to), &weight) in &min_weights {
            graph.add_edge(from, to, weight);
        }

        debug!(edges = graph.edge_count(), "condensation built");

        Self {
            graph,
            sccs,
            component_map,
        }
    }

    /// The condensation DAG (vertices are component indices).
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The partition this condensation was built from.
    #[must_use]
    pub fn sccs(&self) -> &[Vec<usize>] {
        &self.sccs
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sccs.len()
    }

    /// Component index of an original vertex.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.component_map.get(vertex).copied().flatten()
    }

    /// Original vertices belonging to a component, ascending.
    #[must_use]
    pub fn vertices_in(&self, component: usize) -> Option<&[usize]> {
        self.sccs.get(component).map(Vec::as_slice)
    }

    /// Independent white/gray/black DFS cycle check over the condensation.
    ///
    /// Always `true` for a condensation built from a correct SCC partition.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        let n = self.graph.vertex_count();
        let mut color = vec![Color::White; n];

        for root in 0..n {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(&(u, next_edge)) = frames.last() {
                let Some(edge) = self.graph.edges_from(u).get(next_edge) else {
                    color[u] = Color::Black;
                    frames.pop();
                    continue;
                };
                if let Some(top) = frames.last_mut() {
                    top.1 += 1;
                }
                match color[edge.to] {
                    Color::Gray => return false,
                    Color::White => {
                        color[edge.to] = Color::Gray;
                        frames.push((edge.to, 0));
                    }
                    Color::Black => {}
                }
            }
        }
        true
    }
}

impl fmt::Display for Condensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Condensation Graph:")?;
        writeln!(f, "  Components: {}", self.component_count())?;
        writeln!(f, "  Edges: {}", self.graph.edge_count())?;
        writeln!(f, "  Is DAG: {}", self.is_acyclic())?;
        for (i, component) in self.sccs.iter().enumerate() {
            writeln!(f, "  Component {i}: {component:?}")?;
        }
        writeln!(f)?;
        writeln!(f, "Condensation edges:")?;
        for edge in self.graph.edges() {
            writeln!(f, "  {} → {} (w={})", edge.from, edge.to, edge.weight)?;
        }
        Ok(())
    }
}
