//! Dataset generators.
//!
//! [`standard_suite`] produces nine graphs in three size tiers:
//!
//! | Name | n | Shape |
//! |------|---|-------|
//! | `data_small_1` | 6 | simple DAG with a diamond |
//! | `data_small_2` | 6 | one 3-cycle hanging off the source |
//! | `data_small_3` | 8 | two SCCs joined by a bridge, plus a detached chain |
//! | `data_medium_1` | 15 | binary-tree DAG |
//! | `data_medium_2` | 12 | circulant graph, every vertex has 3 successors |
//! | `data_medium_3` | 12 | SCCs of size 4, 3, 2 chained into singletons |
//! | `data_large_1` | 30 | long chain with skip edges |
//! | `data_large_2` | 25 | random digraph at 15% density |
//! | `data_large_3` | 40 | ten small cycles chained together |
//!
//! The small tier is fixed; the rest draw weights (and for `data_large_2`
//! and `data_large_3`, structure) from a [`DeterministicRng`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dagscope_core::{EdgeData, GraphData};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::rng::DeterministicRng;

const WEIGHT_MODEL: &str = "edge";

/// A named graph description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub data: GraphData,
}

impl Dataset {
    fn new(name: &str, n: usize, edges: Vec<EdgeData>) -> Self {
        Self {
            name: name.to_string(),
            data: GraphData {
                directed: true,
                n,
                edges,
                source: 0,
                weight_model: Some(WEIGHT_MODEL.to_string()),
            },
        }
    }

    /// File name the dataset is written under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// Parameters for [`random_graph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomGraphConfig {
    /// Number of vertices.
    pub n: usize,
    /// Chance (percent, 0–100) that each ordered pair `(u, v)`, `u != v`,
    /// gets an edge.
    pub density_percent: u8,
    /// Inclusive weight range.
    pub min_weight: i64,
    pub max_weight: i64,
    /// Only emit edges `u → v` with `u < v`, guaranteeing a DAG.
    pub acyclic: bool,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            n: 25,
            density_percent: 15,
            min_weight: 1,
            max_weight: 20,
            acyclic: false,
        }
    }
}

const fn edge(u: usize, v: usize, w: i64) -> EdgeData {
    EdgeData { u, v, w }
}

/// Random directed graph with source 0.
#[must_use]
pub fn random_graph(config: &RandomGraphConfig, rng: &mut DeterministicRng) -> GraphData {
    let mut edges = Vec::new();
    for u in 0..config.n {
        for v in 0..config.n {
            if u == v || (config.acyclic && u > v) {
                continue;
            }
            if rng.hit_rate_percent(config.density_percent) {
                edges.push(edge(u, v, rng.weight(config.min_weight, config.max_weight)));
            }
        }
    }

    GraphData {
        directed: true,
        n: config.n,
        edges,
        source: 0,
        weight_model: Some(WEIGHT_MODEL.to_string()),
    }
}

fn simple_dag() -> Dataset {
    Dataset::new(
        "data_small_1",
        6,
        vec![
            edge(0, 1, 2),
            edge(0, 2, 3),
            edge(1, 3, 1),
            edge(2, 3, 2),
            edge(3, 4, 4),
            edge(4, 5, 1),
        ],
    )
}

fn single_cycle() -> Dataset {
    Dataset::new(
        "data_small_2",
        6,
        vec![
            edge(0, 1, 3),
            edge(1, 2, 2),
            edge(2, 3, 4),
            edge(3, 1, 1),
            edge(0, 4, 5),
            edge(4, 5, 2),
        ],
    )
}

fn two_sccs() -> Dataset {
    Dataset::new(
        "data_small_3",
        8,
        vec![
            edge(0, 1, 2),
            edge(1, 2, 3),
            edge(2, 0, 1),
            edge(3, 4, 2),
            edge(4, 3, 1),
            edge(2, 3, 5),
            edge(5, 6, 3),
            edge(6, 7, 2),
        ],
    )
}

fn tree_dag(rng: &mut DeterministicRng) -> Dataset {
    let mut edges = Vec::new();
    for i in 0..7 {
        edges.push(edge(i, 2 * i + 1, rng.weight(1, 10)));
        edges.push(edge(i, 2 * i + 2, rng.weight(1, 10)));
    }
    Dataset::new("data_medium_1", 15, edges)
}

fn circulant(rng: &mut DeterministicRng) -> Dataset {
    let n = 12;
    let mut edges = Vec::new();
    for i in 0..n {
        for step in 1..=3 {
            edges.push(edge(i, (i + step) % n, rng.weight(1, 8)));
        }
    }
    Dataset::new("data_medium_2", n, edges)
}

fn chained_sccs() -> Dataset {
    Dataset::new(
        "data_medium_3",
        12,
        vec![
            edge(0, 1, 2),
            edge(1, 2, 3),
            edge(2, 3, 1),
            edge(3, 0, 2),
            edge(4, 5, 2),
            edge(5, 6, 1),
            edge(6, 4, 3),
            edge(7, 8, 4),
            edge(8, 7, 2),
            edge(3, 4, 5),
            edge(6, 7, 3),
            edge(8, 9, 2),
            edge(9, 10, 1),
            edge(10, 11, 4),
        ],
    )
}

fn long_chain(rng: &mut DeterministicRng) -> Dataset {
    let n = 30;
    let mut edges = Vec::new();
    for i in 0..n - 1 {
        edges.push(edge(i, i + 1, rng.weight(1, 10)));
    }
    for i in (0..n - 5).step_by(5) {
        edges.push(edge(i, i + 5, rng.weight(5, 19)));
    }
    Dataset::new("data_large_1", n, edges)
}

fn random_dense(rng: &mut DeterministicRng) -> Dataset {
    let data = random_graph(&RandomGraphConfig::default(), rng);
    Dataset {
        name: "data_large_2".to_string(),
        data,
    }
}

fn many_small_sccs(rng: &mut DeterministicRng) -> Dataset {
    let n = 40;
    let mut edges = Vec::new();
    let mut start = 0;

    for _ in 0..10 {
        if start >= n {
            break;
        }
        let size = (3 + rng.index(3)).min(n - start);
        for i in 0..size {
            edges.push(edge(start + i, start + (i + 1) % size, rng.weight(1, 8)));
        }
        let next = start + size;
        if next < n {
            edges.push(edge(next - 1, next, rng.weight(1, 10)));
        }
        start = next;
    }
    Dataset::new("data_large_3", n, edges)
}

/// The nine-dataset suite for `seed`, ordered small → large.
#[must_use]
pub fn standard_suite(seed: u64) -> Vec<Dataset> {
    let mut rng = DeterministicRng::new(seed);
    vec![
        simple_dag(),
        single_cycle(),
        two_sccs(),
        tree_dag(&mut rng),
        circulant(&mut rng),
        chained_sccs(),
        long_chain(&mut rng),
        random_dense(&mut rng),
        many_small_sccs(&mut rng),
    ]
}

/// Write the suite for `seed` into `dir` as pretty JSON, one file per
/// dataset. Returns the written paths.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or a file cannot be written.
#[instrument(skip(dir), fields(dir = %dir.display()))]
pub fn write_suite(dir: &Path, seed: u64) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for dataset in standard_suite(seed) {
        let path = dir.join(dataset.file_name());
        let json = serde_json::to_string_pretty(&dataset.data)
            .with_context(|| format!("Failed to serialize {}", dataset.name))?;
        std::fs::write(&path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(
            file = %path.display(),
            n = dataset.data.n,
            edges = dataset.data.edges.len(),
            "dataset written"
        );
        written.push(path);
    }

    info!(count = written.len(), "suite written");
    Ok(written)
}
