//! dagscope-sim library.
//!
//! Reproducible graph datasets for exercising the dagscope pipeline: a fixed
//! nine-dataset suite (small, medium and large graphs mixing DAGs, single
//! cycles and many SCCs) plus a configurable random generator.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Determinism**: every generator takes a seed or a [`rng::DeterministicRng`];
//!   the same seed always yields byte-identical JSON.

pub mod generator;
pub mod rng;

pub use generator::{Dataset, RandomGraphConfig, random_graph, standard_suite, write_suite};
pub use rng::DeterministicRng;
