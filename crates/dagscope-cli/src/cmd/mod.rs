pub mod completions;
pub mod generate;
pub mod report;
pub mod run;

use clap::ValueEnum;
use dagscope_core::TopoStrategy;

/// `--strategy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// In-degree elimination with a FIFO queue.
    Kahn,
    /// Depth-first postorder.
    Dfs,
}

impl From<StrategyArg> for TopoStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Kahn => Self::Kahn,
            StrategyArg::Dfs => Self::Dfs,
        }
    }
}
