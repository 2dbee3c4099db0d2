//! Command implementations for the CLI.

mod analyze;
mod record;

use std::path::Path;

use anyhow::{Context, Result};
use buildprof_core::{BuildProfiler, BuildTimes, CalculationSummary, TargetGraph};

pub use analyze::{cmd_analyze, cmd_techs};
pub use record::{cmd_end, cmd_start};

/// Loads recorded times and the optional graph, then derives build times.
///
/// Without a graph every target is treated as having no dependencies.
fn load_and_calculate(
    times_path: &Path,
    graph_path: Option<&Path>,
) -> Result<(BuildTimes, CalculationSummary)> {
    let times = BuildTimes::load(times_path)
        .with_context(|| format!("Failed to load build times from {}", times_path.display()))?;

    let graph = match graph_path {
        Some(path) => TargetGraph::load(path)
            .with_context(|| format!("Failed to load target graph from {}", path.display()))?,
        None => TargetGraph::default(),
    };

    let summary = BuildProfiler::new(times.clone()).calculate_build_times(&graph);
    Ok((times, summary))
}
