//! Commands that record start and end events into a timing file.
//!
//! Lets build scripts that cannot link the library feed the profiler one
//! event at a time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use buildprof_core::{BuildProfiler, BuildTimes, Clock, ClockKind, Timestamp};
use tracing::{debug, warn};

use crate::formatting::{print_section_header, print_success, print_warning, SectionStyle};

fn open_times(path: &Path) -> Result<BuildTimes> {
    if !path.exists() {
        debug!(path = %path.display(), "starting new timing file");
        return Ok(BuildTimes::new());
    }
    BuildTimes::load(path)
        .with_context(|| format!("Failed to load build times from {}", path.display()))
}

fn profiler_for(times: BuildTimes, clock: ClockKind) -> BuildProfiler<Box<dyn Clock>> {
    if clock == ClockKind::Monotonic {
        warn!("monotonic clock restarts with every process; pass --at for cross-process timings");
    }
    BuildProfiler::with_clock(times, clock.build())
}

pub fn cmd_start(
    times_path: PathBuf,
    target: String,
    tech: Option<String>,
    at: Option<Timestamp>,
    clock: ClockKind,
) -> Result<()> {
    let times = open_times(&times_path)?;
    let profiler = profiler_for(times.clone(), clock);

    profiler.set_start_time(&target, tech.as_deref(), at);
    times
        .save(&times_path)
        .with_context(|| format!("Failed to write build times to {}", times_path.display()))?;

    print_success(&format!("Started {}", target));
    Ok(())
}

pub fn cmd_end(
    times_path: PathBuf,
    target: String,
    at: Option<Timestamp>,
    clock: ClockKind,
) -> Result<()> {
    let times = open_times(&times_path)?;
    let profiler = profiler_for(times.clone(), clock);

    if !times.contains(&target) {
        print_section_header("Nothing recorded", SectionStyle::Secondary);
        print_warning(&format!("{} was never started; end event ignored", target));
        return Ok(());
    }

    profiler.set_end_time(&target, at);
    times
        .save(&times_path)
        .with_context(|| format!("Failed to write build times to {}", times_path.display()))?;

    print_success(&format!("Finished {}", target));
    Ok(())
}
