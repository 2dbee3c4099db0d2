//! Recording of target start/end events and derivation of build times.

use crate::clock::{Clock, SystemClock};
use crate::graph::DirectDependencies;
use crate::store::BuildTimes;
use crate::timing::{Timestamp, TimingRecord};

/// Records per-target timings into a [`BuildTimes`] store and derives
/// total, waiting and self time from them.
///
/// The profiler never fails: unknown targets, missing end events and graph
/// gaps all degrade to well-defined defaults.
///
/// ```
/// use buildprof_core::{BuildProfiler, BuildTimes};
/// use std::collections::HashMap;
///
/// let times = BuildTimes::new();
/// let profiler = BuildProfiler::new(times.clone());
///
/// profiler.set_start_time("bundle/dep", Some("tech"), Some(100500));
/// profiler.set_end_time("bundle/dep", Some(100501));
/// profiler.set_start_time("bundle/app", None, Some(100500));
/// profiler.set_end_time("bundle/app", Some(100503));
///
/// let mut graph = HashMap::new();
/// graph.insert("bundle/app".to_string(), vec!["bundle/dep".to_string()]);
/// profiler.calculate_build_times(&graph);
///
/// let app = times.get("bundle/app").unwrap();
/// assert_eq!(app.total_time, Some(3));
/// assert_eq!(app.waiting_time, Some(1));
/// assert_eq!(app.self_time, Some(2));
/// ```
#[derive(Debug)]
pub struct BuildProfiler<C: Clock = SystemClock> {
    times: BuildTimes,
    clock: C,
}

/// Outcome of one [`BuildProfiler::calculate_build_times`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationSummary {
    /// Targets whose derived fields were written.
    pub computed: usize,
    /// Targets left untouched because their end event is missing.
    pub skipped: usize,
}

impl BuildProfiler<SystemClock> {
    /// Creates a profiler recording into `times`, defaulting timestamps to
    /// the wall clock.
    pub fn new(times: BuildTimes) -> Self {
        Self::with_clock(times, SystemClock)
    }
}

impl<C: Clock> BuildProfiler<C> {
    pub fn with_clock(times: BuildTimes, clock: C) -> Self {
        Self { times, clock }
    }

    /// The store this profiler records into.
    #[inline]
    pub fn times(&self) -> &BuildTimes {
        &self.times
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Records the start of `target`.
    ///
    /// Creates the record if needed, otherwise overwrites `start_time` and
    /// `tech_name`. Derived fields from an earlier calculation are kept as
    /// they are until the next [`calculate_build_times`](Self::calculate_build_times).
    pub fn set_start_time(&self, target: &str, tech: Option<&str>, timestamp: Option<Timestamp>) {
        let start_time = timestamp.unwrap_or_else(|| self.clock.now());
        let tech_name = tech.map(str::to_string);

        tracing::trace!(target_name = target, start_time, tech = ?tech_name, "target started");

        self.times.upsert(
            target,
            || TimingRecord::new(start_time, None),
            |record| {
                record.start_time = start_time;
                record.tech_name = tech_name;
            },
        );
    }

    /// Records the end of `target`.
    ///
    /// Ignored when `target` was never started: no record is created.
    pub fn set_end_time(&self, target: &str, timestamp: Option<Timestamp>) {
        let end_time = timestamp.unwrap_or_else(|| self.clock.now());
        let recorded = self.times.update(target, |record| {
            record.end_time = Some(end_time);
        });

        if recorded {
            tracing::trace!(target_name = target, end_time, "target finished");
        } else {
            tracing::debug!(target_name = target, "ignoring end event for target that never started");
        }
    }

    /// Derives `total_time`, `waiting_time` and `self_time` for every target
    /// with both a start and an end event.
    ///
    /// Waiting time is the sum, over each direct dependency with a recorded
    /// interval, of that interval's overlap with the target's own. Overlaps
    /// of different dependencies are summed independently, so dependencies
    /// running concurrently with each other are counted once each. All sums
    /// saturate at the `i64` bounds.
    pub fn calculate_build_times<G>(&self, graph: &G) -> CalculationSummary
    where
        G: DirectDependencies + ?Sized,
    {
        let intervals = self.times.intervals();
        let mut summary = CalculationSummary {
            computed: 0,
            skipped: self.times.len().saturating_sub(intervals.len()),
        };

        for (target, interval) in &intervals {
            let total_time = interval.duration();
            let waiting_time = graph
                .direct_dependencies(target)
                .iter()
                .filter_map(|dep| intervals.get(dep))
                .map(|dep_interval| interval.overlap(dep_interval))
                .fold(0i64, i64::saturating_add);
            let self_time = total_time.saturating_sub(waiting_time);

            if self_time < 0 {
                tracing::warn!(
                    target_name = %target,
                    total_time,
                    waiting_time,
                    "waiting time exceeds total time; dependencies overlap each other"
                );
            }

            let written = self.times.update(target, |record| {
                record.total_time = Some(total_time);
                record.waiting_time = Some(waiting_time);
                record.self_time = Some(self_time);
            });
            if written {
                summary.computed += 1;
            }
        }

        tracing::debug!(
            computed = summary.computed,
            skipped = summary.skipped,
            "calculated build times"
        );
        summary
    }
}
