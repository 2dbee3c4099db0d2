//! Build-timing profiler.
//!
//! Records start and end events for build targets and derives, per target,
//! the total elapsed time, the time spent waiting on direct dependencies
//! that ran concurrently, and the remaining self time.

pub mod clock;
pub mod config;
pub mod error;
pub mod graph;
pub mod profiler;
pub mod report;
pub mod store;
pub mod timing;

pub use clock::{Clock, ManualClock, MonotonicClock, SystemClock};
pub use config::{ClockKind, ProfilerConfig, ReportConfig};
pub use error::{Error, Result};
pub use graph::{DirectDependencies, TargetGraph, TargetNode};
pub use profiler::{BuildProfiler, CalculationSummary};
pub use report::{BuildReport, SortKey, TargetTiming, TechSummary};
pub use store::BuildTimes;
pub use timing::{Interval, Timestamp, TimingRecord};
