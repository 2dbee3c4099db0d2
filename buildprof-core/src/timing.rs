//! Timing records and interval arithmetic.

use serde::{Deserialize, Serialize};

/// Integer timestamp in milliseconds.
///
/// Signed so that `end - start` stays exact for any pair the recorder
/// accepts, including out-of-order events.
pub type Timestamp = i64;

/// Timing data recorded for one target during a build run.
///
/// `start_time` and `tech_name` come from the start event, `end_time` from
/// the end event. The three derived fields are written by
/// [`BuildProfiler::calculate_build_times`](crate::BuildProfiler::calculate_build_times).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingRecord {
    pub start_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<i64>,
}

impl TimingRecord {
    pub fn new(start_time: Timestamp, tech_name: Option<String>) -> Self {
        Self {
            start_time,
            tech_name,
            ..Self::default()
        }
    }

    /// Returns the recorded interval, or `None` while the end event is missing.
    #[inline]
    pub fn interval(&self) -> Option<Interval> {
        self.end_time.map(|end| Interval::new(self.start_time, end))
    }
}

/// A closed `[start, end]` span of recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    #[inline]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Length of the interval, `end - start`, saturating at the `i64` bounds.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Length of the shared part of two intervals, clamped at zero.
    ///
    /// Symmetric: `a.overlap(&b) == b.overlap(&a)`.
    #[inline]
    pub fn overlap(&self, other: &Interval) -> i64 {
        let shared = self.end.min(other.end).saturating_sub(self.start.max(other.start));
        shared.max(0)
    }
}
