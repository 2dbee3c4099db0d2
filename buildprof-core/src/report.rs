//! Aggregated views over computed build times.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::BuildTimes;
use crate::timing::Timestamp;

/// Ordering of report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Largest self time first.
    #[default]
    #[serde(rename = "self")]
    SelfTime,
    /// Largest total time first.
    #[serde(rename = "total")]
    TotalTime,
    /// Largest waiting time first.
    #[serde(rename = "waiting")]
    WaitingTime,
    /// Alphabetical by target name.
    Name,
}

impl SortKey {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::SelfTime => "self",
            SortKey::TotalTime => "total",
            SortKey::WaitingTime => "waiting",
            SortKey::Name => "name",
        }
    }
}

/// One computed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTiming {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_name: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_time: i64,
    pub self_time: i64,
    pub waiting_time: i64,
}

/// Totals for all targets built by one technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechSummary {
    /// `None` groups targets started without a technology label.
    pub tech_name: Option<String>,
    pub targets: usize,
    pub total_self_time: i64,
    pub total_waiting_time: i64,
}

/// Snapshot of computed build times, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Rows after sorting and the optional `top` limit.
    pub targets: Vec<TargetTiming>,
    /// Number of targets with computed times, before the `top` limit.
    pub computed: usize,
    /// Number of recorded targets without computed times.
    pub skipped: usize,
    /// Span from the earliest start to the latest end of computed targets.
    pub wall_time: Option<i64>,
    pub total_self_time: i64,
    pub total_waiting_time: i64,
    pub techs: Vec<TechSummary>,
}

impl BuildReport {
    /// Builds a report from the computed records in `times`.
    ///
    /// Records without derived fields (unfinished, or finished after the last
    /// calculation) are counted as skipped.
    pub fn from_times(times: &BuildTimes, sort: SortKey, top: Option<usize>) -> Self {
        let snapshot = times.snapshot();
        let recorded = snapshot.len();

        let mut rows: Vec<TargetTiming> = snapshot
            .into_iter()
            .filter_map(|(name, record)| {
                Some(TargetTiming {
                    end_time: record.end_time?,
                    total_time: record.total_time?,
                    self_time: record.self_time?,
                    waiting_time: record.waiting_time?,
                    start_time: record.start_time,
                    tech_name: record.tech_name,
                    name,
                })
            })
            .collect();

        let computed = rows.len();
        let wall_time = match (
            rows.iter().map(|r| r.start_time).min(),
            rows.iter().map(|r| r.end_time).max(),
        ) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        };
        let total_self_time = rows.iter().map(|r| r.self_time).fold(0i64, i64::saturating_add);
        let total_waiting_time = rows
            .iter()
            .map(|r| r.waiting_time)
            .fold(0i64, i64::saturating_add);
        let techs = summarize_techs(&rows);

        // snapshot order is by name, so a stable sort keeps names as tie-breaker
        match sort {
            SortKey::SelfTime => rows.sort_by_key(|r| Reverse(r.self_time)),
            SortKey::TotalTime => rows.sort_by_key(|r| Reverse(r.total_time)),
            SortKey::WaitingTime => rows.sort_by_key(|r| Reverse(r.waiting_time)),
            SortKey::Name => {}
        }
        if let Some(limit) = top {
            rows.truncate(limit);
        }

        Self {
            targets: rows,
            computed,
            skipped: recorded - computed,
            wall_time,
            total_self_time,
            total_waiting_time,
            techs,
        }
    }

    /// Share of summed target time spent waiting on dependencies (0.0 to 1.0).
    pub fn waiting_ratio(&self) -> f64 {
        let total = self.total_self_time.saturating_add(self.total_waiting_time);
        if total <= 0 {
            return 0.0;
        }
        self.total_waiting_time as f64 / total as f64
    }
}

fn summarize_techs(rows: &[TargetTiming]) -> Vec<TechSummary> {
    let mut by_tech: BTreeMap<Option<&str>, TechSummary> = BTreeMap::new();

    for row in rows {
        let summary = by_tech
            .entry(row.tech_name.as_deref())
            .or_insert_with(|| TechSummary {
                tech_name: row.tech_name.clone(),
                targets: 0,
                total_self_time: 0,
                total_waiting_time: 0,
            });
        summary.targets += 1;
        summary.total_self_time = summary.total_self_time.saturating_add(row.self_time);
        summary.total_waiting_time = summary.total_waiting_time.saturating_add(row.waiting_time);
    }

    let mut techs: Vec<TechSummary> = by_tech.into_values().collect();
    techs.sort_by_key(|t| Reverse(t.total_self_time));
    techs
}
