//! Shared store of timing records for one build run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::timing::{Interval, TimingRecord};

/// Handle to the mapping from target name to [`TimingRecord`].
///
/// Cloning the handle shares the underlying store, so the caller can keep a
/// clone for inspection while a [`BuildProfiler`](crate::BuildProfiler)
/// records into it. The profiler mutates entries but never replaces the
/// store itself.
#[derive(Debug, Clone, Default)]
pub struct BuildTimes {
    records: Arc<DashMap<String, TimingRecord>>,
}

impl BuildTimes {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn contains(&self, target: &str) -> bool {
        self.records.contains_key(target)
    }

    /// Returns a copy of the record for `target`.
    pub fn get(&self, target: &str) -> Option<TimingRecord> {
        self.records.get(target).map(|r| r.value().clone())
    }

    /// Inserts a record directly, replacing any existing one.
    ///
    /// Used when replaying recorded builds; live recording goes through
    /// the profiler.
    pub fn insert(&self, target: impl Into<String>, record: TimingRecord) {
        self.records.insert(target.into(), record);
    }

    /// Copies the current contents into a map ordered by target name.
    pub fn snapshot(&self) -> BTreeMap<String, TimingRecord> {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Collects the complete `[start, end]` interval of every finished target.
    pub(crate) fn intervals(&self) -> BTreeMap<String, Interval> {
        self.records
            .iter()
            .filter_map(|entry| entry.value().interval().map(|i| (entry.key().clone(), i)))
            .collect()
    }

    /// Applies `f` to the record for `target` if one exists.
    ///
    /// Returns `false` without touching the store when there is no record.
    pub(crate) fn update<F>(&self, target: &str, f: F) -> bool
    where
        F: FnOnce(&mut TimingRecord),
    {
        match self.records.get_mut(target) {
            Some(mut record) => {
                f(record.value_mut());
                true
            }
            None => false,
        }
    }

    /// Applies `f` to the record for `target`, creating it from `init` first
    /// when missing.
    pub(crate) fn upsert<I, F>(&self, target: &str, init: I, f: F)
    where
        I: FnOnce() -> TimingRecord,
        F: FnOnce(&mut TimingRecord),
    {
        let mut record = self.records.entry(target.to_string()).or_insert_with(init);
        f(record.value_mut());
    }

    /// Parses a JSON object keyed by target name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: BTreeMap<String, TimingRecord> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    /// Serializes the store as pretty JSON, ordered by target name.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Loads a timing file written by [`BuildTimes::save`] or by a recorder
    /// in another process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let records: BTreeMap<String, TimingRecord> =
            serde_json::from_str(&content).map_err(|error| Error::Json {
                error,
                context: path.display().to_string(),
            })?;
        tracing::debug!(path = %path.display(), targets = records.len(), "loaded build times");
        Ok(records.into_iter().collect())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json_string()?)?;
        tracing::debug!(path = %path.display(), targets = self.len(), "saved build times");
        Ok(())
    }
}

impl FromIterator<(String, TimingRecord)> for BuildTimes {
    fn from_iter<T: IntoIterator<Item = (String, TimingRecord)>>(iter: T) -> Self {
        Self {
            records: Arc::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_records() {
        let times = BuildTimes::new();
        let observer = times.clone();
        times.insert("bundle/target", TimingRecord::new(1, None));

        assert_eq!(observer.len(), 1);
        assert!(observer.contains("bundle/target"));
    }

    #[test]
    fn update_on_missing_target_is_a_no_op() {
        let times = BuildTimes::new();
        let touched = times.update("missing", |r| r.end_time = Some(3));
        assert!(!touched);
        assert!(times.is_empty());
    }

    #[test]
    fn intervals_skip_unfinished_targets() {
        let times = BuildTimes::new();
        times.insert("a", TimingRecord::new(0, None));
        let mut finished = TimingRecord::new(2, None);
        finished.end_time = Some(5);
        times.insert("b", finished);

        let intervals = times.intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals["b"], Interval::new(2, 5));
    }
}
