use buildprof_core::{BuildProfiler, BuildTimes, TimingRecord};
use tempfile::TempDir;

#[test]
fn test_json_omits_absent_fields() {
    let times = BuildTimes::new();
    let profiler = BuildProfiler::new(times.clone());
    profiler.set_start_time("some-bundle/some-target", Some("tech"), Some(100500));

    let json: serde_json::Value = serde_json::from_str(&times.to_json_string().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "some-bundle/some-target": { "startTime": 100500, "techName": "tech" }
        })
    );
}

#[test]
fn test_json_uses_camel_case_derived_fields() {
    let times = BuildTimes::new();
    let profiler = BuildProfiler::new(times.clone());
    profiler.set_start_time("a", None, Some(0));
    profiler.set_end_time("a", Some(4));
    profiler.calculate_build_times(&std::collections::HashMap::<String, Vec<String>>::new());

    let json: serde_json::Value = serde_json::from_str(&times.to_json_string().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "a": { "startTime": 0, "endTime": 4, "totalTime": 4, "selfTime": 4, "waitingTime": 0 }
        })
    );
}

#[test]
fn test_parse_recorded_times() {
    let json = r#"{
        "bundle/target": { "startTime": 0, "endTime": 100 },
        "bundle/pending": { "startTime": 5, "techName": "bem" }
    }"#;

    let times = BuildTimes::from_json_str(json).unwrap();
    assert_eq!(times.len(), 2);
    assert_eq!(times.get("bundle/target").unwrap().end_time, Some(100));
    assert_eq!(
        times.get("bundle/pending").unwrap(),
        TimingRecord::new(5, Some("bem".to_string()))
    );
}

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("times.json");

    let times = BuildTimes::new();
    let profiler = BuildProfiler::new(times.clone());
    profiler.set_start_time("a", Some("tech"), Some(10));
    profiler.set_end_time("a", Some(12));
    times.save(&path).unwrap();

    let loaded = BuildTimes::load(&path).unwrap();
    assert_eq!(loaded.snapshot(), times.snapshot());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = BuildTimes::load(temp_dir.path().join("times.json"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_json() {
    let result = BuildTimes::from_json_str(r#"{"a": {"endTime": 3}}"#);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("JSON error"));
}
