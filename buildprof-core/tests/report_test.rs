use std::collections::HashMap;

use buildprof_core::{BuildProfiler, BuildReport, BuildTimes, SortKey};

fn profiled_build() -> BuildTimes {
    let times = BuildTimes::new();
    let profiler = BuildProfiler::new(times.clone());

    profiler.set_start_time("bundle/target", Some("js"), Some(0));
    profiler.set_start_time("bundle/dep-1", Some("css"), Some(10));
    profiler.set_end_time("bundle/dep-1", Some(20));
    profiler.set_start_time("bundle/dep-2", Some("js"), Some(30));
    profiler.set_end_time("bundle/dep-2", Some(60));
    profiler.set_end_time("bundle/target", Some(100));
    profiler.set_start_time("bundle/unfinished", None, Some(50));

    let mut graph = HashMap::new();
    graph.insert(
        "bundle/target".to_string(),
        vec!["bundle/dep-1".to_string(), "bundle/dep-2".to_string()],
    );
    profiler.calculate_build_times(&graph);
    times
}

fn names(report: &BuildReport) -> Vec<&str> {
    report.targets.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn test_report_sorted_by_self_time() {
    let report = BuildReport::from_times(&profiled_build(), SortKey::SelfTime, None);

    assert_eq!(names(&report), vec!["bundle/target", "bundle/dep-2", "bundle/dep-1"]);
    assert_eq!(report.computed, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.wall_time, Some(100));
    assert_eq!(report.total_self_time, 60 + 30 + 10);
    assert_eq!(report.total_waiting_time, 40);
}

#[test]
fn test_report_sorted_by_waiting_time_breaks_ties_by_name() {
    let report = BuildReport::from_times(&profiled_build(), SortKey::WaitingTime, None);
    assert_eq!(names(&report), vec!["bundle/target", "bundle/dep-1", "bundle/dep-2"]);
}

#[test]
fn test_report_sorted_by_name_with_limit() {
    let report = BuildReport::from_times(&profiled_build(), SortKey::Name, Some(2));

    assert_eq!(names(&report), vec!["bundle/dep-1", "bundle/dep-2"]);
    assert_eq!(report.computed, 3);
    assert_eq!(report.total_self_time, 100);
}

#[test]
fn test_tech_summary() {
    let report = BuildReport::from_times(&profiled_build(), SortKey::SelfTime, None);

    assert_eq!(report.techs.len(), 2);
    let js = &report.techs[0];
    assert_eq!(js.tech_name.as_deref(), Some("js"));
    assert_eq!(js.targets, 2);
    assert_eq!(js.total_self_time, 90);
    assert_eq!(js.total_waiting_time, 40);

    let css = &report.techs[1];
    assert_eq!(css.tech_name.as_deref(), Some("css"));
    assert_eq!(css.total_self_time, 10);
}

#[test]
fn test_waiting_ratio() {
    let report = BuildReport::from_times(&profiled_build(), SortKey::SelfTime, None);
    assert!((report.waiting_ratio() - 40.0 / 140.0).abs() < 1e-9);
}

#[test]
fn test_empty_report() {
    let report = BuildReport::from_times(&BuildTimes::new(), SortKey::SelfTime, None);

    assert!(report.targets.is_empty());
    assert_eq!(report.wall_time, None);
    assert_eq!(report.waiting_ratio(), 0.0);
}
