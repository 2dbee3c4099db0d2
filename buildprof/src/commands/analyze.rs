//! Report commands over recorded build times.

use std::path::PathBuf;

use anyhow::{Context, Result};
use buildprof_core::{BuildReport, SortKey};

use crate::formatting::{
    format_duration, print_key_value, print_section_header, print_success, print_summary_box,
    print_tech_table, print_timing_table, print_warning, SectionStyle,
};

use super::load_and_calculate;

pub fn cmd_analyze(
    times_path: PathBuf,
    graph_path: Option<PathBuf>,
    sort: SortKey,
    top: Option<usize>,
    json: bool,
    write: bool,
) -> Result<()> {
    let (times, summary) = load_and_calculate(&times_path, graph_path.as_deref())?;

    if write {
        times
            .save(&times_path)
            .with_context(|| format!("Failed to write build times to {}", times_path.display()))?;
    }

    let report = BuildReport::from_times(&times, sort, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section_header("Build times", SectionStyle::Primary);

    if report.targets.is_empty() {
        print_warning("No finished targets recorded");
        println!();
        return Ok(());
    }

    print_key_value("Sorted by", sort.as_str());
    if let Some(limit) = top {
        print_key_value("Showing", &format!("top {} of {}", limit.min(report.computed), report.computed));
    }
    println!();

    print_timing_table(&report.targets);
    println!();

    let wall_time = report
        .wall_time
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());
    print_summary_box(
        "Summary",
        &[
            ("Targets", &report.computed.to_string()),
            ("Unfinished", &summary.skipped.to_string()),
            ("Wall time", &wall_time),
            ("Self time", &format_duration(report.total_self_time)),
            ("Waiting time", &format_duration(report.total_waiting_time)),
            ("Waiting share", &format!("{:.0}%", report.waiting_ratio() * 100.0)),
        ],
    );
    println!();

    if write {
        print_success(&format!("Wrote computed times to {}", times_path.display()));
    }

    Ok(())
}

pub fn cmd_techs(times_path: PathBuf, graph_path: Option<PathBuf>, json: bool) -> Result<()> {
    let (times, _) = load_and_calculate(&times_path, graph_path.as_deref())?;
    let report = BuildReport::from_times(&times, SortKey::SelfTime, None);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.techs)?);
        return Ok(());
    }

    print_section_header("Build times by technology", SectionStyle::Primary);

    if report.techs.is_empty() {
        print_warning("No finished targets recorded");
        println!();
        return Ok(());
    }

    print_tech_table(&report.techs);
    println!();
    Ok(())
}
