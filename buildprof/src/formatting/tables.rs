//! Table formatting utilities using comfy-table.

use buildprof_core::{TargetTiming, TechSummary};
use comfy_table::{Cell, CellAlignment, Table};

use super::output::format_duration;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(*h).add_attribute(comfy_table::Attribute::Bold))
        .collect();
    table
        .set_header(header_cells)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table
}

fn duration_cell(millis: i64) -> Cell {
    Cell::new(format_duration(millis)).set_alignment(CellAlignment::Right)
}

/// Prints one row per target with its derived times.
pub fn print_timing_table(targets: &[TargetTiming]) {
    let mut table = new_table(&["Target", "Tech", "Total", "Self", "Waiting"]);

    for target in targets {
        let self_cell = if target.self_time < 0 {
            duration_cell(target.self_time).fg(comfy_table::Color::Red)
        } else {
            duration_cell(target.self_time).fg(comfy_table::Color::Green)
        };
        table.add_row(vec![
            Cell::new(&target.name).fg(comfy_table::Color::White),
            Cell::new(target.tech_name.as_deref().unwrap_or("-")).fg(comfy_table::Color::DarkGrey),
            duration_cell(target.total_time),
            self_cell,
            duration_cell(target.waiting_time).fg(comfy_table::Color::Yellow),
        ]);
    }

    println!("{}", table);
}

/// Prints one row per technology with summed times.
pub fn print_tech_table(techs: &[TechSummary]) {
    let mut table = new_table(&["Tech", "Targets", "Self", "Waiting"]);

    for tech in techs {
        table.add_row(vec![
            Cell::new(tech.tech_name.as_deref().unwrap_or("(none)")).fg(comfy_table::Color::White),
            Cell::new(tech.targets).set_alignment(CellAlignment::Right),
            duration_cell(tech.total_self_time).fg(comfy_table::Color::Green),
            duration_cell(tech.total_waiting_time).fg(comfy_table::Color::Yellow),
        ]);
    }

    println!("{}", table);
}
