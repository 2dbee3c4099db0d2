//! CLI formatting utilities.
//!
//! Colors, section headers and tables shared by all report commands.

mod headers;
mod output;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use output::{format_duration, print_key_value, print_summary_box};
pub use status::{print_success, print_warning};
pub use tables::{print_tech_table, print_timing_table};
