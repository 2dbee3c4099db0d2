//! General output formatting utilities.

use owo_colors::OwoColorize;

/// Prints a summary box with statistics.
pub fn print_summary_box(title: &str, items: &[(&str, &str)]) {
    let title_colored = title.cyan().bold().to_string();
    let separator = "─".repeat(50);
    println!("┌─ {} {}", title_colored, separator.bright_black());
    for (key, value) in items {
        println!("│ {} {}", key.bright_black().bold(), value.bold().white());
    }
    println!("└{}", "─".repeat(60).bright_black());
}

/// Prints a key-value pair with consistent formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {} {}", key.bright_black().bold(), value.bold().white());
}

/// Formats a millisecond count in a human-readable way.
///
/// Negative values keep their sign; they show up when overlapping
/// dependencies push waiting time past total time.
pub fn format_duration(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let seconds = millis.unsigned_abs() as f64 / 1000.0;
    if seconds < 1.0 {
        format!("{}{}ms", sign, millis.unsigned_abs())
    } else if seconds < 60.0 {
        format!("{}{:.2}s", sign, seconds)
    } else {
        let mins = (seconds / 60.0) as u64;
        let secs = seconds % 60.0;
        format!("{}{}m {:.1}s", sign, mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn formats_each_range() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1500), "1.50s");
        assert_eq!(format_duration(90_000), "1m 30.0s");
        assert_eq!(format_duration(-6), "-6ms");
    }
}
