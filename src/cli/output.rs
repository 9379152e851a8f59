//! Output formatting for CLI

use crate::{
    pipeline::TrainingResult,
    value_table::ValueSummary,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count together with its share of the total
pub fn format_count_rate(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print outcome counts of a training run
pub fn print_training_result(result: &TrainingResult) {
    print_kv("Episodes", &format_number(result.total_games));
    print_kv("X wins", &format_count_rate(result.x_wins, result.x_win_rate));
    print_kv("O wins", &format_count_rate(result.o_wins, result.o_win_rate));
    print_kv("Draws", &format_count_rate(result.draws, result.draw_rate));
}

/// Print mean/min/max of a value table
pub fn print_value_summary(label: &str, summary: &ValueSummary) {
    print_kv(
        label,
        &format!(
            "mean {:.4}, min {:.4}, max {:.4}",
            summary.mean, summary.min, summary.max
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(19683), "19,683");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_count_rate() {
        assert_eq!(format_count_rate(250, 0.25), "250 (25.0%)");
    }
}
