use std::time::Duration;

/// Elapsed wall-clock time, always with exactly two decimal places
/// regardless of magnitude.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
