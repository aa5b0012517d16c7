//! Formatting helpers for chart labels and headers.

pub fn format_pct(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    format!("{value:.0}%")
}

pub fn format_n(count: usize) -> String {
    format!("n={count}")
}
