/// Helper utilities for the dashboard

use ratatui::style::Color;

use crate::utils::{USAGE_CRITICAL, USAGE_WARNING};

/// Colour for a percentage gauge (>80% red, >60% yellow)
pub fn usage_color(percent: f64) -> Color {
    if percent > USAGE_CRITICAL {
        Color::Red
    } else if percent > USAGE_WARNING {
        Color::Yellow
    } else {
        Color::Gray
    }
}

/// Round to one decimal place for display
pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Join an endpoint path onto a base URL, tolerating a trailing slash on the base
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Last `n` items of a slice (all of them when `n` is None or larger than the slice)
pub fn tail<T>(items: &[T], n: Option<usize>) -> &[T] {
    match n {
        Some(n) if n < items.len() => &items[items.len() - n..],
        _ => items,
    }
}

/// Push onto a bounded buffer, dropping the oldest entries past `max`
pub fn push_bounded<T>(buffer: &mut Vec<T>, item: T, max: usize) {
    buffer.push(item);
    if buffer.len() > max {
        let excess = buffer.len() - max;
        buffer.drain(0..excess);
    }
}

/// Parse a boolean flag value the way config files usually spell them
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
