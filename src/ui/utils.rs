//! UI utility functions
//!
//! Contains helper functions used across components

use crate::events::Source;
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on its source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Workspaces => Color::Cyan,
        Source::Costs => Color::Yellow,
        Source::Navigation => Color::Green,
    }
}

/// Terminal glyph standing in for a navigation icon identifier.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "WebAppBuilderFragment" => "▤",
        "Puzzle" => "✚",
        "Info" => "ℹ",
        "ConnectVirtualMachine" => "▣",
        _ => "•",
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out".to_string();
    }
    if msg.contains("Reqwest error") {
        return "Network error - is the API reachable?".to_string();
    }
    msg.to_string()
}

/// A moving placeholder bar of `width` cells, shifted by `tick`.
pub fn shimmer_text(tick: usize, width: usize) -> String {
    const PATTERN: [char; 4] = ['░', '▒', '▓', '▒'];
    (0..width)
        .map(|i| PATTERN[(i + tick) % PATTERN.len()])
        .collect()
}
