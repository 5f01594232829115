// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Colours and value formatting for the terminal dashboard

use ratatui::style::{Color, Modifier, Style};

pub fn title_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

pub fn section_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn degraded_style() -> Style {
    Style::default().fg(Color::LightRed)
}

/// Colour band for a temperature in °C
pub fn temp_color(celsius: f64) -> Color {
    match celsius {
        t if t < 40.0 => Color::Green,
        t if t < 60.0 => Color::Yellow,
        t if t < 80.0 => Color::LightRed,
        _ => Color::Red,
    }
}

/// Gauge colour for a usage percentage
pub fn usage_color(percent: f64) -> Color {
    match percent {
        v if v < 50.0 => Color::Green,
        v if v < 75.0 => Color::LightYellow,
        v if v < 90.0 => Color::LightRed,
        _ => Color::Red,
    }
}

pub fn gpio_color(value: i32) -> Color {
    if value == 1 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Human readable size in binary units ("1.5 KB" is 1536 bytes)
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < PREFIXES.len() - 1 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// "45.0°C", or "n/a" for an unreadable zone
pub fn format_celsius(celsius: f64) -> String {
    if celsius > 0.0 {
        format!("{:.1}°C", celsius)
    } else {
        "n/a".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GB");
        assert_eq!(format_bytes(u64::MAX), "16.0 EB");
    }

    #[test]
    fn test_temp_bands() {
        assert_eq!(temp_color(25.0), Color::Green);
        assert_eq!(temp_color(40.0), Color::Yellow);
        assert_eq!(temp_color(65.5), Color::LightRed);
        assert_eq!(temp_color(80.0), Color::Red);
    }

    #[test]
    fn test_format_celsius() {
        assert_eq!(format_celsius(45.0), "45.0°C");
        assert_eq!(format_celsius(0.0), "n/a");
    }
}
