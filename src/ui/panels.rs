// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Dashboard panels drawn from one snapshot

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::theme::{
    degraded_style, format_bytes, format_celsius, gpio_color, muted_style, section_style,
    temp_color, title_style, usage_color,
};
use crate::core::{clamp_percent, MetricFamily, Snapshot};

/// Most GPIO pins listed at once
pub const MAX_GPIO_ROWS: usize = 8;

/// Draw the full dashboard
pub fn render(frame: &mut Frame, snapshot: &Snapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // CPU
            Constraint::Length(7), // Memory
            Constraint::Min(8),    // Disk
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Temperature
            Constraint::Min(0),    // GPIO
        ])
        .split(columns[1]);

    render_cpu(frame, left[0], snapshot);
    render_memory(frame, left[1], snapshot);
    render_disk(frame, left[2], snapshot);
    render_temperature(frame, right[0], snapshot);
    render_gpio(frame, right[1], snapshot);
    render_footer(frame, rows[2], snapshot);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("hostwatch v{}", crate::VERSION),
            title_style(),
        )),
        Line::from(Span::styled("Press q, Esc or Ctrl+C to exit", muted_style())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(muted_style()));

    frame.render_widget(header, area);
}

/// Bordered section; the title flags a family whose reader failed
fn section(title: &str, snapshot: &Snapshot, family: MetricFamily) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if snapshot.is_degraded(family) {
        block
            .title(Span::styled(format!(" {} (unavailable) ", title), degraded_style()))
            .border_style(degraded_style())
    } else {
        block.title(Span::styled(format!(" {} ", title), section_style()))
    }
}

fn usage_gauge(percent: f64) -> Gauge<'static> {
    let percent = clamp_percent(percent);
    Gauge::default()
        .gauge_style(Style::default().fg(usage_color(percent)).bg(Color::Black))
        .ratio(percent / 100.0)
        .label(format!("Usage: {:.1}%", percent))
}

/// Render a block with a usage gauge on its first row and `lines` below it
fn render_gauge_panel(
    frame: &mut Frame,
    area: Rect,
    block: Block<'static>,
    percent: f64,
    lines: Vec<Line<'static>>,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(usage_gauge(percent), parts[0]);
    frame.render_widget(Paragraph::new(lines), parts[1]);
}

fn render_cpu(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let cpu = &snapshot.cpu;

    let load = match cpu.load_average.as_slice() {
        [one, five, fifteen, ..] => format!("Load:  {:.2}, {:.2}, {:.2}", one, five, fifteen),
        _ => "Load:  n/a".to_string(),
    };
    let freq = if cpu.frequency > 0.0 {
        format!("Freq:  {:.2} GHz", cpu.frequency / 1000.0)
    } else {
        "Freq:  n/a".to_string()
    };

    render_gauge_panel(
        frame,
        area,
        section("CPU", snapshot, MetricFamily::Cpu),
        cpu.usage_percent,
        vec![Line::from(load), Line::from(freq)],
    );
}

fn render_memory(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mem = &snapshot.memory;
    render_gauge_panel(
        frame,
        area,
        section("Memory", snapshot, MetricFamily::Memory),
        mem.usage_percent,
        vec![
            Line::from(format!("Total: {}", format_bytes(mem.total))),
            Line::from(format!("Used:  {}", format_bytes(mem.used))),
            Line::from(format!("Free:  {}", format_bytes(mem.free))),
            Line::from(format!("Avail: {}", format_bytes(mem.available))),
        ],
    );
}

fn render_disk(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let disk = &snapshot.disk;
    render_gauge_panel(
        frame,
        area,
        section("Disk", snapshot, MetricFamily::Disk),
        disk.usage_percent,
        vec![
            Line::from(format!("Total: {}", format_bytes(disk.total))),
            Line::from(format!("Used:  {}", format_bytes(disk.used))),
            Line::from(format!("Free:  {}", format_bytes(disk.free))),
            Line::from(format!(
                "Ops since boot: R {} W {}",
                disk.io_read, disk.io_write
            )),
        ],
    );
}

fn temperature_line(label: &str, celsius: f64) -> Line<'static> {
    let style = if celsius > 0.0 {
        Style::default().fg(temp_color(celsius))
    } else {
        muted_style()
    };
    Line::from(vec![
        Span::raw(format!("{:<9}", label)),
        Span::styled(format_celsius(celsius), style),
    ])
}

fn render_temperature(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let temp = &snapshot.temperature;
    let lines = vec![
        temperature_line("CPU:", temp.cpu),
        temperature_line("GPU:", temp.gpu),
        temperature_line("Board:", temp.board),
        temperature_line("Ambient:", temp.ambient),
    ];

    let panel = Paragraph::new(lines).block(section(
        "Temperature",
        snapshot,
        MetricFamily::Temperature,
    ));
    frame.render_widget(panel, area);
}

/// Lines of the GPIO panel, at most [`MAX_GPIO_ROWS`] pins in name order
pub fn gpio_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    if snapshot.gpio.pins.is_empty() {
        return vec![Line::from(Span::styled("No GPIO data", muted_style()))];
    }

    let mut lines: Vec<Line<'static>> = snapshot
        .gpio
        .pins
        .iter()
        .take(MAX_GPIO_ROWS)
        .map(|(name, state)| {
            Line::from(Span::styled(
                format!("{}: {} ({})", name, state.value, state.mode),
                Style::default().fg(gpio_color(state.value)),
            ))
        })
        .collect();

    let hidden = snapshot.gpio.pins.len().saturating_sub(MAX_GPIO_ROWS);
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("... {} more", hidden),
            muted_style(),
        )));
    }
    lines
}

fn render_gpio(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let panel = Paragraph::new(gpio_lines(snapshot)).block(section(
        "GPIO Status",
        snapshot,
        MetricFamily::Gpio,
    ));
    frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let stamp = snapshot
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    let footer = Paragraph::new(Span::styled(format!("Last updated: {}", stamp), muted_style()));
    frame.render_widget(footer, area);
}
