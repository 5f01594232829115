//! UI module - full-screen terminal dashboard

mod app;
mod panels;
mod theme;

pub use app::{event_loop, map_event, map_key, run_terminal, UiEvent};
pub use panels::{gpio_lines, render, MAX_GPIO_ROWS};
pub use theme::{format_bytes, format_celsius, temp_color, usage_color};
