// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Terminal dashboard run loop

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam::channel::{self, select, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{debug, info, warn};

use super::panels;
use crate::config::TerminalConfig;
use crate::sensors::SnapshotBuilder;

/// How long the input thread blocks before re-checking its stop flag
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Input the redraw loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    Resize,
}

/// Quit keys are `q`, `Esc` and `Ctrl+C`
pub fn map_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiEvent::Quit)
        }
        _ => None,
    }
}

pub fn map_event(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => Some(UiEvent::Resize),
        _ => None,
    }
}

/// Thread forwarding terminal input to the redraw loop
struct InputThread {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl InputThread {
    fn spawn(events: Sender<UiEvent>) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("hostwatch-input".to_string())
            .spawn(move || input_loop(&flag, &events))
            .context("Failed to spawn input thread")?;
        Ok(Self { stop, handle })
    }

    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            warn!("Input thread panicked");
        }
    }
}

fn input_loop(stop: &AtomicBool, events: &Sender<UiEvent>) {
    while !stop.load(Ordering::Relaxed) {
        let next = match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => event::read(),
            Err(e) => Err(e),
        };

        match next {
            Ok(ev) => {
                if let Some(ui_event) = map_event(ev) {
                    if events.send(ui_event).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("Terminal input failed: {}", e);
                let _ = events.send(UiEvent::Quit);
                return;
            }
        }
    }
}

/// Redraw on every tick and on resize until a quit event arrives.
///
/// A closed event channel counts as quit.
pub fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    builder: &SnapshotBuilder,
    ticks: &Receiver<Instant>,
    events: &Receiver<UiEvent>,
) -> Result<()> {
    let mut snapshot = builder.build();
    terminal
        .draw(|frame| panels::render(frame, &snapshot))
        .context("Failed to draw dashboard")?;

    loop {
        select! {
            recv(ticks) -> _ => {
                snapshot = builder.build();
            }
            recv(events) -> event => match event {
                Ok(UiEvent::Resize) => debug!("Terminal resized"),
                Ok(UiEvent::Quit) | Err(_) => break,
            },
        }

        terminal
            .draw(|frame| panels::render(frame, &snapshot))
            .context("Failed to draw dashboard")?;
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the full-screen dashboard until the user quits.
///
/// The terminal is restored whether or not the loop failed.
pub fn run_terminal(builder: Arc<SnapshotBuilder>, config: &TerminalConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let (tx, rx) = channel::unbounded();
    let input = match InputThread::spawn(tx) {
        Ok(input) => input,
        Err(e) => {
            restore_terminal(&mut terminal)?;
            return Err(e);
        }
    };

    info!(
        "Terminal dashboard started ({} ms refresh)",
        config.refresh_interval_ms
    );

    let ticks = channel::tick(config.refresh_interval());
    let result = event_loop(&mut terminal, &builder, &ticks, &rx);

    input.stop();
    let restored = restore_terminal(&mut terminal);

    info!("Terminal dashboard stopped");
    result.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(UiEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE)), Some(UiEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(UiEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(map_event(Event::Resize(80, 24)), Some(UiEvent::Resize));
        assert_eq!(map_event(Event::FocusGained), None);
    }

    fn fixture_builder() -> (tempfile::TempDir, SnapshotBuilder) {
        let dir = tempfile::tempdir().unwrap();
        let builder = SnapshotBuilder::new(&SensorConfig::rooted(dir.path(), dir.path(), dir.path()));
        (dir, builder)
    }

    #[test]
    fn test_loop_exits_on_quit() {
        let (_dir, builder) = fixture_builder();
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();

        let (tx, rx) = channel::unbounded();
        tx.send(UiEvent::Resize).unwrap();
        tx.send(UiEvent::Quit).unwrap();

        event_loop(&mut terminal, &builder, &channel::never(), &rx).unwrap();
    }

    #[test]
    fn test_loop_exits_when_input_is_gone() {
        let (_dir, builder) = fixture_builder();
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();

        let (tx, rx) = channel::unbounded::<UiEvent>();
        drop(tx);

        let ticks = channel::tick(Duration::from_millis(5));
        event_loop(&mut terminal, &builder, &ticks, &rx).unwrap();
    }

    #[test]
    fn test_ticks_redraw_until_quit() {
        let (_dir, builder) = fixture_builder();
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();

        let (tx, rx) = channel::unbounded();
        let quitter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            tx.send(UiEvent::Quit).unwrap();
        });

        let ticks = channel::tick(Duration::from_millis(5));
        event_loop(&mut terminal, &builder, &ticks, &rx).unwrap();
        quitter.join().unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Last updated:"));
    }
}
