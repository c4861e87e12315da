//! Async event handler for the editor panel.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use is_terminal::IsTerminal;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::{config::Config, piston::PistonClient, registry};
use super::{app::App, events::TuiEvent, ui::render_ui};

/// Run the editor panel until the user quits.
pub async fn run_editor(
    cfg: &Config,
    language: &registry::Language,
    theme: &registry::Theme,
) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!("runpad requires a proper terminal environment"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = PistonClient::from_config(cfg)?;
    let mut app = App::new(language, theme);

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    let result = run_app(&mut terminal, &mut app, client, event_tx, event_rx).await;

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: PistonClient,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break; // Channel closed
                    }
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &event_tx)? {
                        break; // Quit requested
                    }
                }
                TuiEvent::Run => {
                    // One request per run, resolved back onto this loop.
                    // Registry coverage is a startup invariant, not a
                    // runtime error path.
                    let version = registry::version_for(&app.language)
                        .context("language missing from version table")?;
                    app.begin_run();
                    let client = client.clone();
                    let language = app.language.clone();
                    let version = version.to_string();
                    let source = app.source_text();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let result = client.execute(&language, &version, &source).await;
                        let _ = tx.send(TuiEvent::RunFinished(result));
                    });
                }
                TuiEvent::RunFinished(result) => {
                    app.complete_run(result);
                }
            }
        }

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    Ok(())
}

/// Handle keyboard events. Returns true when the app should quit.
fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> Result<bool> {
    // The progress overlay is modal: while a run is in flight only quit
    // gets through. This is what keeps runs from overlapping; the state
    // machine itself does not guard against it.
    if app.is_running {
        if let KeyCode::Char('q') | KeyCode::Char('c') = key.code {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(true);
            }
        }
        return Ok(false);
    }

    // Any key closes an open popup
    if app.show_output {
        app.dismiss_output();
        return Ok(false);
    }
    if app.show_help {
        app.toggle_help();
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let _ = event_tx.send(TuiEvent::Run);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cycle_language();
        }
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cycle_theme();
        }
        KeyCode::F(1) => {
            app.toggle_help();
        }
        KeyCode::Enter => app.insert_newline(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Tab => {
            app.insert_char(' ');
            app.insert_char(' ');
        }
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn both_quit_chords_work_while_run_is_in_flight() {
        let mut app = App::new(registry::default_language(), registry::default_theme());
        let (tx, _rx) = mpsc::unbounded_channel();
        app.begin_run();

        assert!(handle_key_event(&mut app, ctrl('c'), &tx).unwrap());
        assert!(handle_key_event(&mut app, ctrl('q'), &tx).unwrap());
    }

    #[test]
    fn other_keys_are_swallowed_while_run_is_in_flight() {
        let mut app = App::new(registry::default_language(), registry::default_theme());
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.begin_run();

        let plain = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!handle_key_event(&mut app, plain, &tx).unwrap());
        assert!(!handle_key_event(&mut app, ctrl('r'), &tx).unwrap());

        // No edit reached the buffer and no second run was requested
        assert_eq!(app.source_text(), registry::default_language().default_code);
        assert!(rx.try_recv().is_err());
    }
}
