//! Custom event types for the TUI application.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::piston::RunResult;

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// Run the current buffer on the execution service
    Run,
    /// Execution request finished (successfully or not)
    RunFinished(Result<RunResult>),
}
