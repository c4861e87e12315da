//! runpad: a terminal code editor panel backed by a remote execution service.
//!
//! Pick a language, edit a snippet, hit run; the buffer is POSTed to a
//! Piston-compatible `/execute` endpoint and the captured stdout is shown in
//! a popup.
//!
//! 1. [`registry`] — static language/theme/version tables.
//! 2. [`piston`] — the HTTP client for the execution service.
//! 3. [`tui`] — application state, event loop, and rendering.
//! 4. [`config`] — rc-file and environment configuration.

pub mod cli;
pub mod config;
pub mod piston;
pub mod registry;
pub mod tui;
