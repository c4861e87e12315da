//! TUI module for the editor panel, built with Ratatui.

pub mod app;
pub mod events;
pub mod handler;
pub mod ui;

pub use handler::run_editor;
