//! UI layout and rendering logic for the editor panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, OUTPUT_PLACEHOLDER};
use crate::registry;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Editor area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_editor_area(frame, app, main_layout[0]);
    render_status_bar(frame, app, main_layout[1]);

    if app.show_help {
        render_help_overlay(frame);
    }

    // The progress overlay is modal and takes precedence over the output
    // popup, even if the popup was visible before the run started.
    if app.is_running {
        render_progress_overlay(frame);
    } else if app.show_output {
        render_output_popup(frame, &app.output);
    }
}

/// Render the source buffer with the current theme applied.
fn render_editor_area(frame: &mut Frame, app: &App, area: Rect) {
    let theme = registry::theme(&app.theme).unwrap_or_else(registry::default_theme);
    let style = Style::default().bg(theme.bg).fg(theme.fg);

    let content: Vec<Line> = app.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let total_lines = content.len();

    let title = format!(" runpad — {} [{}] ", app.language, app.theme);

    // Keep the cursor line in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll_y = if inner_height > 0 && app.cursor_line >= inner_height {
        (app.cursor_line + 1 - inner_height) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(Text::from(content))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((scroll_y, 0));

    frame.render_widget(paragraph, area);

    // Place the terminal cursor on the logical cursor position
    if total_lines > app.cursor_line {
        let line = &app.lines[app.cursor_line];
        let prefix: String = line.chars().take(app.cursor_col).collect();
        let x = area.x + 1 + prefix.width() as u16;
        let y = area.y + 1 + (app.cursor_line as u16).saturating_sub(scroll_y);
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_paragraph = Paragraph::new(app.status_message.as_str())
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_paragraph, area);
}

/// Render the captured-output popup. Stateless: shows the given text
/// verbatim, or a placeholder when nothing has been captured yet.
pub fn render_output_popup(frame: &mut Frame, output: &str) {
    let area = frame.area();
    let popup_area = centered_rect(75, 60, area);

    frame.render_widget(Clear, popup_area);

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Output section
            Constraint::Length(2), // Instructions
        ])
        .split(popup_area);

    let text = if output.is_empty() {
        OUTPUT_PLACEHOLDER
    } else {
        output
    };

    let output_paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Output")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(output_paragraph, popup_layout[0]);

    let instructions = Paragraph::new("Press any key to close")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(instructions, popup_layout[1]);
}

/// Render the blocking progress overlay shown while a run is in flight.
fn render_progress_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(40, 20, area);

    frame.render_widget(Clear, popup_area);

    let progress = Paragraph::new("Running your code...")
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Please wait")
                .title_style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(progress, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(70, 60, area);

    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("runpad Help"),
        Line::from(""),
        Line::from("Editing:"),
        Line::from("  type       - Insert text at the cursor"),
        Line::from("  arrows     - Move the cursor"),
        Line::from("  Tab        - Insert two spaces"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  Ctrl+R     - Run the buffer on the execution service"),
        Line::from("  Ctrl+L     - Cycle language (resets the buffer!)"),
        Line::from("  Ctrl+T     - Cycle theme"),
        Line::from("  F1         - Toggle this help"),
        Line::from("  Ctrl+Q     - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
