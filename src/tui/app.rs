//! TUI application state management.

use anyhow::Result;

use crate::piston::RunResult;
use crate::registry;

/// Shown by the output popup when nothing has been captured yet.
pub const OUTPUT_PLACEHOLDER: &str = "Run your code to see the output here...";
/// Captured when a run succeeds with empty stdout.
pub const SUCCESS_NO_OUTPUT: &str = "Execution was successful, but no output.";
/// Used when a failed run carries no message at all.
pub const RUN_ERROR_FALLBACK: &str = "Failed to execute code";

/// Application state for the editor panel.
///
/// All mutation goes through the named operations below; the render layer
/// only reads. One execution cycle moves idle -> submitting -> shown output,
/// driven by [`begin_run`](App::begin_run) and [`complete_run`](App::complete_run).
#[derive(Debug)]
pub struct App {
    /// Current language identifier (always a registry member)
    pub language: String,
    /// Current theme identifier (always a registry member)
    pub theme: String,
    /// Source buffer, one entry per line
    pub lines: Vec<String>,
    /// Cursor line index into `lines`
    pub cursor_line: usize,
    /// Cursor column as a char offset into the current line
    pub cursor_col: usize,
    /// Last captured output (kept across dismissals, overwritten by runs)
    pub output: String,
    /// Whether the output popup is visible
    pub show_output: bool,
    /// Whether a run request is in flight
    pub is_running: bool,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Status message for the bottom bar
    pub status_message: String,
}

impl App {
    /// Create the panel state with the given starting selections.
    pub fn new(language: &registry::Language, theme: &registry::Theme) -> Self {
        Self {
            language: language.name.to_string(),
            theme: theme.name.to_string(),
            lines: split_lines(language.default_code),
            cursor_line: 0,
            cursor_col: 0,
            output: String::new(),
            show_output: false,
            is_running: false,
            show_help: false,
            status_message: "ctrl+r run | ctrl+l language | ctrl+t theme | F1 help | ctrl+q quit"
                .to_string(),
        }
    }

    /// Select a language by identifier and reset the buffer to its default
    /// snippet. Unknown identifiers are ignored (the selector is closed).
    pub fn select_language(&mut self, name: &str) {
        if let Some(lang) = registry::language(name) {
            self.language = lang.name.to_string();
            self.set_source(lang.default_code);
        }
    }

    /// Select a theme by identifier. No other state is touched.
    pub fn select_theme(&mut self, name: &str) {
        if let Some(theme) = registry::theme(name) {
            self.theme = theme.name.to_string();
        }
    }

    pub fn cycle_language(&mut self) {
        let next = registry::next_language(&self.language);
        self.select_language(next.name);
    }

    pub fn cycle_theme(&mut self) {
        let next = registry::next_theme(&self.theme);
        self.select_theme(next.name);
    }

    /// Replace the whole source buffer verbatim.
    pub fn set_source(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    /// Current source text as a single string.
    pub fn source_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Enter the submitting state. The output popup is left as-is; the
    /// render layer suppresses it while a run is in flight.
    pub fn begin_run(&mut self) {
        self.is_running = true;
    }

    /// Leave the submitting state with the outcome of the request and show
    /// the output popup.
    pub fn complete_run(&mut self, result: Result<RunResult>) {
        self.output = match result {
            Ok(run) => {
                if run.stdout.is_empty() {
                    SUCCESS_NO_OUTPUT.to_string()
                } else {
                    run.stdout
                }
            }
            Err(err) => {
                let msg = err.to_string();
                let msg = if msg.is_empty() { RUN_ERROR_FALLBACK } else { &msg };
                format!("Error: {}", msg)
            }
        };
        self.is_running = false;
        self.show_output = true;
    }

    /// Hide the output popup. The captured text is kept; the next run
    /// overwrites it.
    pub fn dismiss_output(&mut self) {
        self.show_output = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ----- Source editing helpers -----

    fn current_line(&self) -> &str {
        &self.lines[self.cursor_line]
    }

    pub fn insert_char(&mut self, c: char) {
        let byte = col_to_byte(self.current_line(), self.cursor_col);
        self.lines[self.cursor_line].insert(byte, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let byte = col_to_byte(self.current_line(), self.cursor_col);
        let rest = self.lines[self.cursor_line].split_off(byte);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let byte = col_to_byte(self.current_line(), self.cursor_col - 1);
            self.lines[self.cursor_line].remove(byte);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            // Merge with the previous line
            let removed = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.current_line().chars().count();
            self.lines[self.cursor_line].push_str(&removed);
        }
    }

    pub fn delete(&mut self) {
        let len = self.current_line().chars().count();
        if self.cursor_col < len {
            let byte = col_to_byte(self.current_line(), self.cursor_col);
            self.lines[self.cursor_line].remove(byte);
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line().chars().count();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.current_line().chars().count() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.cursor_col.min(self.current_line().chars().count());
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = self.cursor_col.min(self.current_line().chars().count());
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.current_line().chars().count();
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn col_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piston::RunResult;
    use crate::registry;

    fn new_app() -> App {
        App::new(registry::default_language(), registry::default_theme())
    }

    fn run_with_stdout(stdout: &str) -> RunResult {
        RunResult {
            stdout: stdout.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_on_creation() {
        let app = new_app();
        assert_eq!(app.language, "javascript");
        assert_eq!(app.theme, "light");
        assert_eq!(app.source_text(), registry::default_language().default_code);
        assert_eq!(app.output, "");
        assert!(!app.show_output);
        assert!(!app.is_running);
    }

    #[test]
    fn selecting_each_language_sets_its_default_code() {
        let mut app = new_app();
        for lang in registry::LANGUAGES {
            app.select_language(lang.name);
            assert_eq!(app.language, lang.name);
            assert_eq!(app.source_text(), lang.default_code);
        }
    }

    #[test]
    fn selecting_language_overwrites_edits_even_when_already_current() {
        let mut app = new_app();
        app.set_source("console.log('edited');");
        // Re-selecting the current language still resets the buffer
        app.select_language("javascript");
        assert_eq!(app.source_text(), registry::default_language().default_code);
    }

    #[test]
    fn unknown_language_is_ignored() {
        let mut app = new_app();
        app.set_source("edited");
        app.select_language("cobol");
        assert_eq!(app.language, "javascript");
        assert_eq!(app.source_text(), "edited");
    }

    #[test]
    fn selecting_theme_changes_only_the_theme() {
        let mut app = new_app();
        app.set_source("edited");
        app.select_theme("vs-dark");
        assert_eq!(app.theme, "vs-dark");
        assert_eq!(app.language, "javascript");
        assert_eq!(app.source_text(), "edited");
        app.select_theme("no-such-theme");
        assert_eq!(app.theme, "vs-dark");
    }

    #[test]
    fn successful_run_captures_stdout() {
        let mut app = new_app();
        app.begin_run();
        assert!(app.is_running);
        app.complete_run(Ok(run_with_stdout("42\n")));
        assert_eq!(app.output, "42\n");
        assert!(!app.is_running);
        assert!(app.show_output);
    }

    #[test]
    fn empty_stdout_yields_placeholder() {
        let mut app = new_app();
        app.begin_run();
        app.complete_run(Ok(run_with_stdout("")));
        assert_eq!(app.output, "Execution was successful, but no output.");
        assert!(app.show_output);
    }

    #[test]
    fn failed_run_embeds_error_message() {
        let mut app = new_app();
        app.begin_run();
        app.complete_run(Err(anyhow::anyhow!("timeout")));
        assert_eq!(app.output, "Error: timeout");
        assert!(!app.is_running);
        assert!(app.show_output);
    }

    #[test]
    fn failed_run_without_message_uses_fallback() {
        let mut app = new_app();
        app.begin_run();
        app.complete_run(Err(anyhow::anyhow!("")));
        assert_eq!(app.output, "Error: Failed to execute code");
    }

    #[test]
    fn submitting_keeps_previous_visibility_for_render_layer() {
        // The popup flag stays set while a run is in flight; the render layer
        // checks is_running first and draws the progress overlay instead.
        let mut app = new_app();
        app.begin_run();
        app.complete_run(Ok(run_with_stdout("first\n")));
        assert!(app.show_output);
        app.begin_run();
        assert!(app.is_running);
        assert!(app.show_output);
        app.complete_run(Ok(run_with_stdout("second\n")));
        assert_eq!(app.output, "second\n");
        assert!(app.show_output);
    }

    #[test]
    fn dismiss_hides_popup_but_keeps_output() {
        let mut app = new_app();
        app.begin_run();
        app.complete_run(Ok(run_with_stdout("kept\n")));
        app.dismiss_output();
        assert!(!app.show_output);
        assert_eq!(app.output, "kept\n");
    }

    #[test]
    fn set_source_roundtrips_verbatim() {
        let mut app = new_app();
        app.set_source("a\n\nb");
        assert_eq!(app.source_text(), "a\n\nb");
        assert_eq!(app.lines.len(), 3);
    }

    #[test]
    fn editing_helpers() {
        let mut app = new_app();
        app.set_source("ab");
        app.move_cursor_right();
        app.insert_char('x');
        assert_eq!(app.source_text(), "axb");
        app.insert_newline();
        assert_eq!(app.source_text(), "ax\nb");
        assert_eq!((app.cursor_line, app.cursor_col), (1, 0));
        app.backspace();
        assert_eq!(app.source_text(), "axb");
        assert_eq!((app.cursor_line, app.cursor_col), (0, 2));
        app.move_cursor_home();
        app.delete();
        assert_eq!(app.source_text(), "xb");
    }

    #[test]
    fn backspace_merges_lines_with_multibyte_content() {
        let mut app = new_app();
        app.set_source("héllo\nwörld");
        app.move_cursor_down();
        app.backspace();
        assert_eq!(app.source_text(), "héllowörld");
        assert_eq!((app.cursor_line, app.cursor_col), (0, 5));
    }
}
