//! Main TUI application state and logic

use crate::error::TranslationError;
use crate::runner::{ExecutionOutput, Executor, ProgramInput, RuntimeError};
use crate::translate::translate;
use crate::ui::panes::{self, terminal::run_lines, StatusKind, TerminalLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Generated,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> generated -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Generated,
            FocusedPane::Generated => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Generated => FocusedPane::Source,
            FocusedPane::Output => FocusedPane::Generated,
        }
    }
}

/// The main application state
pub struct App {
    /// File the pseudocode is loaded from
    pub source_path: PathBuf,

    /// The pseudocode being translated
    pub source_code: String,

    /// Result of the last translation
    pub translation: Result<String, TranslationError>,

    /// Lines captured from the last run, if any run happened
    pub output_lines: Option<Vec<TerminalLine>>,

    executor: Box<dyn Executor>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub generated_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_kind: StatusKind,
}

impl App {
    /// Create a new app and translate `source_code` right away
    pub fn new(source_path: PathBuf, source_code: String, executor: Box<dyn Executor>) -> Self {
        let mut app = App {
            source_path,
            source_code,
            translation: Ok(String::new()),
            output_lines: None,
            executor,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            generated_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::new(),
            status_kind: StatusKind::Compiled,
        };
        app.compile();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left: pseudocode | Right: generated code (top) and output (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let error_line = self.translation.as_ref().err().map(|e| e.line());

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_generated_pane(
            frame,
            right_rows[0],
            &self.translation,
            self.focused_pane == FocusedPane::Generated,
            &mut self.generated_scroll,
        );

        panes::render_terminal_pane(
            frame,
            right_rows[1],
            self.output_lines.as_deref().unwrap_or_default(),
            self.output_lines.is_some(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(frame, main_chunks[1], &self.status_message, self.status_kind);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                // clamped to the content when rendered
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.reload(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.execute(),
            KeyCode::Char('w') | KeyCode::Char('W') => self.write_generated(),
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Generated => &mut self.generated_scroll,
            FocusedPane::Output => &mut self.output_scroll,
        }
    }

    /// Translate the current source text
    pub fn compile(&mut self) {
        self.translation = translate(&self.source_code);
        self.generated_scroll = 0;

        match &self.translation {
            Ok(code) => {
                self.status_kind = StatusKind::Compiled;
                self.status_message = format!("Translated {} line(s)", code.lines().count());
            }
            Err(err) => {
                // bring the offending line into view
                self.source_scroll = err.line().saturating_sub(3);
                self.status_kind = StatusKind::Error;
                self.status_message = err.to_string();
            }
        }
    }

    /// Re-read the source file and translate it again
    pub fn reload(&mut self) {
        match fs::read_to_string(&self.source_path) {
            Ok(source) => {
                debug!("reloaded {}", self.source_path.display());
                self.source_code = source;
                self.output_lines = None;
                self.compile();
            }
            Err(e) => {
                self.status_kind = StatusKind::Error;
                self.status_message =
                    format!("Cannot read {}: {}", self.source_path.display(), e);
            }
        }
    }

    /// Run the generated code with an empty stdin
    pub fn execute(&mut self) {
        let code = match &self.translation {
            Ok(code) => code,
            Err(_) => {
                self.status_kind = StatusKind::Error;
                self.status_message = "Nothing to run: fix the translation error first".to_string();
                return;
            }
        };

        let result: Result<ExecutionOutput, RuntimeError> =
            self.executor.execute(code, &ProgramInput::Empty);

        match &result {
            Ok(_) => {
                self.status_kind = StatusKind::Ran;
                self.status_message = "Program finished".to_string();
            }
            Err(err) => {
                self.status_kind = StatusKind::RunFailed;
                self.status_message = err.to_string().lines().next().unwrap_or_default().to_string();
            }
        }

        self.output_lines = Some(run_lines(&result));
        // Auto-scroll output to bottom
        self.output_scroll = usize::MAX;
    }

    /// Save the generated code next to the source file
    pub fn write_generated(&mut self) {
        let code = match &self.translation {
            Ok(code) => code,
            Err(_) => {
                self.status_kind = StatusKind::Error;
                self.status_message = "Nothing to write: fix the translation error first".to_string();
                return;
            }
        };

        let target = generated_path(&self.source_path);
        match fs::write(&target, format!("{}\n", code)) {
            Ok(()) => {
                info!("wrote {}", target.display());
                self.status_message = format!("Wrote {}", target.display());
            }
            Err(e) => {
                self.status_kind = StatusKind::Error;
                self.status_message = format!("Cannot write {}: {}", target.display(), e);
            }
        }
    }
}

/// `program.txt` -> `program.py`, in the same directory
pub fn generated_path(source_path: &Path) -> PathBuf {
    source_path.with_extension("py")
}
