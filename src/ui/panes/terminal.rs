//! Program output pane rendering

use super::{clamp_scroll, pane_block, visible_height};
use crate::runner::{ExecutionOutput, RuntimeError};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// A line of captured program output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    /// Came from stderr or describes a failure
    pub is_error: bool,
}

impl TerminalLine {
    fn out(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_error: false,
        }
    }

    fn err(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_error: true,
        }
    }
}

/// Flatten the result of a run into displayable lines: stdout first, then
/// stderr and any failure description.
pub fn run_lines(result: &Result<ExecutionOutput, RuntimeError>) -> Vec<TerminalLine> {
    let mut lines = Vec::new();

    match result {
        Ok(output) => {
            lines.extend(output.stdout.lines().map(TerminalLine::out));
            lines.extend(output.stderr.lines().map(TerminalLine::err));
        }
        Err(RuntimeError::Failed { stdout, stderr, .. }) => {
            lines.extend(stdout.lines().map(TerminalLine::out));
            lines.extend(stderr.lines().map(TerminalLine::err));
        }
        Err(err @ RuntimeError::Timeout { stdout, .. }) => {
            lines.extend(stdout.lines().map(TerminalLine::out));
            lines.push(TerminalLine::err(&err.to_string()));
        }
        Err(err) => lines.push(TerminalLine::err(&err.to_string())),
    }

    lines
}

/// Render the program output pane
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[TerminalLine],
    has_run: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Program Output ", is_focused);

    if lines.is_empty() {
        let placeholder = if has_run { "(no output)" } else { "(press x to run)" };
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let height = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), height);

    let visible_items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|line| {
            let color = if line.is_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            };
            ListItem::new(line.text.as_str()).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
