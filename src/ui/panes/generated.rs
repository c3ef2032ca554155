//! Generated Python pane

use super::{clamp_scroll, pane_block, visible_height};
use crate::error::TranslationError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn python_word_style(word: &str, is_function: bool) -> Style {
    match word {
        "def" | "if" | "else" | "while" | "return" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "print" | "input" => Style::default().fg(DEFAULT_THEME.function),
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Highlight one line of generated code. The generator's output is regular
/// enough that splitting on word boundaries and quotes is sufficient.
fn highlight_python(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let (len, style) = if c == '"' {
            let end = rest[1..].find('"').map(|i| i + 2).unwrap_or(rest.len());
            (end, Style::default().fg(DEFAULT_THEME.string))
        } else if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            (end, Style::default().fg(DEFAULT_THEME.number))
        } else if c.is_ascii_alphabetic() || c == '_' {
            let end = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(rest.len());
            let is_function = rest[end..].starts_with('(');
            (end, python_word_style(&rest[..end], is_function))
        } else {
            (c.len_utf8(), Style::default().fg(DEFAULT_THEME.fg))
        };

        spans.push(Span::styled(&rest[..len], style));
        rest = &rest[len..];
    }

    Line::from(spans)
}

/// Render the generated code pane, or the translation error in its place
pub fn render_generated_pane(
    frame: &mut Frame,
    area: Rect,
    translation: &Result<String, TranslationError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Generated Python ", is_focused);

    let code = match translation {
        Ok(code) => code,
        Err(err) => {
            let lines = vec![
                Line::from(Span::styled(
                    err.kind(),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    err.to_string(),
                    Style::default().fg(DEFAULT_THEME.error),
                )),
            ];
            *scroll_offset = 0;
            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let lines: Vec<&str> = code.lines().collect();
    let height = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|line| highlight_python(line))
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_python_function_call() {
        let line = highlight_python("    greet()");
        let greet = line
            .spans
            .iter()
            .find(|s| s.content == "greet")
            .expect("greet span");

        assert_eq!(greet.style.fg, Some(DEFAULT_THEME.function));
    }

    #[test]
    fn test_highlight_python_keeps_text() {
        let source = "if (x > 10):";
        let line = highlight_python(source);
        let joined: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(joined, source);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.keyword));
    }
}
