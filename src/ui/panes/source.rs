//! Pseudocode pane rendering with keyword highlighting
//!
//! Keywords are recognized with the lexer's own keyword table, so anything
//! highlighted here is exactly what the translator treats as a keyword,
//! whatever its case. The line of a translation error is painted with the
//! error color.

use super::{clamp_scroll, pane_block, visible_height};
use crate::parser::lexer::Keyword;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for one line of pseudocode
fn highlight_pseudocode(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let len = if c == '"' {
            // up to and including the closing quote, or the end of the line
            let end = rest[1..].find('"').map(|i| i + 2).unwrap_or(rest.len());
            spans.push(Span::styled(
                &rest[..end],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            end
        } else if c.is_ascii_alphabetic() || c == '_' {
            let end = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..end];
            spans.push(Span::styled(word, word_style(word)));
            end
        } else if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            spans.push(Span::styled(
                &rest[..end],
                Style::default().fg(DEFAULT_THEME.number),
            ));
            end
        } else {
            let len = c.len_utf8();
            spans.push(Span::styled(&rest[..len], Style::default().fg(DEFAULT_THEME.fg)));
            len
        };
        rest = &rest[len..];
    }

    Line::from(spans)
}

fn word_style(word: &str) -> Style {
    match Keyword::lookup(word) {
        Some(Keyword::Function) | Some(Keyword::Call) => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the pseudocode pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Pseudocode ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let height = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_pseudocode(line);
            if is_error {
                // Override all styling on the error line
                for span in &mut content.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_tokens() {
        let line = highlight_pseudocode("SET total to 10 + \"a b\"");

        assert_eq!(
            texts(&line),
            vec!["SET", " ", "total", " ", "to", " ", "10", " ", "+", " ", "\"a b\""]
        );
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.fg));
        assert_eq!(line.spans[6].style.fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_highlight_unterminated_string() {
        let line = highlight_pseudocode("print \"oops");

        assert_eq!(texts(&line), vec!["print", " ", "\"oops"]);
    }
}
