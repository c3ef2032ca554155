//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Pseudocode with keyword highlighting and the error line marked
//! - [`generated`]: Generated Python, or the translation error
//! - [`terminal`]: Captured output of the last run
//! - [`status`]: Status bar with keybindings and translation state
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and the data it shows. Scroll offsets are owned by the app and clamped
//! here.

pub mod generated;
pub mod source;
pub mod status;
pub mod terminal;

pub use generated::render_generated_pane;
pub use source::render_source_pane;
pub use status::{render_status_bar, StatusKind};
pub use terminal::{render_terminal_pane, TerminalLine};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least 1.
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp a scroll offset so the last page stays full.
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = usize::MAX;
        clamp_scroll(&mut offset, 30, 10);
        assert_eq!(offset, 20);

        let mut offset = 5;
        clamp_scroll(&mut offset, 4, 10);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_visible_height() {
        assert_eq!(visible_height(Rect::new(0, 0, 10, 12)), 10);
        assert_eq!(visible_height(Rect::new(0, 0, 10, 1)), 1);
    }
}
