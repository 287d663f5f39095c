//! src/view/components/search_bar.rs
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{model::search_input::SearchInput, view::theme::Palette};

pub struct SearchBar;

impl SearchBar {
    pub fn new() -> Self {
        Self
    }

    /// Draws the search field; places the terminal cursor inside it when
    /// `focused`.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        input: &SearchInput,
        focused: bool,
        palette: &Palette,
        area: Rect,
    ) {
        let border = if focused {
            palette.focused_border_style()
        } else {
            palette.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(border)
            .style(palette.base());

        let line = if input.is_empty() && !focused {
            Line::from(Span::styled("Press / to search by name", palette.muted_style()))
        } else {
            Line::from(input.value())
        };

        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if focused && inner.width > 0 {
            let offset = u16::try_from(input.cursor()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}
