//! src/view/components/card_grid.rs
//! ============================================================================
//! The card container: either a placeholder message or a grid of fixed-size
//! cards laid out left to right, top to bottom, in dataset order. The grid
//! scrolls by whole rows to keep the selected card visible.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    controller::directory::DirectoryController,
    model::{
        directory_state::{Card, ContainerView, DirectoryState, Placeholder},
        icon_registry::{IconRegistry, IconStatus},
        link::{CardIcon, Link},
        ui_state::GridMetrics,
    },
    view::theme::Palette,
};

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 4;

const IMAGE_GLYPH: &str = "[▣]";
const BLANK_ICON: &str = "   ";
const GATED_MARKER: &str = "⚠ confirm";

pub struct CardGrid;

impl CardGrid {
    pub fn new() -> Self {
        Self
    }

    /// Columns and fully visible rows that fit in `inner`.
    pub fn metrics(inner: Rect) -> GridMetrics {
        GridMetrics {
            columns: usize::from((inner.width / CARD_WIDTH).max(1)),
            visible_rows: usize::from((inner.height / CARD_HEIGHT).max(1)),
        }
    }

    /// First visible row for a selection, scrolling just enough to show it.
    pub fn first_row(selected: Option<usize>, metrics: GridMetrics) -> usize {
        let row = selected.unwrap_or(0) / metrics.columns.max(1);
        row.saturating_sub(metrics.visible_rows.saturating_sub(1))
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        directory: &DirectoryController,
        icons: &IconRegistry,
        palette: &Palette,
        area: Rect,
    ) -> GridMetrics {
        let title = match directory.state().dataset() {
            Some(dataset) => format!(
                " Links {}/{} ",
                directory.container().cards().len(),
                dataset.len()
            ),
            None => " Links ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(palette.border_style())
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let metrics = Self::metrics(inner);
        match directory.container() {
            ContainerView::Placeholder(placeholder) => {
                self.render_placeholder(frame, *placeholder, directory, palette, inner);
            }
            ContainerView::Cards(cards) => {
                self.render_cards(frame, cards, directory, icons, palette, inner, metrics);
            }
        }
        metrics
    }

    fn render_placeholder(
        &self,
        frame: &mut Frame<'_>,
        placeholder: Placeholder,
        directory: &DirectoryController,
        palette: &Palette,
        area: Rect,
    ) {
        let style = if placeholder.is_error() {
            palette.base().fg(palette.error)
        } else {
            palette.muted_style()
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(placeholder.text(directory.prompts()), style)),
        ];
        if let DirectoryState::LoadError(reason) = directory.state() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(reason.as_str(), palette.muted_style())));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_cards(
        &self,
        frame: &mut Frame<'_>,
        cards: &[Card],
        directory: &DirectoryController,
        icons: &IconRegistry,
        palette: &Palette,
        area: Rect,
        metrics: GridMetrics,
    ) {
        let first_row = Self::first_row(directory.selected(), metrics);
        let skip = first_row * metrics.columns;
        let take = metrics.columns * metrics.visible_rows;

        for (slot, (index, card)) in cards.iter().enumerate().skip(skip).take(take).enumerate() {
            let Some(link) = directory.link_for(card) else {
                continue;
            };
            let column = (slot % metrics.columns) as u16;
            let row = (slot / metrics.columns) as u16;
            let rect = Rect {
                x: area.x + column * CARD_WIDTH,
                y: area.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT,
            }
            .intersection(area);

            let selected = directory.selected() == Some(index);
            self.render_card(frame, link, icons, palette, selected, rect);
        }
    }

    fn render_card(
        &self,
        frame: &mut Frame<'_>,
        link: &Link,
        icons: &IconRegistry,
        palette: &Palette,
        selected: bool,
        area: Rect,
    ) {
        let (border, body) = if selected {
            (palette.focused_border_style(), palette.selected_style())
        } else {
            (palette.border_style(), palette.base())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(body);

        let icon = match link.icon() {
            CardIcon::Image(src) if icons.status(src) == IconStatus::Failed => {
                Span::raw(BLANK_ICON)
            }
            CardIcon::Image(_) => Span::styled(IMAGE_GLYPH, body.fg(palette.info)),
            CardIcon::Initial(initial) => Span::styled(
                format!("[{initial}]"),
                body.fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
        };
        let title = Line::from(vec![
            icon,
            Span::raw(" "),
            Span::styled(link.name(), body.add_modifier(Modifier::BOLD)),
        ]);

        let mut detail = vec![Span::styled(
            link.category().unwrap_or_default(),
            body.fg(palette.muted),
        )];
        if link.target().is_gated() {
            if link.category().is_some() {
                detail.push(Span::raw(" "));
            }
            detail.push(Span::styled(GATED_MARKER, body.fg(palette.warning)));
        }

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(vec![title, Line::from(detail)]).block(block),
            area,
        );
    }
}

impl Default for CardGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_never_drop_below_one() {
        assert_eq!(
            CardGrid::metrics(Rect::new(0, 0, 10, 2)),
            GridMetrics {
                columns: 1,
                visible_rows: 1
            }
        );
        assert_eq!(
            CardGrid::metrics(Rect::new(0, 0, 95, 13)),
            GridMetrics {
                columns: 3,
                visible_rows: 3
            }
        );
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let metrics = GridMetrics {
            columns: 2,
            visible_rows: 3,
        };
        assert_eq!(CardGrid::first_row(None, metrics), 0);
        assert_eq!(CardGrid::first_row(Some(5), metrics), 0);
        assert_eq!(CardGrid::first_row(Some(6), metrics), 1);
        assert_eq!(CardGrid::first_row(Some(11), metrics), 3);
    }
}
