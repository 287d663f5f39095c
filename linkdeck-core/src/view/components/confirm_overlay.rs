//! src/view/components/confirm_overlay.rs
//! Modal prompt shown before opening a described link.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{controller::directory::PendingConfirmation, view::theme::Palette};

pub struct ConfirmOverlay;

impl ConfirmOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        pending: &PendingConfirmation,
        palette: &Palette,
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Open {}? ", pending.name))
            .title_alignment(Alignment::Center)
            .border_style(palette.base().fg(palette.warning))
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [message_area, url_area, keys_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        frame.render_widget(
            Paragraph::new(pending.message.as_str())
                .style(palette.base())
                .wrap(Wrap { trim: false }),
            message_area,
        );
        frame.render_widget(
            Paragraph::new(pending.url.as_str())
                .style(palette.muted_style())
                .alignment(Alignment::Center),
            url_area,
        );

        let keys = Line::from(vec![
            Span::styled(
                "[y] Continue",
                palette.base().fg(palette.success).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                "[n] Cancel",
                palette.base().fg(palette.error).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(keys).alignment(Alignment::Center),
            keys_area,
        );
    }
}

impl Default for ConfirmOverlay {
    fn default() -> Self {
        Self::new()
    }
}
