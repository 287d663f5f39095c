//! src/view/components/notification_overlay.rs
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{trace, warn};

use crate::{
    model::ui_state::{Notification, NotificationLevel},
    view::theme::Palette,
};

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        notification: &Notification,
        palette: &Palette,
        area: Rect,
    ) {
        let render_start = std::time::Instant::now();
        frame.render_widget(Clear, area);

        let (color, title, icon) = match notification.level {
            NotificationLevel::Info => (palette.info, "Info", "ℹ"),
            NotificationLevel::Warning => (palette.warning, "Warning", "⚠"),
            NotificationLevel::Error => (palette.error, "Error", "✕"),
            NotificationLevel::Success => (palette.success, "Success", "✓"),
        };
        let border_style = Style::default().fg(color);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} {title} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(palette.base());

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner_area);

        let message = Paragraph::new(notification.message.as_str())
            .style(palette.base())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(message, layout[0]);

        let dismiss_text = if notification.auto_dismiss.is_some() {
            "Auto-dismissing... Esc to dismiss"
        } else {
            "Esc to dismiss"
        };
        let dismiss = Paragraph::new(dismiss_text)
            .style(palette.muted_style().add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center);
        frame.render_widget(dismiss, layout[1]);

        let render_time_us = render_start.elapsed().as_micros();
        trace!(
            level = ?notification.level,
            message_len = notification.message.len(),
            render_time_us,
            "Notification rendered"
        );
        if render_time_us > 3000 {
            warn!(
                marker = "UI_RENDER_SLOW",
                render_time_us,
                "Slow notification overlay render detected"
            );
        }
    }
}

impl Default for NotificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}
