//! Key reference, grouped by where the keys apply.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::view::theme::Palette;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Cards",
        &[
            ("↑ ↓ / k j", "Move one row"),
            ("h l", "Move one card"),
            ("PgUp PgDn", "Move one page"),
            ("Home End / g G", "First / last card"),
            ("Enter", "Open the selected link"),
        ],
    ),
    (
        "Filtering",
        &[
            ("/", "Focus the search field"),
            ("Enter Esc", "Leave search, keep the text"),
            ("Ctrl+U", "Clear the search text"),
            ("Tab ← →", "Next / previous category"),
        ],
    ),
    (
        "Confirmation",
        &[("y Enter", "Continue to the link"), ("n Esc", "Cancel")],
    ),
    (
        "General",
        &[
            ("F5", "Reload the link list"),
            ("Esc", "Dismiss notification"),
            ("?", "Toggle this help"),
            ("q Ctrl+C", "Quit"),
        ],
    ),
];

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, palette: &Palette, area: Rect) {
        frame.render_widget(Clear, area);

        let heading = palette.base().fg(palette.accent).add_modifier(Modifier::BOLD);
        let key = palette.base().fg(palette.warning);

        let mut lines = Vec::new();
        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, heading)));
            for (keys, what) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<16}"), key),
                    Span::styled(*what, palette.base()),
                ]));
            }
            lines.push(Line::from(""));
        }

        let help = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .border_style(palette.border_style())
                    .style(palette.base()),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(help, area);
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
