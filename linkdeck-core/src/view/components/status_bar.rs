//! src/view/components/status_bar.rs
//!
//! One line: directory state and filter summary on the left, key hints for
//! the current mode on the right.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};

use crate::{
    controller::directory::DirectoryController,
    model::{
        directory_state::DirectoryState,
        ui_state::{UIMode, UIState},
    },
    view::theme::Palette,
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        directory: &DirectoryController,
        ui: &UIState,
        palette: &Palette,
        area: Rect,
    ) {
        let mode = match ui.mode {
            UIMode::Browse => "BROWSE",
            UIMode::Search => "SEARCH",
        };

        let summary = match directory.state() {
            DirectoryState::Ready(ready) => {
                let filter = directory.filter_state();
                let mut text = format!(
                    "{} of {} links | {}",
                    directory.container().cards().len(),
                    ready.dataset.len(),
                    filter.category()
                );
                if !directory.search().is_empty() {
                    text.push_str(" | \"");
                    text.push_str(directory.search().value());
                    text.push('"');
                }
                text
            }
            other => other.label().to_string(),
        };
        let left = format!(" {mode} | {summary}");

        let right = match ui.mode {
            UIMode::Search => "Enter/Esc done  Ctrl+U clear  Tab category ",
            UIMode::Browse => "/ search  Tab category  Enter open  F5 reload  ? help  q quit ",
        };

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        frame.render_widget(
            Paragraph::new(left)
                .style(palette.base().bg(palette.surface))
                .alignment(Alignment::Left),
            layout[0],
        );
        frame.render_widget(
            Paragraph::new(right)
                .style(palette.muted_style().bg(palette.surface))
                .alignment(Alignment::Right),
            layout[1],
        );
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
