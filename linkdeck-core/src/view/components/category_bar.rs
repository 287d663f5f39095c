//! src/view/components/category_bar.rs
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Tabs},
};

use crate::{
    model::category::{ALL_CATEGORY, CategorySelector},
    view::theme::Palette,
};

pub struct CategoryBar;

impl CategoryBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        selector: &CategorySelector,
        palette: &Palette,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Category (Tab / Shift+Tab) ")
            .border_style(palette.border_style())
            .style(palette.base());

        // An unpopulated selector still reads as "All", dimmed.
        let tabs = if selector.options().is_empty() {
            Tabs::new(vec![ALL_CATEGORY])
                .style(palette.muted_style())
                .highlight_style(palette.muted_style())
        } else {
            Tabs::new(selector.options().iter().map(String::as_str))
                .style(palette.base())
                .highlight_style(palette.highlight_style())
        };

        frame.render_widget(
            tabs.select(selector.selected_index()).block(block),
            area,
        );
    }
}

impl Default for CategoryBar {
    fn default() -> Self {
        Self::new()
    }
}
