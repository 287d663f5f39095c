//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin palettes
//!
//! Mocha backs the default dark theme, Latte the light one. Colors are from
//! the official Catppuccin palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

use crate::config::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

pub const MOCHA: Palette = Palette {
    background: Color::Rgb(30, 30, 46),   // Base
    surface: Color::Rgb(69, 71, 90),      // Surface1
    foreground: Color::Rgb(205, 214, 244), // Text
    muted: Color::Rgb(127, 132, 156),     // Overlay1
    accent: Color::Rgb(203, 166, 247),    // Mauve
    border: Color::Rgb(137, 180, 250),    // Blue
    info: Color::Rgb(137, 220, 235),      // Sky
    success: Color::Rgb(166, 227, 161),   // Green
    warning: Color::Rgb(249, 226, 175),   // Yellow
    error: Color::Rgb(243, 139, 168),     // Red
};

pub const LATTE: Palette = Palette {
    background: Color::Rgb(239, 241, 245), // Base
    surface: Color::Rgb(188, 192, 204),    // Surface1
    foreground: Color::Rgb(76, 79, 105),   // Text
    muted: Color::Rgb(140, 143, 161),      // Overlay1
    accent: Color::Rgb(136, 57, 239),      // Mauve
    border: Color::Rgb(30, 102, 245),      // Blue
    info: Color::Rgb(4, 165, 229),         // Sky
    success: Color::Rgb(64, 160, 43),      // Green
    warning: Color::Rgb(223, 142, 29),     // Yellow
    error: Color::Rgb(210, 15, 57),        // Red
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let palette = match theme {
            Theme::Default => MOCHA,
            Theme::Light => LATTE,
        };
        debug!(?theme, background = ?palette.background, "Palette selected");
        palette
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.surface)
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        MOCHA
    }
}
