//! src/view/ui.rs
//! ============================================================
//! Frame renderer: draws the whole directory from `&AppState`.
//! Nothing is mutated while painting; the grid geometry of the
//! frame is returned so the dispatcher can move by rows.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use tracing::{instrument, warn};

use crate::{
    model::{
        app_state::AppState,
        ui_state::{GridMetrics, NotificationLevel, UIMode, UIOverlay},
    },
    view::{
        components::{
            card_grid::CardGrid, category_bar::CategoryBar, confirm_overlay::ConfirmOverlay,
            help_overlay::HelpOverlay, notification_overlay::NotificationOverlay,
            search_bar::SearchBar, status_bar::StatusBar,
        },
        theme::Palette,
    },
};

/// ---------------------------------------------------------------------------
/// Renderer struct (layout cache + stats)
/// ---------------------------------------------------------------------------
pub struct UIRenderer {
    cache: LayoutCache,
    stats: RenderStats,
}

#[derive(Default)]
struct LayoutCache {
    screen: Rect,
    /// search, category, grid, status
    main: [Rect; 4],
    hit: u64,
    miss: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self {
            cache: LayoutCache::default(),
            stats: RenderStats::default(),
        }
    }

    pub const fn get_stats(&self) -> RenderStats {
        self.stats
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// ---------------------------------------------------------------------------
/// public API
/// ---------------------------------------------------------------------------
impl UIRenderer {
    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &AppState) -> GridMetrics {
        let start = Instant::now();
        let palette = Palette::for_theme(app.config.theme);
        self.update_layout_cache(f.area());
        let [search, category, grid, status] = self.cache.main;

        SearchBar::new().render(
            f,
            app.directory.search(),
            app.ui.mode == UIMode::Search && app.ui.overlay == UIOverlay::None,
            &palette,
            search,
        );
        CategoryBar::new().render(f, app.directory.category(), &palette, category);
        let metrics = CardGrid::new().render(f, &app.directory, &app.icons, &palette, grid);
        StatusBar::new().render(f, &app.directory, &app.ui, &palette, status);

        self.draw_overlays(f, app, &palette);

        let dur = start.elapsed();
        self.stats.total += dur;
        self.stats.frames += 1;
        if dur.as_millis() > 16 {
            self.stats.slow += 1;
            warn!("Slow render: {}ms (target: <16ms)", dur.as_millis());
        }
        metrics
    }
}

/// ---------------------------------------------------------------------------
/// overlays
/// ---------------------------------------------------------------------------
impl UIRenderer {
    fn draw_overlays(&self, f: &mut Frame<'_>, app: &AppState, palette: &Palette) {
        let scr = f.area();

        match app.ui.overlay {
            UIOverlay::Help => HelpOverlay::new().render(f, palette, centered(scr, 60, 80)),
            UIOverlay::Confirm => {
                if let Some(pending) = app.directory.pending() {
                    ConfirmOverlay::new().render(f, pending, palette, centered(scr, 60, 40));
                }
            }
            UIOverlay::None => {}
        }

        if let Some(n) = &app.ui.notification {
            NotificationOverlay::new().render(f, n, palette, notification_rect(scr, n.level));
        }
    }
}

/// ---------------------------------------------------------------------------
/// util: layout / rectangles
/// ---------------------------------------------------------------------------
impl UIRenderer {
    fn update_layout_cache(&mut self, scr: Rect) {
        if self.cache.screen == scr && self.cache.hit + self.cache.miss > 0 {
            self.cache.hit += 1;
            return;
        }

        self.cache.screen = scr;
        self.cache.miss += 1;
        self.cache.main = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(scr);
    }
}

fn centered(r: Rect, w_pct: u16, h_pct: u16) -> Rect {
    let w = percent_of(r.width, w_pct);
    let h = percent_of(r.height, h_pct).max(7).min(r.height);
    Rect {
        x: r.x + (r.width - w) / 2,
        y: r.y + (r.height - h) / 2,
        width: w,
        height: h,
    }
}

fn notification_rect(scr: Rect, lvl: NotificationLevel) -> Rect {
    let h = if lvl == NotificationLevel::Error { 5 } else { 4 };
    let w = percent_of(scr.width, 60);
    Rect {
        x: scr.x + (scr.width - w) / 2,
        y: scr.y + 1,
        width: w,
        height: h,
    }
    .intersection(scr)
}

/// `pct` percent of `len`, computed wide so large terminals cannot overflow.
fn percent_of(len: u16, pct: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(pct.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(len).min(len)
}

impl RenderStats {
    pub fn fps(&self) -> f64 {
        if self.frames > 0 && !self.total.is_zero() {
            self.frames as f64 / self.total.as_secs_f64()
        } else {
            0.0
        }
    }
}
