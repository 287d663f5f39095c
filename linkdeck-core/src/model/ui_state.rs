//! UI state: focus mode, overlays, notifications and redraw bookkeeping.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use compact_str::CompactString;

/// Atomic redraw flags for lock-free UI updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    Notification = 2,
    All = 3,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Which control receives typed characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIMode {
    #[default]
    Browse = 0,
    Search = 1,
}

/// Modal layer drawn above the directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIOverlay {
    #[default]
    None = 0,
    Help = 1,
    Confirm = 2,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
}

/// Card grid geometry from the last frame; drives row-wise movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub columns: usize,
    pub visible_rows: usize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            columns: 1,
            visible_rows: 1,
        }
    }
}

#[derive(Debug)]
pub struct UIState {
    // Atomic flags for lock-free updates
    pub redraw_flags: AtomicU32,

    pub mode: UIMode,
    pub overlay: UIOverlay,

    pub grid: GridMetrics,

    pub notification: Option<Notification>,
    pub notification_timeout: Duration,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl UIState {
    pub fn new(notification_timeout: Duration) -> Self {
        Self {
            redraw_flags: AtomicU32::new(u32::from(RedrawFlag::All.bits())),
            mode: UIMode::Browse,
            overlay: UIOverlay::None,
            grid: GridMetrics::default(),
            notification: None,
            notification_timeout,
        }
    }

    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(u32::from(flag.bits()), Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    pub fn set_mode(&mut self, mode: UIMode) {
        if self.mode != mode {
            self.mode = mode;
            self.request_redraw(RedrawFlag::All);
        }
    }

    pub fn set_overlay(&mut self, overlay: UIOverlay) {
        if self.overlay != overlay {
            self.overlay = overlay;
            self.request_redraw(RedrawFlag::All);
        }
    }

    pub fn toggle_help(&mut self) {
        let next = if self.overlay == UIOverlay::Help {
            UIOverlay::None
        } else {
            UIOverlay::Help
        };
        self.set_overlay(next);
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss: Option<Duration>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss,
        });
        self.request_redraw(RedrawFlag::Notification);
    }

    #[inline]
    pub fn show_info(&mut self, message: impl Into<CompactString>) {
        self.show_notification(
            message,
            NotificationLevel::Info,
            Some(self.notification_timeout),
        );
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) {
        self.show_notification(
            message,
            NotificationLevel::Success,
            Some(self.notification_timeout),
        );
    }

    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Error, None);
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::All);
            true
        } else {
            false
        }
    }

    /// Drops an expired notification. Returns whether one was removed.
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification
            && let Some(auto_dismiss) = notification.auto_dismiss
            && notification.timestamp.elapsed() >= auto_dismiss
        {
            self.notification = None;
            self.request_redraw(RedrawFlag::All);
            return true;
        }
        false
    }
}
