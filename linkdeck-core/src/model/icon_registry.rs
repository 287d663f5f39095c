//! src/model/icon_registry.rs
//! Display-time status of card icon sources.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconStatus {
    /// Not probed (yet, or probing disabled); drawn as an image marker.
    #[default]
    Unknown,
    Available,
    /// Failed to load; the icon cell stays blank.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    statuses: HashMap<String, IconStatus>,
}

impl IconRegistry {
    pub fn status(&self, src: &str) -> IconStatus {
        self.statuses.get(src).copied().unwrap_or_default()
    }

    /// Records a probe result. A source never leaves `Failed`.
    pub fn record(&mut self, src: String, available: bool) {
        let status = if available {
            IconStatus::Available
        } else {
            IconStatus::Failed
        };
        let slot = self.statuses.entry(src).or_default();
        if *slot != IconStatus::Failed {
            *slot = status;
        }
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }
}
