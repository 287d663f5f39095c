//! src/model/directory_state.rs
//! ============================================================================
//! Lifecycle of the directory view and what its card container shows.
//!
//! ```text
//! Loading ──► Ready(dataset) ──(input)──► Ready(dataset)
//!    │
//!    ├──────► EmptyData
//!    └──────► LoadError(reason)
//! ```
//!
//! `EmptyData` and `LoadError` are terminal until the next full load.

use crate::config::PromptConfig;
use crate::model::{category::CategorySet, dataset::Dataset};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Ready(ReadyDirectory),
    LoadError(String),
    EmptyData,
}

impl DirectoryState {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub const fn dataset(&self) -> Option<&Dataset> {
        match self {
            Self::Ready(ready) => Some(&ready.dataset),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::LoadError(_) => "load-error",
            Self::EmptyData => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyDirectory {
    pub dataset: Dataset,
    pub categories: CategorySet,
}

impl ReadyDirectory {
    pub fn new(dataset: Dataset) -> Self {
        let categories = dataset.categories();
        Self {
            dataset,
            categories,
        }
    }
}

/// Message shown in place of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    NoLinksConfigured,
    NoMatches,
    LoadError,
}

impl Placeholder {
    pub fn text<'a>(&self, prompts: &'a PromptConfig) -> &'a str {
        match self {
            Self::Loading => &prompts.loading,
            Self::NoLinksConfigured => &prompts.no_links,
            Self::NoMatches => &prompts.no_matches,
            Self::LoadError => &prompts.load_error,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::LoadError)
    }
}

/// One rendered card, pointing into the dataset snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub link: usize,
}

/// Contents of the card container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerView {
    Placeholder(Placeholder),
    Cards(Vec<Card>),
}

impl Default for ContainerView {
    fn default() -> Self {
        Self::Placeholder(Placeholder::Loading)
    }
}

impl ContainerView {
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Cards(cards) => cards,
            Self::Placeholder(_) => &[],
        }
    }

    pub const fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Self::Placeholder(p) => Some(*p),
            Self::Cards(_) => None,
        }
    }
}
