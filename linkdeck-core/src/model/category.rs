//! src/model/category.rs
//! Category selector model: the derived `CategorySet` and the selection over it.

use std::fmt;

use indexmap::IndexSet;

use crate::model::link::Link;

/// Label of the synthetic "every category" choice.
pub const ALL_CATEGORY: &str = "All";

/// The category the user filters by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    #[default]
    All,
    Named(String),
}

impl CategoryChoice {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORY {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORY,
            Self::Named(name) => name,
        }
    }

    pub fn admits(&self, link: &Link) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => link.category() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `All` followed by the distinct non-empty categories, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    named: IndexSet<String>,
}

impl CategorySet {
    pub fn derive<'a>(links: impl IntoIterator<Item = &'a Link>) -> Self {
        let named = links
            .into_iter()
            .filter_map(Link::category)
            .filter(|c| *c != ALL_CATEGORY)
            .map(str::to_string)
            .collect();
        Self { named }
    }

    /// Number of members, `All` included.
    pub fn len(&self) -> usize {
        self.named.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_CATEGORY).chain(self.named.iter().map(String::as_str))
    }
}

/// The single-select category control.
///
/// Starts with no options; they are populated once from a loaded dataset.
/// With no options the selected value is `All`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelector {
    options: Vec<String>,
    selected: usize,
}

impl CategorySelector {
    pub fn populate(&mut self, set: &CategorySet) {
        self.options = set.labels().map(str::to_string).collect();
        self.selected = 0;
    }

    pub fn reset(&mut self) {
        self.options.clear();
        self.selected = 0;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> CategoryChoice {
        self.options
            .get(self.selected)
            .map_or(CategoryChoice::All, |label| CategoryChoice::from_label(label))
    }

    /// Moves the selection by `delta`, wrapping around. Returns whether the
    /// selected value changed.
    pub fn cycle(&mut self, delta: isize) -> bool {
        let len = self.options.len();
        if len < 2 {
            return false;
        }
        let next = (self.selected as isize + delta).rem_euclid(len as isize) as usize;
        let changed = next != self.selected;
        self.selected = next;
        changed
    }
}
