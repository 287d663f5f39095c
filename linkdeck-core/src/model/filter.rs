//! src/model/filter.rs

use crate::model::{category::CategoryChoice, link::Link};

/// Snapshot of the two filter inputs, taken at the start of every filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    needle: String,
    category: CategoryChoice,
}

impl FilterState {
    pub fn new(search: &str, category: CategoryChoice) -> Self {
        Self {
            needle: search.to_lowercase(),
            category,
        }
    }

    /// Lowercased search term.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub const fn category(&self) -> &CategoryChoice {
        &self.category
    }

    pub fn is_unfiltered(&self) -> bool {
        self.needle.is_empty() && self.category == CategoryChoice::All
    }

    /// Category first, then case-insensitive substring match on the name.
    pub fn admits(&self, link: &Link) -> bool {
        self.category.admits(link)
            && (self.needle.is_empty() || link.name_folded().contains(&self.needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::link::LinkEntry;

    fn link(name: &str) -> Link {
        Link::from(LinkEntry {
            name: name.to_string(),
            url: "https://a".to_string(),
            category: Some("Tools".to_string()),
            icon: None,
            description: None,
        })
    }

    #[test]
    fn search_is_case_insensitive_on_both_sides() {
        assert!(FilterState::new("foo", CategoryChoice::All).admits(&link("Foo")));
        assert!(FilterState::new("FOO", CategoryChoice::All).admits(&link("foobar")));
        assert!(!FilterState::new("baz", CategoryChoice::All).admits(&link("Foo")));
    }

    #[test]
    fn default_is_unfiltered() {
        assert!(FilterState::default().is_unfiltered());
        assert!(!FilterState::new("x", CategoryChoice::All).is_unfiltered());
    }
}
