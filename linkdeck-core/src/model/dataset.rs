//! src/model/dataset.rs
//! ============================================================================
//! # Dataset: the session's link list
//!
//! Built once from the fetched JSON and shared behind an `Arc<[Link]>`.
//! Filtering hands out indices into the snapshot; nothing ever writes to it.

use std::sync::Arc;

use crate::model::{
    category::CategorySet,
    filter::FilterState,
    link::{Link, LinkEntry},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    links: Arc<[Link]>,
}

impl Dataset {
    pub fn new(links: Vec<Link>) -> Self {
        Self {
            links: links.into(),
        }
    }

    /// Parses a JSON link list. A top-level `null` yields an empty dataset;
    /// anything other than an array of entries is an error.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let entries: Option<Vec<LinkEntry>> = serde_json::from_slice(bytes)?;
        Ok(entries.unwrap_or_default().into_iter().collect())
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn categories(&self) -> CategorySet {
        CategorySet::derive(self.links.iter())
    }

    /// Indices of the links admitted by `filter`, in dataset order.
    pub fn filter(&self, filter: &FilterState) -> Vec<usize> {
        if filter.is_unfiltered() {
            return (0..self.links.len()).collect();
        }
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| filter.admits(link))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Distinct icon sources, in first-seen order.
    pub fn icon_sources(&self) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        for src in self.links.iter().filter_map(Link::icon_source) {
            seen.insert(src.to_string());
        }
        seen.into_iter().collect()
    }

    /// True when both handles point at the same snapshot.
    pub fn shares_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.links, &other.links)
    }
}

impl FromIterator<LinkEntry> for Dataset {
    fn from_iter<T: IntoIterator<Item = LinkEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Link::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::CategoryChoice;

    const SAMPLE: &str = r#"[
        {"name": "GitHub", "url": "https://github.com", "category": "Dev", "icon": "https://github.com/favicon.ico"},
        {"name": "Hacker News", "url": "https://news.ycombinator.com", "category": "News"},
        {"name": "GitLab", "url": "https://gitlab.com", "category": "Dev", "description": "Self-hosted mirror"},
        {"name": "Lobsters", "url": "https://lobste.rs", "category": "News", "icon": "https://github.com/favicon.ico"},
        {"name": "Scratchpad", "url": "https://example.org"}
    ]"#;

    fn sample() -> Dataset {
        Dataset::from_json(SAMPLE.as_bytes()).unwrap()
    }

    fn names(ds: &Dataset, idx: &[usize]) -> Vec<String> {
        idx.iter()
            .map(|i| ds.get(*i).unwrap().name().to_string())
            .collect()
    }

    /// Straightforward restatement of the filter rule, used as the oracle.
    fn reference(ds: &Dataset, category: &str, search: &str) -> Vec<usize> {
        let needle = search.to_lowercase();
        (0..ds.len())
            .filter(|i| {
                let link = ds.get(*i).unwrap();
                (category == "All" || link.category() == Some(category))
                    && (search.is_empty() || link.name().to_lowercase().contains(&needle))
            })
            .collect()
    }

    #[test]
    fn parses_array_in_order() {
        let ds = sample();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.links()[0].name(), "GitHub");
        assert_eq!(ds.links()[4].name(), "Scratchpad");
    }

    #[test]
    fn null_and_empty_array_are_empty() {
        assert!(Dataset::from_json(b"null").unwrap().is_empty());
        assert!(Dataset::from_json(b"[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_is_an_error() {
        assert!(Dataset::from_json(br#"{"name":"x","url":"y"}"#).is_err());
        assert!(Dataset::from_json(b"[{\"name\": ").is_err());
    }

    #[test]
    fn filter_matches_reference_for_all_inputs() {
        let ds = sample();
        for category in ["All", "Dev", "News", "Missing"] {
            for search in ["", "g", "GIT", "hub", "news", "zzz", " "] {
                let filter = FilterState::new(search, CategoryChoice::from_label(category));
                assert_eq!(
                    ds.filter(&filter),
                    reference(&ds, category, search),
                    "category={category} search={search:?}"
                );
            }
        }
    }

    #[test]
    fn category_then_search() {
        let ds = sample();
        let filter = FilterState::new("git", CategoryChoice::Named("Dev".to_string()));
        assert_eq!(names(&ds, &ds.filter(&filter)), ["GitHub", "GitLab"]);

        let filter = FilterState::new("git", CategoryChoice::Named("News".to_string()));
        assert!(ds.filter(&filter).is_empty());
    }

    #[test]
    fn filtering_never_touches_the_snapshot() {
        let ds = sample();
        let before = ds.clone();
        let _ = ds.filter(&FilterState::new("hub", CategoryChoice::All));
        assert_eq!(ds, before);
        assert!(ds.shares_snapshot(&before));
    }

    #[test]
    fn one_mistyped_category_does_not_fail_the_load() {
        let ds = Dataset::from_json(
            br#"[{"name":"A","url":"https://a","category":5},{"name":"B","url":"https://b","category":"Dev"}]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.links()[0].category(), None);
        assert_eq!(ds.categories().labels().collect::<Vec<_>>(), ["All", "Dev"]);
    }

    #[test]
    fn icon_sources_are_distinct() {
        assert_eq!(sample().icon_sources(), ["https://github.com/favicon.ico"]);
    }
}
