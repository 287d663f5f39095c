//! src/model/link.rs
//! ============================================================================
//! # Link entries
//!
//! `LinkEntry` is the wire shape of one item in the link list. `Link` is the
//! loaded form: optional fields normalized, and the navigation behaviour
//! resolved once into a [`LinkTarget`].

use serde::{Deserialize, Deserializer, de::IgnoredAny};

/// One directory item exactly as it appears in the JSON link list.
///
/// Unknown fields are ignored. `name` and `url` must be present; an optional
/// field holding anything other than a string is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(text)) => Some(text),
        Some(Field::Other(_)) | None => None,
    })
}

/// How activating a card navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Navigation needs explicit confirmation; `description` is shown first.
    Gated { url: String, description: String },
    /// Navigation happens immediately.
    Direct { url: String },
}

impl LinkTarget {
    pub fn url(&self) -> &str {
        match self {
            Self::Gated { url, .. } | Self::Direct { url } => url,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Gated { description, .. } => Some(description),
            Self::Direct { .. } => None,
        }
    }

    pub const fn is_gated(&self) -> bool {
        matches!(self, Self::Gated { .. })
    }
}

/// What a card shows in its icon slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIcon<'a> {
    /// An image source; hidden at display time if it fails to load.
    Image(&'a str),
    /// Fallback glyph: the uppercased first character of the name.
    Initial(String),
}

/// A loaded, immutable link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    name: String,
    name_folded: String,
    category: Option<String>,
    icon: Option<String>,
    target: LinkTarget,
}

impl Link {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased name, computed once for case-insensitive search.
    pub fn name_folded(&self) -> &str {
        &self.name_folded
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn icon_source(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub const fn target(&self) -> &LinkTarget {
        &self.target
    }

    pub fn url(&self) -> &str {
        self.target.url()
    }

    pub fn icon(&self) -> CardIcon<'_> {
        match self.icon.as_deref() {
            Some(src) => CardIcon::Image(src),
            None => CardIcon::Initial(initial_of(&self.name)),
        }
    }
}

impl From<LinkEntry> for Link {
    fn from(entry: LinkEntry) -> Self {
        let target = match non_empty(entry.description) {
            Some(description) => LinkTarget::Gated {
                url: entry.url,
                description,
            },
            None => LinkTarget::Direct { url: entry.url },
        };

        Self {
            name_folded: entry.name.to_lowercase(),
            name: entry.name,
            category: non_empty(entry.category),
            icon: non_empty(entry.icon),
            target,
        }
    }
}

// Empty strings count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
