use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upstream marketplace an item is listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Ebay,
    AliExpress,
    Schmiedmann,
}

impl Source {
    /// Every known source, in query order.
    pub const ALL: [Source; 3] = [Source::Ebay, Source::AliExpress, Source::Schmiedmann];

    /// Name used on the wire (`source=` query parameter and item records).
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Ebay => "eBay",
            Source::AliExpress => "AliExpress",
            Source::Schmiedmann => "Schmiedmann",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown source {:?}", self.0)
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Source::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSource(trimmed.to_string()))
    }
}

/// User-controlled filter over the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub era: Option<String>,
    pub category: Option<String>,
    pub sources: BTreeSet<Source>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            era: None,
            category: None,
            sources: Source::ALL.into_iter().collect(),
        }
    }
}

impl FilterState {
    pub fn new(
        era: Option<String>,
        category: Option<String>,
        sources: impl IntoIterator<Item = Source>,
    ) -> Self {
        Self {
            era: non_empty(era),
            category: non_empty(category),
            sources: sources.into_iter().collect(),
        }
    }

    pub fn with_era(mut self, era: Option<String>) -> Self {
        self.era = non_empty(era);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = non_empty(category);
        self
    }

    /// Adds the source if absent, removes it otherwise.
    pub fn toggle_source(mut self, source: Source) -> Self {
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
        self
    }

    pub fn all_sources_enabled(&self) -> bool {
        Source::ALL.iter().all(|source| self.sources.contains(source))
    }

    /// True when era or category differ; stories depend only on these.
    pub fn story_scope_differs(&self, other: &FilterState) -> bool {
        self.era != other.era || self.category != other.category
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            era: non_empty(self.era),
            category: non_empty(self.category),
            sources: self.sources,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A catalog listing as returned by the item API.
///
/// Only the fields the pagination engine relies on are typed; everything
/// else is carried through untouched for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebay_url: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// De-duplication identity of an item: `(id, url)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub id: i64,
    pub url: String,
}

impl Item {
    /// Listing URL, preferring `item_url` over the legacy `ebay_url`.
    pub fn url(&self) -> Option<&str> {
        self.item_url.as_deref().or(self.ebay_url.as_deref())
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            id: self.id,
            url: self.url().unwrap_or_default().to_string(),
        }
    }
}

/// Editorial content unit interleaved into the item stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_search_terms: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
