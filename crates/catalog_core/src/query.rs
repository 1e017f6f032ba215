use url::Url;

use crate::{FilterState, Source};

/// Number of items requested per page.
pub const PAGE_SIZE: usize = 48;

const ITEMS_PATH: &str = "api/items/";
const STORIES_PATH: &str = "api/stories/";

/// One request against the item API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub skip: usize,
    pub limit: usize,
    pub era: Option<String>,
    pub category: Option<String>,
    /// `None` asks the server for every source.
    pub source: Option<Source>,
}

impl SourceQuery {
    /// Renders the request URL relative to the API base.
    pub fn to_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = join_path(base, ITEMS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("skip", &self.skip.to_string());
            pairs.append_pair("limit", &self.limit.to_string());
            if let Some(era) = self.era.as_deref() {
                pairs.append_pair("era", era);
            }
            if let Some(category) = self.category.as_deref() {
                pairs.append_pair("category", category);
            }
            if let Some(source) = self.source {
                pairs.append_pair("source", source.as_str());
            }
        }
        Ok(url)
    }
}

/// Renders the story API URL; stories are not paginated.
pub fn stories_url(
    base: &Url,
    era: Option<&str>,
    category: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut url = join_path(base, STORIES_PATH)?;
    if era.is_some() || category.is_some() {
        let mut pairs = url.query_pairs_mut();
        if let Some(era) = era {
            pairs.append_pair("era", era);
        }
        if let Some(category) = category {
            pairs.append_pair("category", category);
        }
    }
    Ok(url)
}

fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    // Url::join drops the last segment unless the base ends with '/'.
    if base.path().ends_with('/') {
        base.join(path)
    } else {
        let mut with_slash = base.clone();
        with_slash.set_path(&format!("{}/", base.path()));
        with_slash.join(path)
    }
}

/// What the fetcher has to issue to produce one logical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// No source selected; yields zero items without touching the network.
    Empty,
    /// One request paged by the server (all sources, or exactly one).
    Single(SourceQuery),
    /// One request per selected source, merged and re-sliced client-side.
    Fanout {
        queries: Vec<SourceQuery>,
        offset: usize,
    },
}

impl QueryPlan {
    pub fn request_count(&self) -> usize {
        match self {
            QueryPlan::Empty => 0,
            QueryPlan::Single(_) => 1,
            QueryPlan::Fanout { queries, .. } => queries.len(),
        }
    }
}

/// Builds the request plan for the page starting at `offset` of the
/// filtered stream.
pub fn build_query_plan(filter: &FilterState, offset: usize) -> QueryPlan {
    let era = filter.era.clone().filter(|v| !v.is_empty());
    let category = filter.category.clone().filter(|v| !v.is_empty());
    let selected: Vec<Source> = Source::ALL
        .into_iter()
        .filter(|source| filter.sources.contains(source))
        .collect();

    match selected.as_slice() {
        [] => QueryPlan::Empty,
        _ if filter.all_sources_enabled() => QueryPlan::Single(SourceQuery {
            skip: offset,
            limit: PAGE_SIZE,
            era,
            category,
            source: None,
        }),
        [only] => QueryPlan::Single(SourceQuery {
            skip: offset,
            limit: PAGE_SIZE,
            era,
            category,
            source: Some(*only),
        }),
        many => {
            // The combined stream is rebuilt from the start on every page, so
            // each source must supply everything up to the end of this page.
            let queries = many
                .iter()
                .map(|source| SourceQuery {
                    skip: 0,
                    limit: offset + PAGE_SIZE,
                    era: era.clone(),
                    category: category.clone(),
                    source: Some(*source),
                })
                .collect();
            QueryPlan::Fanout { queries, offset }
        }
    }
}
