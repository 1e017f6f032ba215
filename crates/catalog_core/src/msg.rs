use std::time::Instant;

use crate::{FilterState, Generation, Item, ScrollMetrics, Source, Story};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Host finished setting up; load the first page and the stories.
    Start,
    /// Replace the whole filter at once.
    FilterChanged(FilterState),
    /// User picked an era (`None` = all eras).
    EraSelected(Option<String>),
    /// User picked a category (`None` = all categories).
    CategorySelected(Option<String>),
    /// User ticked or unticked a source checkbox.
    SourceToggled(Source),
    /// A story asked for related items using its search terms.
    FindRelated(String),
    /// Infinite-scroll intent: load the page at the cursor.
    LoadMoreRequested,
    /// Raw viewport geometry from a scroll event.
    Scrolled { metrics: ScrollMetrics, at: Instant },
    /// Engine finished fetching and merging one page.
    PageLoaded {
        generation: Generation,
        offset: usize,
        result: Result<Vec<Item>, String>,
    },
    /// Engine finished fetching the story list.
    StoriesLoaded {
        generation: Generation,
        result: Result<Vec<Story>, String>,
    },
    /// Host event the catalog ignores, such as a resize that does not scroll.
    NoOp,
}
