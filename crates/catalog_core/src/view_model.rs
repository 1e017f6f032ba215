use crate::{DisplayEntry, FilterState};

/// Everything a renderer needs, recomputed from state on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogViewModel {
    pub filter: FilterState,
    pub entries: Vec<DisplayEntry>,
    pub item_count: usize,
    pub story_count: usize,
    pub is_loading: bool,
    pub has_more: bool,
    /// Set when the last page fetch failed, distinct from reaching the end.
    pub error: Option<String>,
    pub story_error: Option<String>,
    pub dirty: bool,
}
