use std::collections::HashSet;

use crate::view_model::CatalogViewModel;
use crate::{
    build_query_plan, interleave, Effect, FilterState, Item, ItemKey, QueryPlan, ScrollMetrics,
    ScrollTrigger, Story, PAGE_SIZE,
};

/// Monotonic counter identifying which filter a fetch belongs to.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    /// Last page fetch failed; the cursor is unchanged so a retry reloads it.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    filter: FilterState,
    items: Vec<Item>,
    seen: HashSet<ItemKey>,
    stories: Vec<Story>,
    story_error: Option<String>,
    cursor: usize,
    has_more: bool,
    phase: LoadPhase,
    generation: Generation,
    story_generation: Generation,
    scroll: ScrollTrigger,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_filter(FilterState::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterState) -> Self {
        Self {
            filter: filter.normalized(),
            items: Vec::new(),
            seen: HashSet::new(),
            stories: Vec::new(),
            story_error: None,
            cursor: 0,
            has_more: true,
            phase: LoadPhase::Idle,
            generation: 0,
            story_generation: 0,
            scroll: ScrollTrigger::default(),
            dirty: false,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn view(&self) -> CatalogViewModel {
        CatalogViewModel {
            filter: self.filter.clone(),
            entries: interleave(&self.items, &self.stories),
            item_count: self.items.len(),
            story_count: self.stories.len(),
            is_loading: self.is_loading(),
            has_more: self.has_more,
            error: match &self.phase {
                LoadPhase::Failed(message) => Some(message.clone()),
                _ => None,
            },
            story_error: self.story_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Installs `filter`, invalidating everything derived from the old one.
    ///
    /// Returns the effects needed to repopulate the sequence. `reload_stories`
    /// forces a story fetch even when era and category are unchanged.
    pub(crate) fn reset_to(&mut self, filter: FilterState, reload_stories: bool) -> Vec<Effect> {
        let filter = filter.normalized();
        let stories_stale = reload_stories || filter.story_scope_differs(&self.filter);

        self.filter = filter;
        self.generation += 1;
        self.cursor = 0;
        self.items.clear();
        self.seen.clear();
        self.has_more = true;
        self.scroll.reset();
        self.mark_dirty();

        let mut effects = Vec::with_capacity(2);
        match build_query_plan(&self.filter, 0) {
            QueryPlan::Empty => {
                self.has_more = false;
                self.phase = LoadPhase::Idle;
            }
            plan => {
                self.phase = LoadPhase::Loading;
                effects.push(Effect::FetchPage {
                    generation: self.generation,
                    offset: 0,
                    plan,
                });
            }
        }

        if stories_stale {
            self.story_generation += 1;
            effects.push(Effect::FetchStories {
                generation: self.story_generation,
                era: self.filter.era.clone(),
                category: self.filter.category.clone(),
            });
        }
        effects
    }

    /// Requests the page at the cursor unless a fetch is in flight or the
    /// stream is exhausted.
    pub(crate) fn request_next_page(&mut self) -> Option<Effect> {
        if self.phase == LoadPhase::Loading || !self.has_more {
            return None;
        }
        match build_query_plan(&self.filter, self.cursor) {
            QueryPlan::Empty => {
                self.has_more = false;
                self.mark_dirty();
                None
            }
            plan => {
                self.phase = LoadPhase::Loading;
                self.mark_dirty();
                Some(Effect::FetchPage {
                    generation: self.generation,
                    offset: self.cursor,
                    plan,
                })
            }
        }
    }

    /// Feeds a scroll event to the trigger. Events that arrive while a fetch
    /// is in flight or the stream is exhausted never open a throttle window.
    pub(crate) fn observe_scroll(&mut self, metrics: ScrollMetrics, at: std::time::Instant) -> bool {
        if self.phase == LoadPhase::Loading || !self.has_more {
            return false;
        }
        self.scroll.observe(metrics, at)
    }

    /// Applies a completed page. Responses from an older filter are ignored.
    pub(crate) fn apply_page(
        &mut self,
        generation: Generation,
        offset: usize,
        result: Result<Vec<Item>, String>,
    ) {
        if generation != self.generation || self.phase != LoadPhase::Loading {
            return;
        }
        match result {
            Ok(page) => {
                let fetched = page.len();
                if offset == 0 {
                    self.items.clear();
                    self.seen.clear();
                }
                for item in page {
                    if self.seen.insert(item.key()) {
                        self.items.push(item);
                    }
                }
                if fetched < PAGE_SIZE {
                    self.has_more = false;
                } else {
                    self.cursor = offset + PAGE_SIZE;
                }
                self.phase = LoadPhase::Idle;
            }
            Err(message) => {
                self.phase = LoadPhase::Failed(message);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_stories(
        &mut self,
        generation: Generation,
        result: Result<Vec<Story>, String>,
    ) {
        if generation != self.story_generation {
            return;
        }
        match result {
            Ok(stories) => {
                self.stories = stories;
                self.story_error = None;
            }
            Err(message) => {
                self.stories.clear();
                self.story_error = Some(message);
            }
        }
        self.mark_dirty();
    }
}
