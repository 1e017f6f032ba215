use serde::Serialize;

use crate::{Item, Story};

/// Index of the first item followed by a story.
const FIRST_STORY_SLOT: usize = 3;
/// Items between consecutive stories.
const STORY_STRIDE: usize = 4;

/// One rendered row: an item card or an interleaved story.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum DisplayEntry {
    Item(Item),
    Story(Story),
}

/// Item indices that are followed by a story, for a sequence of `item_count`.
pub fn story_slots(item_count: usize) -> impl Iterator<Item = usize> {
    (FIRST_STORY_SLOT..item_count).step_by(STORY_STRIDE)
}

/// Produces the display sequence.
///
/// Items keep their order; stories cycle through `stories` when there are
/// more slots than stories. With no items the stories are shown alone.
pub fn interleave(items: &[Item], stories: &[Story]) -> Vec<DisplayEntry> {
    if items.is_empty() {
        return stories.iter().cloned().map(DisplayEntry::Story).collect();
    }
    if stories.is_empty() {
        return items.iter().cloned().map(DisplayEntry::Item).collect();
    }

    let mut slots = story_slots(items.len()).peekable();
    let mut next_story = 0usize;
    let mut entries = Vec::with_capacity(items.len() + items.len() / STORY_STRIDE + 1);
    for (index, item) in items.iter().enumerate() {
        entries.push(DisplayEntry::Item(item.clone()));
        if slots.next_if_eq(&index).is_some() {
            entries.push(DisplayEntry::Story(
                stories[next_story % stories.len()].clone(),
            ));
            next_story += 1;
        }
    }
    entries
}
