use crate::{resolve_related, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Start => {
            let filter = state.filter().clone();
            state.reset_to(filter, true)
        }
        Msg::FilterChanged(filter) => change_filter(&mut state, filter),
        Msg::EraSelected(era) => {
            let filter = state.filter().clone().with_era(era);
            change_filter(&mut state, filter)
        }
        Msg::CategorySelected(category) => {
            let filter = state.filter().clone().with_category(category);
            change_filter(&mut state, filter)
        }
        Msg::SourceToggled(source) => {
            let filter = state.filter().clone().toggle_source(source);
            change_filter(&mut state, filter)
        }
        Msg::FindRelated(terms) => {
            let related = resolve_related(&terms);
            if related.is_empty() {
                return (state, Vec::new());
            }
            let current = state.filter().clone();
            let era = related.era.or_else(|| current.era.clone());
            let category = related.category.or_else(|| current.category.clone());
            let filter = current.with_era(era).with_category(category);
            change_filter(&mut state, filter)
        }
        Msg::LoadMoreRequested => state.request_next_page().into_iter().collect(),
        Msg::Scrolled { metrics, at } => {
            if state.observe_scroll(metrics, at) {
                state.request_next_page().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded {
            generation,
            offset,
            result,
        } => {
            state.apply_page(generation, offset, result);
            Vec::new()
        }
        Msg::StoriesLoaded { generation, result } => {
            state.apply_stories(generation, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn change_filter(state: &mut AppState, filter: crate::FilterState) -> Vec<Effect> {
    if *state.filter() == filter.clone().normalized() {
        return Vec::new();
    }
    state.reset_to(filter, false)
}
