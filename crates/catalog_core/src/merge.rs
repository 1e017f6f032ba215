use rand::Rng;

use crate::{Item, QueryPlan, PAGE_SIZE};

/// Combines the responses of a [`QueryPlan`] into one page.
///
/// `responses` must be in the same order as the plan's queries. A single
/// response is already paged by the server and is returned as is; fan-out
/// responses are concatenated, shuffled and re-sliced to the plan's offset.
pub fn merge_responses<R: Rng>(
    plan: &QueryPlan,
    responses: Vec<Vec<Item>>,
    rng: &mut R,
) -> Vec<Item> {
    match plan {
        QueryPlan::Empty => Vec::new(),
        QueryPlan::Single(_) => responses.into_iter().next().unwrap_or_default(),
        QueryPlan::Fanout { offset, .. } => {
            let mut combined: Vec<Item> = responses.into_iter().flatten().collect();
            shuffle(&mut combined, rng);
            page_slice(combined, *offset)
        }
    }
}

/// Fisher–Yates: walk from the last index down, swapping each slot with a
/// uniformly chosen slot at or below it.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

fn page_slice(items: Vec<Item>, offset: usize) -> Vec<Item> {
    items.into_iter().skip(offset).take(PAGE_SIZE).collect()
}
