use std::collections::BTreeSet;

use catalog_core::{
    build_query_plan, merge_responses, shuffle, FilterState, Item, QueryPlan, Source, PAGE_SIZE,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn item(id: i64, source: Source) -> Item {
    Item {
        id,
        item_url: Some(format!("https://{}.example/{id}", source.as_str().to_lowercase())),
        ebay_url: None,
        source: source.as_str().to_string(),
        title_en: None,
        extra: Default::default(),
    }
}

fn items(range: std::ops::Range<i64>, source: Source) -> Vec<Item> {
    range.map(|id| item(id, source)).collect()
}

fn ids(page: &[Item]) -> Vec<i64> {
    page.iter().map(|item| item.id).collect()
}

fn two_source_plan(offset: usize) -> QueryPlan {
    build_query_plan(
        &FilterState::new(None, None, [Source::Ebay, Source::AliExpress]),
        offset,
    )
}

#[test]
fn single_source_keeps_server_order() {
    let plan = build_query_plan(&FilterState::default(), 0);
    let response = items(0..10, Source::Ebay);
    let mut rng = StdRng::seed_from_u64(7);

    let merged = merge_responses(&plan, vec![response.clone()], &mut rng);
    assert_eq!(merged, response);
}

#[test]
fn fanout_is_permutation_of_concatenation() {
    let plan = two_source_plan(0);
    let ebay = items(0..20, Source::Ebay);
    let ali = items(100..110, Source::AliExpress);
    let mut rng = StdRng::seed_from_u64(42);

    let merged = merge_responses(&plan, vec![ebay.clone(), ali.clone()], &mut rng);

    assert_eq!(merged.len(), 30);
    let merged_ids: BTreeSet<_> = ids(&merged).into_iter().collect();
    let expected: BTreeSet<_> = ids(&ebay).into_iter().chain(ids(&ali)).collect();
    assert_eq!(merged_ids, expected);
}

#[test]
fn fanout_reslices_to_page_size() {
    let plan = two_source_plan(0);
    let mut rng = StdRng::seed_from_u64(3);

    let merged = merge_responses(
        &plan,
        vec![items(0..48, Source::Ebay), items(100..148, Source::AliExpress)],
        &mut rng,
    );
    assert_eq!(merged.len(), PAGE_SIZE);
}

#[test]
fn fanout_slices_from_logical_offset() {
    let plan = two_source_plan(48);
    let mut rng = StdRng::seed_from_u64(11);

    // Each source supplies everything up to the end of the second page.
    let merged = merge_responses(
        &plan,
        vec![items(0..60, Source::Ebay), items(100..110, Source::AliExpress)],
        &mut rng,
    );
    assert_eq!(merged.len(), 70 - 48);

    let past_end = merge_responses(
        &two_source_plan(96),
        vec![items(0..30, Source::Ebay), items(100..130, Source::AliExpress)],
        &mut rng,
    );
    assert!(past_end.is_empty());
}

#[test]
fn fanout_mixes_sources_fairly_over_many_runs() {
    let plan = two_source_plan(0);
    let ebay = items(0..40, Source::Ebay);
    let ali = items(100..140, Source::AliExpress);
    let mut rng = StdRng::seed_from_u64(2024);

    let mut observed = BTreeSet::new();
    let mut first_slot_from_ebay = 0usize;
    for _ in 0..1000 {
        let merged = merge_responses(&plan, vec![ebay.clone(), ali.clone()], &mut rng);
        assert_eq!(merged.len(), PAGE_SIZE);
        if merged[0].source == "eBay" {
            first_slot_from_ebay += 1;
        }
        observed.extend(ids(&merged));
    }

    let expected: BTreeSet<_> = ids(&ebay).into_iter().chain(ids(&ali)).collect();
    assert_eq!(observed, expected);
    // Both sources are equally likely to lead the page.
    assert!((350..=650).contains(&first_slot_from_ebay));
}

#[test]
fn empty_plan_merges_to_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(merge_responses(&QueryPlan::Empty, Vec::new(), &mut rng).is_empty());
}

#[test]
fn shuffle_keeps_every_element() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut values: Vec<u32> = (0..100).collect();
    shuffle(&mut values, &mut rng);

    assert_ne!(values, (0..100).collect::<Vec<_>>());
    values.sort_unstable();
    assert_eq!(values, (0..100).collect::<Vec<_>>());

    let mut single = vec![1];
    shuffle(&mut single, &mut rng);
    assert_eq!(single, vec![1]);
    let mut empty: Vec<u32> = Vec::new();
    shuffle(&mut empty, &mut rng);
    assert!(empty.is_empty());
}
