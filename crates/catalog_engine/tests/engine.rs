use std::sync::Arc;
use std::time::Duration;

use catalog_core::{build_query_plan, FilterState, Item, SourceQuery, Story};
use catalog_engine::{CatalogApi, EngineEvent, EngineHandle, FailureKind, FetchError};

/// Answers item requests after a delay chosen by the requested era.
struct SlowApi;

#[async_trait::async_trait]
impl CatalogApi for SlowApi {
    async fn fetch_items(&self, query: &SourceQuery) -> Result<Vec<Item>, FetchError> {
        let delay = match query.era.as_deref() {
            Some("slow") => 2_000,
            _ => 10,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![Item {
            id: 1,
            item_url: Some("https://catalog.example/1".to_string()),
            ebay_url: None,
            source: "eBay".to_string(),
            title_en: None,
            extra: Default::default(),
        }])
    }

    async fn fetch_stories(
        &self,
        era: Option<&str>,
        _category: Option<&str>,
    ) -> Result<Vec<Story>, FetchError> {
        if era == Some("broken") {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(vec![Story {
            id: 9,
            title_en: None,
            related_search_terms: None,
            extra: Default::default(),
        }])
    }
}

fn plan_for_era(era: &str) -> catalog_core::QueryPlan {
    build_query_plan(&FilterState::default().with_era(Some(era.to_string())), 0)
}

#[test]
fn page_completion_is_reported() {
    let engine = EngineHandle::with_api(Arc::new(SlowApi)).unwrap();
    engine.fetch_page(1, 0, plan_for_era("fast"));

    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    match event {
        EngineEvent::PageFetched {
            generation,
            offset,
            result,
        } => {
            assert_eq!(generation, 1);
            assert_eq!(offset, 0);
            assert_eq!(result.unwrap().len(), 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn newer_page_cancels_the_previous_one() {
    let engine = EngineHandle::with_api(Arc::new(SlowApi)).unwrap();
    engine.fetch_page(1, 0, plan_for_era("slow"));
    engine.fetch_page(2, 0, plan_for_era("fast"));

    let mut outcomes = Vec::new();
    while outcomes.len() < 2 {
        match engine.recv_timeout(Duration::from_secs(5)).expect("event") {
            EngineEvent::PageFetched {
                generation, result, ..
            } => outcomes.push((generation, result.map(|items| items.len()))),
            EngineEvent::StoriesFetched { .. } => {}
        }
    }
    outcomes.sort_by_key(|(generation, _)| *generation);

    assert_eq!(outcomes[0].0, 1);
    assert_eq!(
        outcomes[0].1.as_ref().unwrap_err().kind,
        FailureKind::Cancelled
    );
    assert_eq!(outcomes[1], (2, Ok(1)));
}

#[test]
fn story_results_and_failures_are_reported() {
    let engine = EngineHandle::with_api(Arc::new(SlowApi)).unwrap();
    engine.fetch_stories(4, Some("United".to_string()), None);
    match engine.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::StoriesFetched { generation, result } => {
            assert_eq!(generation, 4);
            assert_eq!(result.unwrap()[0].id, 9);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.fetch_stories(5, Some("broken".to_string()), None);
    match engine.recv_timeout(Duration::from_secs(5)).expect("event") {
        EngineEvent::StoriesFetched { generation, result } => {
            assert_eq!(generation, 5);
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
