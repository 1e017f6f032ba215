use catalog_core::{merge_responses, Item, QueryPlan, SourceQuery};
use catalog_logging::{catalog_debug, catalog_warn};
use futures_util::future::join_all;

use crate::{CatalogApi, FetchError};

/// Issues every request of `plan` concurrently and waits for all of them.
///
/// Responses come back in query order. One failed request fails the whole
/// page; partial results are never returned.
pub async fn fetch_responses(
    api: &dyn CatalogApi,
    plan: &QueryPlan,
) -> Result<Vec<Vec<Item>>, FetchError> {
    let queries: Vec<&SourceQuery> = match plan {
        QueryPlan::Empty => return Ok(Vec::new()),
        QueryPlan::Single(query) => vec![query],
        QueryPlan::Fanout { queries, .. } => queries.iter().collect(),
    };

    let settled = join_all(queries.iter().map(|query| api.fetch_items(query))).await;

    let mut responses = Vec::with_capacity(settled.len());
    for (query, result) in queries.iter().zip(settled) {
        match result {
            Ok(items) => {
                catalog_debug!(
                    "source={} skip={} limit={} returned {} items",
                    query.source.map_or("all", |s| s.as_str()),
                    query.skip,
                    query.limit,
                    items.len()
                );
                responses.push(items);
            }
            Err(err) => {
                catalog_warn!(
                    "source={} request failed: {}",
                    query.source.map_or("all", |s| s.as_str()),
                    err
                );
                return Err(err);
            }
        }
    }
    Ok(responses)
}

/// Fetches and merges one logical page.
pub async fn load_page(api: &dyn CatalogApi, plan: &QueryPlan) -> Result<Vec<Item>, FetchError> {
    let responses = fetch_responses(api, plan).await?;
    let mut rng = rand::rng();
    Ok(merge_responses(plan, responses, &mut rng))
}
