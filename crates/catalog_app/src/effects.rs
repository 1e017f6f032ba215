use std::time::Duration;

use catalog_core::{Effect, Msg};
use catalog_engine::{EngineEvent, EngineHandle};
use catalog_logging::{catalog_debug, catalog_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    outstanding: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            outstanding: 0,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    generation,
                    offset,
                    plan,
                } => {
                    catalog_info!(
                        "FetchPage generation={} offset={} requests={}",
                        generation,
                        offset,
                        plan.request_count()
                    );
                    self.engine.fetch_page(generation, offset, plan);
                }
                Effect::FetchStories {
                    generation,
                    era,
                    category,
                } => {
                    catalog_info!(
                        "FetchStories generation={} era={:?} category={:?}",
                        generation,
                        era,
                        category
                    );
                    self.engine.fetch_stories(generation, era, category);
                }
            }
            self.outstanding += 1;
        }
    }

    /// Number of issued requests whose completion has not been seen yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(map_event(event))
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            generation,
            offset,
            result,
        } => {
            catalog_debug!(
                "PageFetched generation={} offset={} ok={}",
                generation,
                offset,
                result.is_ok()
            );
            Msg::PageLoaded {
                generation,
                offset,
                result: result.map_err(|err| err.to_string()),
            }
        }
        EngineEvent::StoriesFetched { generation, result } => Msg::StoriesLoaded {
            generation,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
