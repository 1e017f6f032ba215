use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_core::{Generation, QueryPlan};
use catalog_logging::{catalog_info, catalog_warn};
use tokio_util::sync::CancellationToken;

use crate::fetch::{CatalogApi, FetchSettings, ReqwestCatalogApi};
use crate::loader::load_page;
use crate::{EngineEvent, FailureKind, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchPage {
        generation: Generation,
        offset: usize,
        plan: QueryPlan,
    },
    FetchStories {
        generation: Generation,
        era: Option<String>,
        category: Option<String>,
    },
}

/// Runs catalog requests on a background runtime and reports completions.
///
/// At most one page fetch is live: a new page request cancels the previous
/// one, which then reports `FailureKind::Cancelled`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let api = ReqwestCatalogApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn CatalogApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut page_token: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                match command {
                    EngineCommand::FetchPage {
                        generation,
                        offset,
                        plan,
                    } => {
                        let token = CancellationToken::new();
                        if let Some(previous) = page_token.replace(token.clone()) {
                            previous.cancel();
                        }
                        runtime.spawn(async move {
                            let result = tokio::select! {
                                _ = token.cancelled() => Err(FetchError::new(
                                    FailureKind::Cancelled,
                                    "superseded by a newer page request",
                                )),
                                result = load_page(api.as_ref(), &plan) => result,
                            };
                            if let Err(err) = &result {
                                catalog_warn!(
                                    "page generation={} offset={} failed: {}",
                                    generation,
                                    offset,
                                    err
                                );
                            }
                            let _ = event_tx.send(EngineEvent::PageFetched {
                                generation,
                                offset,
                                result,
                            });
                        });
                    }
                    EngineCommand::FetchStories {
                        generation,
                        era,
                        category,
                    } => {
                        runtime.spawn(async move {
                            let result = api
                                .fetch_stories(era.as_deref(), category.as_deref())
                                .await;
                            if let Err(err) = &result {
                                catalog_warn!("stories generation={} failed: {}", generation, err);
                            }
                            let _ = event_tx.send(EngineEvent::StoriesFetched { generation, result });
                        });
                    }
                }
            }
            catalog_info!("engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, generation: Generation, offset: usize, plan: QueryPlan) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            generation,
            offset,
            plan,
        });
    }

    pub fn fetch_stories(
        &self,
        generation: Generation,
        era: Option<String>,
        category: Option<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::FetchStories {
            generation,
            era,
            category,
        });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
