//! Catalog engine: HTTP access to the item/story APIs and effect execution.
mod engine;
mod fetch;
mod loader;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{CatalogApi, FetchSettings, ReqwestCatalogApi};
pub use loader::{fetch_responses, load_page};
pub use types::{EngineEvent, FailureKind, FetchError};
