//! Catalog core: pure pagination state machine, merge and interleave helpers.
mod effect;
mod interleave;
mod merge;
mod model;
mod msg;
mod query;
mod related;
mod scroll;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use interleave::{interleave, story_slots, DisplayEntry};
pub use merge::{merge_responses, shuffle};
pub use model::{FilterState, Item, ItemKey, Source, Story, UnknownSource};
pub use msg::Msg;
pub use query::{build_query_plan, stories_url, QueryPlan, SourceQuery, PAGE_SIZE};
pub use related::{resolve_related, RelatedFilter};
pub use scroll::{ScrollMetrics, ScrollTrigger, SCROLL_THRESHOLD, SCROLL_THROTTLE};
pub use state::{AppState, Generation, LoadPhase};
pub use update::update;
pub use view_model::CatalogViewModel;
