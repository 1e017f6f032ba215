use crate::{Generation, QueryPlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
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
