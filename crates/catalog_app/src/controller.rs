use std::time::Duration;

use anyhow::bail;
use catalog_core::{update, AppState, CatalogViewModel, Msg};

use crate::effects::EffectRunner;

/// Owns the state and routes every message through `update`, handing the
/// resulting effects to the runner.
pub struct Controller {
    state: AppState,
    runner: EffectRunner,
    wait_timeout: Duration,
}

impl Controller {
    pub fn new(state: AppState, runner: EffectRunner, wait_timeout: Duration) -> Self {
        Self {
            state,
            runner,
            wait_timeout,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Processes engine completions until every issued request has answered.
    pub fn settle(&mut self) -> anyhow::Result<()> {
        while self.runner.outstanding() > 0 {
            let Some(msg) = self.runner.next_msg(self.wait_timeout) else {
                bail!(
                    "no response from the catalog within {:?} ({} requests pending)",
                    self.wait_timeout,
                    self.runner.outstanding()
                );
            };
            self.dispatch(msg);
        }
        Ok(())
    }

    /// Loads up to `pages` pages in total, stopping early at the end of the
    /// stream or on a failed page. The first page comes from `Start`, so a
    /// count below 1 behaves like 1.
    pub fn scroll_through(&mut self, pages: usize) -> anyhow::Result<()> {
        for _ in 1..pages {
            let view = self.state.view();
            if !view.has_more || view.error.is_some() {
                break;
            }
            self.dispatch(Msg::LoadMoreRequested);
            self.settle()?;
        }
        Ok(())
    }

    pub fn view(&self) -> CatalogViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }
}
