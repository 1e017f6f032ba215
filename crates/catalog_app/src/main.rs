mod cli;
mod config;
mod controller;
mod effects;
mod logging;
mod render;

use std::io;

use anyhow::Context;
use catalog_core::{AppState, Msg};
use catalog_engine::EngineHandle;
use catalog_logging::catalog_info;
use clap::Parser;
use log::LevelFilter;

use cli::Cli;
use controller::Controller;
use effects::EffectRunner;
use logging::LogDestination;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(destination, level);

    let mut config = config::load_config(&cli.config);
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    let engine =
        EngineHandle::new(config.fetch_settings()?).context("failed to start catalog engine")?;

    let filter = cli.filter();
    catalog_info!(
        "Browsing era={:?} category={:?} sources={:?}",
        filter.era,
        filter.category,
        filter.sources
    );
    let mut controller = Controller::new(
        AppState::with_filter(filter),
        EffectRunner::new(engine),
        config.wait_timeout(),
    );

    controller.dispatch(Msg::Start);
    controller.settle()?;

    if let Some(terms) = cli.related.clone() {
        controller.dispatch(Msg::FindRelated(terms));
        controller.settle()?;
    }

    controller.scroll_through(cli.pages)?;

    if controller.consume_dirty() {
        let view = controller.view();
        let mut stdout = io::stdout().lock();
        if cli.json {
            render::render_json(&view, &mut stdout)?;
        } else {
            render::render_text(&view, &mut stdout)?;
        }
    }
    Ok(())
}
