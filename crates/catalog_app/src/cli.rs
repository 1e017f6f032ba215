use std::path::PathBuf;

use catalog_core::{FilterState, Source};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Browse the memorabilia catalog from the terminal")]
pub struct Cli {
    /// RON config file; missing file means defaults.
    #[arg(long, default_value = "catalog.ron")]
    pub config: PathBuf,

    /// Override the API base URL from the config file.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Career era filter (Sporting, United, Madrid, Juventus, Portugal, Al-Nassr).
    #[arg(long)]
    pub era: Option<String>,

    /// Item category filter (jerseys, boots, memorabilia, signed_items, cards, ...).
    #[arg(long)]
    pub category: Option<String>,

    /// Restrict to a source; repeat for several. Default is every source.
    #[arg(long = "source")]
    pub sources: Vec<Source>,

    /// Deselect every source (shows stories only).
    #[arg(long, conflicts_with = "sources")]
    pub no_sources: bool,

    /// Number of pages to load, simulating infinite scroll. At least 1.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub pages: usize,

    /// Story search terms to jump to related items after the first page.
    #[arg(long)]
    pub related: Option<String>,

    /// Print the display sequence as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write logs to ./catalog.log.
    #[arg(long)]
    pub log_file: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn filter(&self) -> FilterState {
        let sources: Vec<Source> = if self.no_sources {
            Vec::new()
        } else if self.sources.is_empty() {
            Source::ALL.to_vec()
        } else {
            self.sources.clone()
        };
        FilterState::new(self.era.clone(), self.category.clone(), sources)
    }
}
