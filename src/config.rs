use std::path::PathBuf;

use clap::Parser;

use crate::data::fetcher::{FeedSource, FileFeed, HttpFeed, DEFAULT_FEED_URL};

/// Command-line configuration.  Filter settings are never persisted.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// GeoJSON summary feed to download on every apply.
    #[arg(long, env = "QUAKEVIEW_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Read a saved feed from disk instead of downloading it.
    #[arg(long, value_name = "PATH")]
    pub feed_file: Option<PathBuf>,

    /// Ask for filter bounds on the terminal before opening the viewer.
    #[arg(short, long)]
    pub prompt: bool,

    /// Fetch and plot as soon as the window opens.
    #[arg(long)]
    pub apply_on_start: bool,
}

impl Config {
    pub fn feed_source(&self) -> Box<dyn FeedSource> {
        match &self.feed_file {
            Some(path) => Box::new(FileFeed::new(path.clone())),
            None => Box::new(HttpFeed::new(self.feed_url.clone())),
        }
    }

    /// Prompted runs plot straight away, like the sliders' Apply button.
    pub fn should_apply_on_start(&self) -> bool {
        self.apply_on_start || self.prompt
    }
}
