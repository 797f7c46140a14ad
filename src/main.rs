use std::path::PathBuf;

use clap::Parser;

mod app;
mod audio;
mod config;
mod cover;
mod mpris;
mod order;
mod playlist;
mod runtime;
mod time_format;
mod title_scroll;
mod transport;
mod ui;
mod visualizer;

/// Terminal music player: drop files in, watch them play.
#[derive(Parser, Debug)]
#[command(name = "lilt", version, about)]
pub struct Args {
    /// Audio files or directories to add to the playlist
    pub files: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    runtime::run(Args::parse())
}
