mod cli;
mod config;
mod download;
mod driver;
mod error;
mod metadata;
mod models;
mod naming;
mod playlist;
mod split;
mod timestamp;
mod tools;

use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;

use crate::config::Config;

// yt-dlp --dump-json --no-playlist -- <link>
// yt-dlp -f ba/b -x --audio-format mp3 --no-playlist -o '<title>.%(ext)s' -- <link>
// ffmpeg -hide_banner -nostdin -n -i <title>.mp3 -ss 00:00:00 -to 00:01:00 -c copy '<title>/<chapter>.mp3'

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from(cli::Cli::parse());
    config.tools.ensure_installed()?;

    let summary = driver::run(&config)?;
    summary.log();

    if !summary.is_clean() {
        bail!(
            "{} link(s) and {} track(s) failed",
            summary.failures.len(),
            summary.tracks_failed
        );
    }
    Ok(())
}
