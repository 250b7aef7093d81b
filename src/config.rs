use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{Cli, OutputType};
use crate::naming::NamingStyle;
use crate::tools::Toolchain;

/// How far a failure reaches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the whole run at the first error
    #[default]
    AbortBatch,
    /// Give up on the failing video and continue with the next link
    AbortEntry,
    /// Skip a track that cannot be written; other errors give up on the video
    SkipChapter,
}

/// Everything the driver needs, resolved once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub playlist: PathBuf,
    pub output_dir: PathBuf,
    pub tools: Toolchain,
    pub audio_format: OutputType,
    pub naming: NamingStyle,
    pub policy: FailurePolicy,
    pub collision_suffix: String,
    pub max_collision_attempts: u32,
    pub keep_audio: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            playlist: cli.playlist,
            output_dir: cli.output_dir,
            tools: Toolchain {
                yt_dlp: cli.yt_dlp,
                ffmpeg: cli.ffmpeg,
            },
            audio_format: cli.audio_format,
            naming: cli.naming,
            policy: cli.on_error,
            collision_suffix: cli.collision_suffix,
            max_collision_attempts: cli.max_collision_attempts,
            keep_audio: cli.keep_audio,
        }
    }
}
