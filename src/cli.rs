use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::FailurePolicy;
use crate::naming::NamingStyle;

/// Download the audio of every link in a playlist file and split it into one
/// track per chapter.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Text file with one video link per line
    #[clap(short, long)]
    pub playlist: PathBuf,

    /// Directory that receives the downloads and the per-video track folders
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Audio format to extract and to write tracks in
    #[clap(long, value_enum, default_value_t = OutputType::Mp3)]
    pub audio_format: OutputType,

    /// How folder and track names are derived from titles
    #[clap(long, value_enum, default_value_t = NamingStyle::Verbatim)]
    pub naming: NamingStyle,

    /// What a failure aborts
    #[clap(long, value_enum, default_value_t = FailurePolicy::AbortBatch)]
    pub on_error: FailurePolicy,

    /// Appended to a track name when a file with that name already exists
    #[clap(long, default_value = " copy")]
    pub collision_suffix: String,

    /// How many names to try for one track before giving up
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_collision_attempts: u32,

    /// Keep the full-length audio file after splitting
    #[clap(long)]
    pub keep_audio: bool,

    /// yt-dlp executable
    #[clap(long, default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// ffmpeg executable
    #[clap(long, default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
}

/// Output file type enum
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputType {
    Mp3,
    Wav,
    Flac,
}

impl OutputType {
    /// Value for `yt-dlp --audio-format`, which is also the file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputType::Mp3 => "mp3",
            OutputType::Wav => "wav",
            OutputType::Flac => "flac",
        }
    }
}
