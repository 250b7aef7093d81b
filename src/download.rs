use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::cli::OutputType;
use crate::error::Error;
use crate::tools::Toolchain;

/// Downloads the best available audio for `link` into `<stem>.<ext>`.
///
/// `stem` is a path without extension; yt-dlp picks the extension after
/// transcoding, so the output template ends in `%(ext)s`.
pub fn download_audio(
    tools: &Toolchain,
    link: &str,
    stem: &Path,
    format: OutputType,
) -> Result<PathBuf, Error> {
    let audio = audio_path(stem, format);
    info!("Downloading: {}", audio.display());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("downloading {}", link));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let template = output_template(stem);
    let result = tools.yt_dlp([
        "-f",
        "ba/b",
        "-x",
        "--audio-format",
        format.extension(),
        "--no-playlist",
        "-o",
        template.as_str(),
        "--",
        link,
    ]);
    spinner.finish_and_clear();
    result?;

    if !audio.is_file() {
        return Err(Error::MissingOutput {
            tool: "yt-dlp".to_string(),
            path: audio,
        });
    }
    Ok(audio)
}

pub fn audio_path(stem: &Path, format: OutputType) -> PathBuf {
    let mut file = stem.as_os_str().to_owned();
    file.push(".");
    file.push(format.extension());
    PathBuf::from(file)
}

/// `%` starts a yt-dlp template field, so literal ones are doubled.
fn output_template(stem: &Path) -> String {
    format!("{}.%(ext)s", stem.to_string_lossy().replace('%', "%%"))
}
