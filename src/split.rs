//! Cutting a downloaded file into one track per chapter with ffmpeg stream copy.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::cli::OutputType;
use crate::config::FailurePolicy;
use crate::error::Error;
use crate::metadata::VideoMetadata;
use crate::naming::{self, NamingStyle};
use crate::timestamp::Timestamp;
use crate::tools::Toolchain;

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub format: OutputType,
    pub naming: NamingStyle,
    pub policy: FailurePolicy,
    pub collision_suffix: String,
    pub max_collision_attempts: u32,
}

#[derive(Debug, Default)]
pub struct SplitReport {
    pub written: Vec<PathBuf>,
    /// Chapter titles skipped under [`FailurePolicy::SkipChapter`].
    pub failed: Vec<String>,
}

/// Writes one file per chapter of `metadata` into `track_dir`.
pub fn split_chapters(
    tools: &Toolchain,
    audio: &Path,
    track_dir: &Path,
    metadata: &VideoMetadata,
    options: &SplitOptions,
) -> Result<SplitReport, Error> {
    let bar = ProgressBar::new(metadata.chapters.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    split_with_progress(tools, audio, track_dir, metadata, options, &bar)
}

/// The ffmpeg runs happen outside `suspend` so the bar stays on screen while a
/// track is being cut.
fn split_with_progress(
    tools: &Toolchain,
    audio: &Path,
    track_dir: &Path,
    metadata: &VideoMetadata,
    options: &SplitOptions,
    bar: &ProgressBar,
) -> Result<SplitReport, Error> {
    let boundaries = metadata.boundaries();
    let titles = metadata.track_titles();
    let mut report = SplitReport::default();

    for (i, title) in titles.iter().enumerate() {
        let (start, end) = (boundaries[i], boundaries[i + 1]);
        bar.set_message(title.to_string());
        bar.suspend(|| info!("Saving: {}-{} {}", start, end, title));
        match write_track(tools, audio, track_dir, title, start, end, options) {
            Ok(path) => report.written.push(path),
            Err(err) if options.policy == FailurePolicy::SkipChapter => {
                bar.suspend(|| warn!("Skipping chapter {:?}: {}", title, err));
                report.failed.push(title.to_string());
            }
            Err(err) => {
                bar.abandon();
                return Err(err);
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(report)
}

/// Trims one chapter, appending the collision suffix while the name is taken.
fn write_track(
    tools: &Toolchain,
    audio: &Path,
    track_dir: &Path,
    title: &str,
    start: Timestamp,
    end: Timestamp,
    options: &SplitOptions,
) -> Result<PathBuf, Error> {
    for attempt in 1..=options.max_collision_attempts {
        let name = track_stem(title, attempt - 1, options);
        let output = track_dir.join(format!("{}.{}", name, options.format.extension()));
        match trim(tools, audio, start, end, &output) {
            Ok(()) => return Ok(output),
            Err(err) if is_collision(&err) => {
                debug!(
                    "{} exists (attempt {}/{})",
                    output.display(),
                    attempt,
                    options.max_collision_attempts
                );
            }
            Err(err) => return Err(err),
        }
    }
    Err(Error::CollisionRetriesExhausted {
        track: title.to_string(),
        attempts: options.max_collision_attempts,
    })
}

/// File stem for `title` after `collisions` earlier names were taken.
///
/// The suffix goes through the naming style too, so `snake-case` stays snake case.
fn track_stem(title: &str, collisions: u32, options: &SplitOptions) -> String {
    let mut name = title.to_string();
    for _ in 0..collisions {
        name.push_str(&options.collision_suffix);
    }
    naming::file_stem(&name, options.naming)
}

fn trim(
    tools: &Toolchain,
    audio: &Path,
    start: Timestamp,
    end: Timestamp,
    output: &Path,
) -> Result<(), Error> {
    let (start, end) = (start.to_string(), end.to_string());
    tools.ffmpeg([
        OsStr::new("-hide_banner"),
        OsStr::new("-nostdin"),
        // never overwrite, so an existing file surfaces as a collision
        OsStr::new("-n"),
        OsStr::new("-i"),
        audio.as_os_str(),
        OsStr::new("-ss"),
        OsStr::new(&start),
        OsStr::new("-to"),
        OsStr::new(&end),
        OsStr::new("-c"),
        OsStr::new("copy"),
        output.as_os_str(),
    ])?;
    Ok(())
}

/// ffmpeg exits with status 1 and says so when `-n` refuses to overwrite.
fn is_collision(err: &Error) -> bool {
    matches!(
        err,
        Error::ToolFailed { code: Some(1), stderr, .. } if stderr.contains("already exists")
    )
}
