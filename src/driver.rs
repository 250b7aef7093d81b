//! Runs the per-link pipeline over a whole playlist.
//!
//! Each entry goes metadata, directory, download, split, cleanup. An existing
//! directory means the entry was processed before and it is skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::{Config, FailurePolicy};
use crate::download;
use crate::error::Error;
use crate::metadata;
use crate::naming;
use crate::playlist;
use crate::split::{self, SplitOptions, SplitReport};

#[derive(Debug)]
pub struct EntryFailure {
    pub link: String,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub completed: usize,
    pub skipped: usize,
    pub tracks_written: usize,
    pub tracks_failed: usize,
    pub failures: Vec<EntryFailure>,
}

impl Summary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.tracks_failed == 0
    }

    pub fn log(&self) {
        info!(
            "Done: {} processed, {} skipped, {} failed, {} track(s) written",
            self.completed,
            self.skipped,
            self.failures.len(),
            self.tracks_written
        );
        if self.tracks_failed > 0 {
            warn!("{} track(s) could not be written", self.tracks_failed);
        }
        for failure in &self.failures {
            error!("{}: {}", failure.link, failure.error);
        }
    }
}

enum Outcome {
    Skipped(PathBuf),
    Completed(SplitReport),
}

pub fn run(config: &Config) -> anyhow::Result<Summary> {
    let entries = playlist::read_entries(&config.playlist)?;
    info!(
        "{} link(s) in {}",
        entries.len(),
        config.playlist.display()
    );

    let options = SplitOptions {
        format: config.audio_format,
        naming: config.naming,
        policy: config.policy,
        collision_suffix: config.collision_suffix.clone(),
        max_collision_attempts: config.max_collision_attempts,
    };

    let mut summary = Summary::default();
    for link in &entries {
        match process_entry(config, &options, link) {
            Ok(Outcome::Skipped(dir)) => {
                info!("Folder {} exists, skipping...", dir.display());
                summary.skipped += 1;
            }
            Ok(Outcome::Completed(report)) => {
                summary.completed += 1;
                summary.tracks_written += report.written.len();
                summary.tracks_failed += report.failed.len();
            }
            Err(err) if config.policy == FailurePolicy::AbortBatch => {
                return Err(anyhow::Error::new(err).context(format!("failed to process {}", link)));
            }
            Err(err) => {
                error!("Giving up on {}: {}", link, err);
                summary.failures.push(EntryFailure {
                    link: link.clone(),
                    error: err,
                });
            }
        }
    }
    Ok(summary)
}

fn process_entry(config: &Config, options: &SplitOptions, link: &str) -> Result<Outcome, Error> {
    let metadata = metadata::fetch(&config.tools, link)?;
    let stem = config
        .output_dir
        .join(naming::file_stem(&metadata.title, config.naming));

    match fs::create_dir(&stem) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(Outcome::Skipped(stem)),
        Err(err) => return Err(Error::io("failed to create directory", &stem, err)),
    }

    let split = download::download_audio(&config.tools, link, &stem, config.audio_format)
        .and_then(|audio| {
            split::split_chapters(&config.tools, &audio, &stem, &metadata, options)
                .map(|report| (audio, report))
        });
    let (audio, report) = match split {
        Ok(done) => done,
        Err(err) => {
            discard_if_empty(&stem);
            return Err(err);
        }
    };

    if metadata.chapters.is_empty() {
        warn!(
            "{} has no chapters, nothing to split; keeping {} and retrying the link next run",
            metadata.title,
            audio.display()
        );
        discard_if_empty(&stem);
    } else if !report.failed.is_empty() {
        warn!(
            "{} of {} track(s) failed, keeping {}",
            report.failed.len(),
            metadata.chapters.len(),
            audio.display()
        );
    } else if !config.keep_audio {
        remove_intermediate(&audio);
    }

    Ok(Outcome::Completed(report))
}

/// Lets a later run retry an entry that failed before writing any track.
fn discard_if_empty(dir: &Path) {
    match fs::remove_dir(dir) {
        Ok(()) => {}
        Err(err) => warn!("Leaving {} in place: {}", dir.display(), err),
    }
}

fn remove_intermediate(audio: &Path) {
    if let Err(err) = fs::remove_file(audio) {
        warn!("Could not remove {}: {}", audio.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_clean_without_failures() {
        let mut summary = Summary {
            completed: 2,
            skipped: 1,
            tracks_written: 5,
            ..Summary::default()
        };
        assert!(summary.is_clean());

        summary.tracks_failed = 1;
        assert!(!summary.is_clean());

        summary.tracks_failed = 0;
        summary.failures.push(EntryFailure {
            link: "https://example.com/v".to_string(),
            error: Error::EmptyMetadata("https://example.com/v".to_string()),
        });
        assert!(!summary.is_clean());
    }

    #[test]
    fn discard_keeps_directories_with_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        let partial = dir.path().join("partial");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&partial).unwrap();
        fs::write(partial.join("Intro.mp3"), b"track").unwrap();

        discard_if_empty(&empty);
        discard_if_empty(&partial);

        assert!(!empty.exists());
        assert!(partial.join("Intro.mp3").exists());
    }
}
