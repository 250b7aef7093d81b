//! Fetching title, duration and chapters for a link through `yt-dlp --dump-json`.

use log::{debug, info};

use crate::error::Error;
use crate::models::VideoInfo;
use crate::timestamp::{self, Timestamp};
use crate::tools::Toolchain;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    /// Offset from the start of the media in whole seconds.
    pub start: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    /// Total length in whole seconds.
    pub duration: u64,
    pub chapters: Vec<Chapter>,
}

impl VideoMetadata {
    pub fn from_info(info: VideoInfo) -> Result<Self, Error> {
        let title = info.title.trim().to_string();

        let duration = match (info.duration, info.duration_string.as_deref()) {
            (Some(seconds), _) => whole_seconds(seconds),
            (None, Some(text)) => timestamp::parse_seconds(text)?,
            (None, None) => return Err(Error::MissingDuration(title)),
        };

        let chapters = info
            .chapters
            .unwrap_or_default()
            .into_iter()
            .map(|chapter| Chapter {
                title: chapter.title,
                start: whole_seconds(chapter.start_time),
            })
            .collect();

        Ok(VideoMetadata {
            title,
            duration,
            chapters,
        })
    }

    /// The last trim point: one second before the reported duration.
    pub fn end_boundary(&self) -> Timestamp {
        Timestamp::from_seconds(self.duration).one_second_earlier()
    }

    /// Chapter starts followed by [`Self::end_boundary`].
    ///
    /// Always one element longer than [`Self::track_titles`]; consecutive pairs
    /// are the trim range of each chapter.
    pub fn boundaries(&self) -> Vec<Timestamp> {
        self.chapters
            .iter()
            .map(|chapter| Timestamp::from_seconds(chapter.start))
            .chain(std::iter::once(self.end_boundary()))
            .collect()
    }

    pub fn track_titles(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.title.as_str()).collect()
    }
}

/// Asks yt-dlp for the metadata of a single video.
pub fn fetch(tools: &Toolchain, link: &str) -> Result<VideoMetadata, Error> {
    info!("Fetching metadata: {}", link);
    let output = tools.yt_dlp(["--dump-json", "--no-playlist", "--", link])?;
    let info = parse_dump(&output.stdout).map_err(|err| match err {
        Error::EmptyMetadata(_) => Error::EmptyMetadata(link.to_string()),
        other => other,
    })?;
    debug!(
        "{}: {:?}, {} chapter(s)",
        info.id.as_deref().unwrap_or(link),
        info.title,
        info.chapters.as_ref().map_or(0, Vec::len)
    );
    VideoMetadata::from_info(info)
}

/// Parses the first JSON document printed by `yt-dlp --dump-json`.
pub fn parse_dump(stdout: &[u8]) -> Result<VideoInfo, Error> {
    let line = stdout
        .split(|b| *b == b'\n')
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .ok_or_else(|| Error::EmptyMetadata(String::new()))?;
    Ok(serde_json::from_slice(line)?)
}

fn whole_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}
