use serde::{Deserialize, Serialize};

/// The subset of `yt-dlp --dump-json` output needed to split a download.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VideoInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    /// Seconds, usually integral but floats show up for some extractors.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Human readable duration such as `1:01:01`, used when `duration` is absent.
    #[serde(default)]
    pub duration_string: Option<String>,
    /// `null` when the video has no chapters.
    #[serde(default)]
    pub chapters: Option<Vec<ChapterInfo>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChapterInfo {
    pub start_time: f64,
    pub title: String,
}
