use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::timestamp::TimestampError;

/// Everything that can go wrong while processing a single playlist entry.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to execute {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {}: {stderr}", describe_exit(.code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("could not parse yt-dlp metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("yt-dlp printed no metadata for {0}")]
    EmptyMetadata(String),

    #[error("no duration reported for {0:?}")]
    MissingDuration(String),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} finished but {} was not created", .path.display())]
    MissingOutput { tool: String, path: PathBuf },

    #[error("gave up on track {track:?} after {attempts} attempts, every output name was taken")]
    CollisionRetriesExhausted { track: String, attempts: u32 },
}

impl Error {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
