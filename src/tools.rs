use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::anyhow;

use crate::error::Error;

/// Locations of the external programs the pipeline shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub yt_dlp: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Toolchain {
    pub fn ensure_installed(&self) -> anyhow::Result<()> {
        for tool in [&self.yt_dlp, &self.ffmpeg] {
            let resolved = which::which(tool).map_err(|_| {
                anyhow!(
                    "Required external tool '{}' is not installed or not in PATH",
                    tool.display()
                )
            })?;
            log::debug!("using {}", resolved.display());
        }
        Ok(())
    }

    pub fn yt_dlp<I, S>(&self, args: I) -> Result<Output, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(&self.yt_dlp, args)
    }

    pub fn ffmpeg<I, S>(&self, args: I) -> Result<Output, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(&self.ffmpeg, args)
    }
}

/// Runs `program` to completion with captured output.
///
/// A non-zero exit becomes [`Error::ToolFailed`] carrying the trimmed stderr.
pub fn run<I, S>(program: &Path, args: I) -> Result<Output, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = tool_name(program);
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| Error::Spawn {
            tool: tool.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_on_success() {
        let output = run(Path::new("sh"), ["-c", "printf hello"]).unwrap();
        assert_eq!(output.stdout, b"hello");
    }

    #[test]
    fn non_zero_exit_keeps_code_and_stderr() {
        let err = run(Path::new("sh"), ["-c", "echo 'it broke' >&2; exit 3"]).unwrap_err();
        match err {
            Error::ToolFailed { tool, code, stderr } => {
                assert_eq!(tool, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "it broke");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run(Path::new("/definitely/not/here/yt-dlp"), ["--version"]).unwrap_err();
        assert!(matches!(err, Error::Spawn { ref tool, .. } if tool == "yt-dlp"));
    }

    #[test]
    fn missing_tool_is_reported_by_name() {
        let tools = Toolchain {
            yt_dlp: PathBuf::from("/definitely/not/here/yt-dlp"),
            ffmpeg: PathBuf::from("sh"),
        };
        let err = tools.ensure_installed().unwrap_err();
        assert!(err
            .to_string()
            .contains("Required external tool '/definitely/not/here/yt-dlp' is not installed"));
    }
}
