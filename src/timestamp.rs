//! Wall-clock style `HH:MM:SS` timestamps used as ffmpeg trim points.
//!
//! Hours are taken modulo 24, so anything longer than a day wraps around.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed timestamp {0:?}, expected H:MM:SS, M:SS or SS")]
pub struct TimestampError(pub String);

/// A point in time within one day, at whole-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(u32);

impl Timestamp {
    pub fn from_seconds(seconds: u64) -> Self {
        let hours = (seconds / 3600) % 24;
        let minutes = (seconds / 60) % 60;
        let secs = seconds % 60;
        Timestamp((hours * 3600 + minutes * 60 + secs) as u32)
    }

    pub fn as_seconds(self) -> u64 {
        u64::from(self.0)
    }

    pub fn hours(self) -> u32 {
        self.0 / 3600
    }

    pub fn minutes(self) -> u32 {
        (self.0 / 60) % 60
    }

    pub fn seconds(self) -> u32 {
        self.0 % 60
    }

    /// Steps back one second; midnight becomes `23:59:59`.
    pub fn one_second_earlier(self) -> Self {
        let previous = (self.as_seconds() + SECONDS_PER_DAY - 1) % SECONDS_PER_DAY;
        Timestamp(previous as u32)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_seconds(s).map(Timestamp::from_seconds)
    }
}

/// Parses `H:MM:SS`, `M:SS` or plain `SS` into a total number of seconds.
pub fn parse_seconds(s: &str) -> Result<u64, TimestampError> {
    let malformed = || TimestampError(s.to_string());
    let trimmed = s.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    if trimmed.is_empty() || parts.len() > 3 {
        return Err(malformed());
    }

    parts.iter().try_fold(0u64, |total, part| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let value: u64 = part.parse().map_err(|_| malformed())?;
        total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(malformed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_hms(seconds: u64) -> String {
        Timestamp::from_seconds(seconds).to_string()
    }

    fn components(formatted: &str) -> (u64, u64, u64) {
        let parts: Vec<&str> = formatted.split(':').collect();
        assert_eq!(parts.len(), 3, "{formatted}");
        assert_eq!(parts[1].len(), 2, "{formatted}");
        assert_eq!(parts[2].len(), 2, "{formatted}");
        (
            parts[0].parse().unwrap(),
            parts[1].parse().unwrap(),
            parts[2].parse().unwrap(),
        )
    }

    #[test]
    fn formatted_components_match_seconds_within_a_day() {
        let samples = (0..200_000u64)
            .step_by(7)
            .chain([59, 60, 3599, 3600, 86_399, 86_400, 90_061, 1_000_000]);
        for s in samples {
            let (h, m, sec) = components(&format_hms(s));
            assert!(m < 60 && sec < 60);
            assert_eq!(s % SECONDS_PER_DAY, h * 3600 + m * 60 + sec, "s = {s}");
        }
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(60), "00:01:00");
        assert_eq!(format_hms(3661), "01:01:01");
    }

    #[test]
    fn wraps_after_a_day() {
        assert_eq!(format_hms(SECONDS_PER_DAY), "00:00:00");
        assert_eq!(format_hms(SECONDS_PER_DAY + 3600), "01:00:00");
    }

    #[test]
    fn end_boundary_rolls_minutes_back_over() {
        let end = Timestamp::from_seconds(3661).one_second_earlier();
        assert_eq!(end.as_seconds(), 3660);
        assert_eq!(end.to_string(), "01:01:00");

        let end = Timestamp::from_seconds(3600).one_second_earlier();
        assert_eq!(end.to_string(), "00:59:59");

        assert_eq!(Timestamp::from_seconds(125).one_second_earlier().to_string(), "00:02:04");
    }

    #[test]
    fn one_second_before_midnight_wraps() {
        assert_eq!(Timestamp::from_seconds(0).one_second_earlier().to_string(), "23:59:59");
    }

    #[test]
    fn parses_all_accepted_shapes() {
        assert_eq!(parse_seconds("1:01:01"), Ok(3661));
        assert_eq!(parse_seconds("2:05"), Ok(125));
        assert_eq!(parse_seconds("42"), Ok(42));
        assert_eq!(parse_seconds(" 0:00:59\n"), Ok(59));
        assert_eq!("25:00:00".parse::<Timestamp>().map(|t| t.to_string()), Ok("01:00:00".to_string()));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "abc", "1::2", "1:2:3:4", "-1:00", "1:0x", "1.5"] {
            assert!(parse_seconds(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
