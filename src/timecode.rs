use anyhow::{Result, Context, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Timestamp encoding and decoding

// @const: SRT decimal separator regex (HH:MM:SS,mmm)
static SRT_DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}),(\d{3})").unwrap()
});

/// Format a duration in seconds to a WebVTT timestamp (HH:MM:SS.mmm).
///
/// The fractional part is truncated to milliseconds, not rounded. Hours
/// grow beyond two digits when needed. Negative durations are out of
/// contract and must not be supplied.
#[allow(dead_code)]
pub fn format_timestamp(duration_secs: f64) -> String {
    let total_ms = (duration_secs * 1000.0) as u64;
    format_timestamp_ms(total_ms)
}

/// Format a timestamp in milliseconds to WebVTT format (HH:MM:SS.mmm)
pub fn format_timestamp_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT or VTT timestamp to milliseconds.
///
/// Accepts both the comma and the dot millisecond separator.
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    // Parse HH:MM:SS,mmm or HH:MM:SS.mmm format
    let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    // Validate time components
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Convert the decimal separators of an SRT time-range line to VTT form.
///
/// Replaces the comma in each `HH:MM:SS,mmm` timestamp with a dot. The
/// substitution is scoped to the timestamp pattern, so commas elsewhere in
/// the line are never touched and a malformed time line passes through
/// unchanged.
pub fn srt_time_line_to_vtt(line: &str) -> String {
    SRT_DECIMAL_REGEX.replace_all(line, "$1.$2").into_owned()
}
