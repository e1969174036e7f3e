use std::fmt;
use anyhow::{Result, anyhow};
use log::{warn, debug};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CaptionError;
use crate::timecode;

// @module: Caption document parsing and transformation

/// Required first-line marker of a WebVTT document
pub const WEBVTT_HEADER: &str = "WEBVTT";

// @const: VTT time-range line regex (HH:MM:SS.mmm --> HH:MM:SS.mmm)
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}\.\d{3}\s-->\s\d{2}:\d{2}:\d{2}\.\d{3}").unwrap()
});

// @const: SRT block separator (one or more blank lines)
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @struct: Single timed caption unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionCue {
    // @field: Sequence number, present only when numbering is enabled
    pub seq_num: Option<usize>,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Display lines in insertion order
    pub text_lines: Vec<String>,
}

impl CaptionCue {
    /// Creates a new caption cue - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(seq_num: Option<usize>, start_time_ms: u64, end_time_ms: u64, text_lines: Vec<String>) -> Self {
        CaptionCue {
            seq_num,
            start_time_ms,
            end_time_ms,
            text_lines,
        }
    }

    // @creates: Validated caption cue
    // @validates: Time range and non-empty text lines
    #[allow(dead_code)]
    pub fn new_validated(seq_num: Option<usize>, start_time_ms: u64, end_time_ms: u64, text_lines: Vec<String>) -> Result<Self> {
        if end_time_ms < start_time_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} < start time {}",
                end_time_ms, start_time_ms
            ));
        }

        if text_lines.is_empty() || text_lines.iter().any(|line| line.trim().is_empty()) {
            return Err(anyhow!("Caption cue requires one or more non-empty text lines"));
        }

        Ok(CaptionCue {
            seq_num,
            start_time_ms,
            end_time_ms,
            text_lines,
        })
    }

    /// Convert start time to a formatted VTT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_timestamp_ms(self.start_time_ms)
    }

    /// Convert end time to a formatted VTT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_timestamp_ms(self.end_time_ms)
    }
}

impl fmt::Display for CaptionCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(seq_num) = self.seq_num {
            writeln!(f, "{}", seq_num)?;
        }
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in &self.text_lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Ordered collection of caption cues forming one WebVTT document
#[derive(Debug, Clone, Default)]
pub struct CaptionDocument {
    /// Cues in source order; the engine never reorders them
    pub cues: Vec<CaptionCue>,
}

impl CaptionDocument {
    /// Create a document from an already-built cue list
    pub fn from_cues(cues: Vec<CaptionCue>) -> Self {
        CaptionDocument { cues }
    }

    /// Parse a WebVTT document into typed cues.
    ///
    /// The trimmed content must start with the WEBVTT header. A line matching
    /// the time-range pattern opens a cue; an integer line directly before a
    /// time-range line is taken as that cue's sequence number. Stray lines
    /// outside any cue are skipped with a warning.
    pub fn parse_vtt(content: &str) -> Result<Self, CaptionError> {
        ensure_webvtt_header(content)?;

        let trimmed = content.trim();
        let lines: Vec<&str> = trimmed.lines().collect();
        let mut cues = Vec::new();

        // Skip the header line itself
        let mut i = 1;
        while i < lines.len() {
            let line = lines[i].trim_end_matches('\r');
            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            let mut seq_num = None;
            let mut range_line = line;
            if !TIME_RANGE_REGEX.is_match(line) {
                let looks_numeric = line.trim().parse::<usize>().ok();
                let precedes_range = i + 1 < lines.len()
                    && TIME_RANGE_REGEX.is_match(lines[i + 1].trim_end_matches('\r'));
                match looks_numeric {
                    Some(num) if precedes_range => {
                        seq_num = Some(num);
                        i += 1;
                        range_line = lines[i].trim_end_matches('\r');
                    }
                    _ => {
                        warn!("Skipping stray line outside cue at line {}: {}", i + 1, line);
                        i += 1;
                        continue;
                    }
                }
            }

            let (start_time_ms, end_time_ms) = parse_time_range(range_line)?;
            if start_time_ms > end_time_ms {
                warn!(
                    "Cue time range out of order at line {}: {} > {}",
                    i + 1, start_time_ms, end_time_ms
                );
            }
            i += 1;

            let mut text_lines = Vec::new();
            while i < lines.len() {
                let text = lines[i].trim_end_matches('\r');
                if text.trim().is_empty() || TIME_RANGE_REGEX.is_match(text) {
                    break;
                }
                // An integer line directly before a time-range line opens the next cue
                if text.trim().parse::<usize>().is_ok()
                    && i + 1 < lines.len()
                    && TIME_RANGE_REGEX.is_match(lines[i + 1].trim_end_matches('\r'))
                {
                    break;
                }
                text_lines.push(text.to_string());
                i += 1;
            }

            if text_lines.is_empty() {
                warn!("Cue with no text lines at {} --> {}",
                      timecode::format_timestamp_ms(start_time_ms),
                      timecode::format_timestamp_ms(end_time_ms));
            }

            cues.push(CaptionCue {
                seq_num,
                start_time_ms,
                end_time_ms,
                text_lines,
            });
        }

        Ok(CaptionDocument { cues })
    }

    /// Render the document as WebVTT text.
    ///
    /// When `numbered` is set, cues are numbered sequentially starting at 1
    /// in document order, regardless of any sequence numbers found in the
    /// source.
    pub fn to_vtt_string(&self, numbered: bool) -> String {
        let mut output = format!("{}\n\n", WEBVTT_HEADER);
        for (index, cue) in self.cues.iter().enumerate() {
            if numbered {
                output.push_str(&(index + 1).to_string());
                output.push('\n');
            }
            output.push_str(&cue.format_start_time());
            output.push_str(" --> ");
            output.push_str(&cue.format_end_time());
            output.push('\n');
            for line in &cue.text_lines {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }
        output
    }
}

/// Convert SRT content to WebVTT.
///
/// Splits the input on blank lines, drops the SRT sequence number of each
/// block, converts the comma decimal separators of the time line and keeps
/// the text lines verbatim. Blocks with fewer than 3 lines are silently
/// dropped; a malformed time line passes through unconverted (the
/// conversion does not validate time-range syntax).
pub fn convert_srt_to_vtt(srt_content: &str) -> String {
    // Strip a leading byte-order mark if present
    let content = srt_content.strip_prefix('\u{feff}').unwrap_or(srt_content);

    let mut vtt = format!("{}\n\n", WEBVTT_HEADER);
    for block in BLOCK_SEPARATOR_REGEX.split(content.trim()) {
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 3 {
            debug!("Skipping malformed SRT block with {} line(s)", lines.len());
            continue;
        }

        // First line is the SRT sequence number; it is not carried over
        let time_line = timecode::srt_time_line_to_vtt(lines[1]);
        vtt.push_str(&time_line);
        vtt.push('\n');
        vtt.push_str(&lines[2..].join("\n"));
        vtt.push_str("\n\n");
    }

    vtt
}

/// Add sequence numbers to a WebVTT document.
///
/// Walks the document lines and prepends `1, 2, 3, ...` immediately before
/// each line matching the time-range pattern; every other line passes
/// through unchanged, preserving the original blank-line structure.
pub fn add_numbers_to_vtt(vtt_content: &str) -> Result<String, CaptionError> {
    ensure_webvtt_header(vtt_content)?;

    let lines: Vec<&str> = vtt_content.split('\n').collect();
    let mut output = format!("{}\n\n", lines[0]);
    let mut counter = 1;

    for line in &lines[1..] {
        if TIME_RANGE_REGEX.is_match(line) {
            output.push_str(&counter.to_string());
            output.push('\n');
            counter += 1;
        }
        output.push_str(line);
        output.push('\n');
    }

    Ok(output)
}

/// Remove sequence numbers from a WebVTT document.
///
/// This is the two-pass form: the document is parsed into typed cues, any
/// sequence numbers are discarded and the cues are re-serialized in
/// canonical form. Unlike [`remove_numbers_from_vtt_lenient`] a text line
/// that merely precedes a time-range line is only dropped when it parses
/// as an integer directly before the range line of its own cue block.
pub fn remove_numbers_from_vtt(vtt_content: &str) -> Result<String, CaptionError> {
    let document = CaptionDocument::parse_vtt(vtt_content)?;
    Ok(document.to_vtt_string(false))
}

/// Remove sequence numbers with the historical lookahead heuristic.
///
/// Any line whose immediate successor matches the time-range pattern is
/// dropped, numeric or not. Kept as a compatibility mode for callers that
/// need bit-exact parity with the original behavior.
pub fn remove_numbers_from_vtt_lenient(vtt_content: &str) -> Result<String, CaptionError> {
    ensure_webvtt_header(vtt_content)?;

    let lines: Vec<&str> = vtt_content.split('\n').collect();
    let mut output = format!("{}\n\n", lines[0]);

    for (i, line) in lines.iter().enumerate().skip(1) {
        // Lookahead: a line directly before a time-range line is taken for a number
        if i + 1 < lines.len() && TIME_RANGE_REGEX.is_match(lines[i + 1]) {
            continue;
        }
        output.push_str(line);
        output.push('\n');
    }

    Ok(output)
}

/// Count the time-range lines of a document - used by tests and callers
/// reporting conversion statistics
pub fn count_time_range_lines(content: &str) -> usize {
    content
        .lines()
        .filter(|line| TIME_RANGE_REGEX.is_match(line))
        .count()
}

fn ensure_webvtt_header(content: &str) -> Result<(), CaptionError> {
    if !content.trim().starts_with(WEBVTT_HEADER) {
        return Err(CaptionError::InvalidFormat(
            format!("document must start with {}", WEBVTT_HEADER),
        ));
    }
    Ok(())
}

fn parse_time_range(line: &str) -> Result<(u64, u64), CaptionError> {
    let mut parts = line.splitn(2, "-->");
    let start = parts.next().unwrap_or_default().trim();
    let end = parts.next().unwrap_or_default().trim();

    let start_ms = timecode::parse_timestamp(start)
        .map_err(|e| CaptionError::InvalidTimestamp(e.to_string()))?;
    let end_ms = timecode::parse_timestamp(end)
        .map_err(|e| CaptionError::InvalidTimestamp(e.to_string()))?;

    Ok((start_ms, end_ms))
}
