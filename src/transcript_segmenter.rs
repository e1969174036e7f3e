use log::debug;

use crate::app_config::SegmenterConfig;
use crate::caption_processor::{CaptionCue, CaptionDocument};

// @module: Synthesize caption cues from a flat transcript string

/// Wrap a transcript into display lines of at most `max_line_chars`
/// characters.
///
/// Words are split on single spaces and packed greedily: a word joins the
/// current line when the line plus a separator plus the word still fits,
/// otherwise it starts a new line. A single word longer than the limit
/// becomes its own over-long line rather than being broken mid-word.
pub fn wrap_transcript(transcript: &str, max_line_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in transcript.split(' ') {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_line_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Build a caption document from a transcript under a fixed cadence.
///
/// Lines are paired two at a time into cues; an odd trailing line forms a
/// single-line cue. Cue `n` (0-based) starts at `n * line_advance_secs`
/// and ends `cue_duration_secs` later, regardless of text length. The
/// cadence is a deliberate approximation of speech timing, not an
/// alignment; consecutive cue ranges overlap by design.
pub fn segment_transcript(transcript: &str, config: &SegmenterConfig) -> CaptionDocument {
    let lines = wrap_transcript(transcript, config.max_line_chars);
    debug!("Wrapped transcript into {} line(s)", lines.len());

    let cues = lines
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let start_ms = index as u64 * config.line_advance_secs * 1000;
            let end_ms = start_ms + config.cue_duration_secs * 1000;
            CaptionCue::new(None, start_ms, end_ms, pair.to_vec())
        })
        .collect();

    CaptionDocument::from_cues(cues)
}

/// Convert a transcript string straight to WebVTT text with the default
/// cadence (36-character lines, 2 seconds advance per cue, 4-second cues).
pub fn transcript_to_vtt(transcript: &str) -> String {
    segment_transcript(transcript, &SegmenterConfig::default()).to_vtt_string(false)
}
