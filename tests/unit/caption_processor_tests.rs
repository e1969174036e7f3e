/*!
 * Tests for caption document parsing, serialization and numbering
 */

use std::fmt::Write;
use anyhow::Result;
use subvtt::caption_processor::{
    self, CaptionCue, CaptionDocument, add_numbers_to_vtt, convert_srt_to_vtt,
    count_time_range_lines, remove_numbers_from_vtt, remove_numbers_from_vtt_lenient,
};
use subvtt::errors::CaptionError;
use crate::common;

/// Test caption cue validation
#[test]
fn test_cue_new_validated_withValidInput_shouldCreateCue() -> Result<()> {
    let cue = CaptionCue::new_validated(Some(1), 1000, 4000, vec!["Hello".to_string()])?;
    assert_eq!(cue.seq_num, Some(1));
    assert_eq!(cue.start_time_ms, 1000);
    assert_eq!(cue.end_time_ms, 4000);
    assert_eq!(cue.text_lines, vec!["Hello".to_string()]);
    Ok(())
}

#[test]
fn test_cue_new_validated_withReversedRange_shouldFail() {
    let result = CaptionCue::new_validated(None, 4000, 1000, vec!["Hello".to_string()]);
    assert!(result.is_err());
}

#[test]
fn test_cue_new_validated_withEmptyText_shouldFail() {
    assert!(CaptionCue::new_validated(None, 0, 1000, vec![]).is_err());
    assert!(CaptionCue::new_validated(None, 0, 1000, vec!["  ".to_string()]).is_err());
}

/// Test cue display formatting
#[test]
fn test_cue_display_withSeqNum_shouldFormatVttBlock() {
    let cue = CaptionCue::new(Some(2), 5000, 10000, vec!["Test caption".to_string()]);
    let mut output = String::new();
    write!(output, "{}", cue).unwrap();

    assert_eq!(output, "2\n00:00:05.000 --> 00:00:10.000\nTest caption\n\n");
}

/// Test SRT to VTT conversion
#[test]
fn test_convert_srt_to_vtt_withValidContent_shouldProduceVtt() {
    let srt = "1\n00:00:01,000 --> 00:00:04,000\nHello world\n\n2\n00:00:05,000 --> 00:00:08,000\nTest subtitle\nSecond line\n\n";
    let vtt = convert_srt_to_vtt(srt);

    assert!(vtt.starts_with("WEBVTT\n\n"));
    assert_eq!(count_time_range_lines(&vtt), 2);
    assert_eq!(
        vtt,
        "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nHello world\n\n00:00:05.000 --> 00:00:08.000\nTest subtitle\nSecond line\n\n"
    );
}

#[test]
fn test_convert_srt_to_vtt_withBom_shouldStripIt() {
    let srt = "\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi\n";
    let vtt = convert_srt_to_vtt(srt);
    assert!(vtt.starts_with("WEBVTT\n\n00:00:01.000"));
}

#[test]
fn test_convert_srt_to_vtt_withShortBlock_shouldDropIt() {
    // The middle block only has a number and a time line, no text
    let srt = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n2\n00:00:03,000 --> 00:00:04,000\n\n3\n00:00:05,000 --> 00:00:06,000\nThird\n";
    let vtt = convert_srt_to_vtt(srt);
    assert_eq!(count_time_range_lines(&vtt), 2);
    assert!(!vtt.contains("00:00:03.000"));
}

#[test]
fn test_convert_srt_to_vtt_withMalformedTimeLine_shouldPassItThrough() {
    let srt = "1\nnot a time range\nStill shown\n";
    let vtt = convert_srt_to_vtt(srt);
    assert!(vtt.contains("not a time range\nStill shown"));
    assert_eq!(count_time_range_lines(&vtt), 0);
}

#[test]
fn test_convert_srt_to_vtt_withEmptyInput_shouldProduceHeaderOnly() {
    assert_eq!(convert_srt_to_vtt(""), "WEBVTT\n\n");
}

#[test]
fn test_convert_srt_to_vtt_withMultipleBlankSeparators_shouldSplitBlocks() {
    let srt = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nSecond\n";
    let vtt = convert_srt_to_vtt(srt);
    assert_eq!(count_time_range_lines(&vtt), 2);
}

/// Test adding sequence numbers
#[test]
fn test_add_numbers_withValidVtt_shouldNumberSequentially() -> Result<()> {
    let numbered = add_numbers_to_vtt(common::sample_vtt())?;

    assert!(numbered.trim().starts_with("WEBVTT"));
    assert!(numbered.contains("\n1\n00:00:01.000 --> 00:00:04.000"));
    assert!(numbered.contains("\n2\n00:00:05.000 --> 00:00:09.000"));
    assert!(numbered.contains("\n3\n00:00:10.000 --> 00:00:14.000"));
    Ok(())
}

#[test]
fn test_add_numbers_withMissingHeader_shouldFailWithInvalidFormat() {
    let result = add_numbers_to_vtt("1\n00:00:01.000 --> 00:00:02.000\nHi\n");
    assert!(matches!(result, Err(CaptionError::InvalidFormat(_))));
}

#[test]
fn test_add_numbers_withNonTimeLines_shouldPassThemThroughUnchanged() -> Result<()> {
    let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nLine one\nLine two\n\n";
    let numbered = add_numbers_to_vtt(vtt)?;
    assert!(numbered.contains("Line one\nLine two"));
    Ok(())
}

/// Test removing sequence numbers
#[test]
fn test_remove_numbers_withMissingHeader_shouldFailWithInvalidFormat() {
    assert!(matches!(
        remove_numbers_from_vtt("no header here"),
        Err(CaptionError::InvalidFormat(_))
    ));
    assert!(matches!(
        remove_numbers_from_vtt_lenient("no header here"),
        Err(CaptionError::InvalidFormat(_))
    ));
}

#[test]
fn test_remove_numbers_afterAddNumbers_shouldRoundTrip() -> Result<()> {
    let original = common::sample_vtt();
    let numbered = add_numbers_to_vtt(original)?;
    let unnumbered = remove_numbers_from_vtt(&numbered)?;
    assert_eq!(unnumbered, original);
    Ok(())
}

#[test]
fn test_remove_numbers_withNumericTrailingTextLine_shouldKeepIt() -> Result<()> {
    // "3" is cue text, separated from the next cue by a blank line
    let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nCount to\n3\n\n00:00:03.000 --> 00:00:04.000\nNext\n\n";
    let result = remove_numbers_from_vtt(vtt)?;
    assert!(result.contains("Count to\n3\n"));
    Ok(())
}

#[test]
fn test_remove_numbers_lenient_withTextPrecedingTimeLine_shouldDropIt() -> Result<()> {
    // The lookahead heuristic drops any line directly before a time-range
    // line, numeric or not
    let vtt = "WEBVTT\nintro line\n00:00:01.000 --> 00:00:02.000\nHi\n";
    let result = remove_numbers_from_vtt_lenient(vtt)?;
    assert!(!result.contains("intro line"));
    assert!(result.contains("00:00:01.000 --> 00:00:02.000\nHi"));
    Ok(())
}

/// Test typed VTT parsing
#[test]
fn test_parse_vtt_withNumberedDocument_shouldCaptureSeqNums() -> Result<()> {
    let vtt = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello\n\n2\n00:00:05.000 --> 00:00:08.000\nWorld\nAgain\n\n";
    let document = CaptionDocument::parse_vtt(vtt)?;

    assert_eq!(document.cues.len(), 2);
    assert_eq!(document.cues[0].seq_num, Some(1));
    assert_eq!(document.cues[0].start_time_ms, 1000);
    assert_eq!(document.cues[0].end_time_ms, 4000);
    assert_eq!(document.cues[0].text_lines, vec!["Hello".to_string()]);
    assert_eq!(document.cues[1].seq_num, Some(2));
    assert_eq!(
        document.cues[1].text_lines,
        vec!["World".to_string(), "Again".to_string()]
    );
    Ok(())
}

#[test]
fn test_parse_vtt_withUnnumberedDocument_shouldLeaveSeqNumsEmpty() -> Result<()> {
    let document = CaptionDocument::parse_vtt(common::sample_vtt())?;
    assert_eq!(document.cues.len(), 3);
    assert!(document.cues.iter().all(|cue| cue.seq_num.is_none()));
    Ok(())
}

#[test]
fn test_parse_vtt_withMissingHeader_shouldFail() {
    assert!(matches!(
        CaptionDocument::parse_vtt("00:00:01.000 --> 00:00:02.000\nHi\n"),
        Err(CaptionError::InvalidFormat(_))
    ));
}

/// Test VTT serialization
#[test]
fn test_to_vtt_string_withNumberedFlag_shouldRenumberFromOne() {
    let document = CaptionDocument::from_cues(vec![
        CaptionCue::new(Some(7), 0, 4000, vec!["First".to_string()]),
        CaptionCue::new(None, 2000, 6000, vec!["Second".to_string()]),
    ]);

    let numbered = document.to_vtt_string(true);
    assert_eq!(
        numbered,
        "WEBVTT\n\n1\n00:00:00.000 --> 00:00:04.000\nFirst\n\n2\n00:00:02.000 --> 00:00:06.000\nSecond\n\n"
    );

    let unnumbered = document.to_vtt_string(false);
    assert!(!unnumbered.contains("\n1\n"));
    assert!(unnumbered.starts_with("WEBVTT\n\n00:00:00.000"));
}

#[test]
fn test_to_vtt_string_withEmptyDocument_shouldEmitHeaderOnly() {
    let document = CaptionDocument::default();
    assert_eq!(document.to_vtt_string(false), "WEBVTT\n\n");
}

/// Test the documented format properties end to end
#[test]
fn test_conversion_properties_withSampleFile_shouldHold() -> Result<()> {
    let srt = "1\n00:00:01,500 --> 00:00:03,000\nHello\n";
    let vtt = convert_srt_to_vtt(srt);
    assert!(vtt.contains("00:00:01.500 --> 00:00:03.000"));
    assert_eq!(caption_processor::count_time_range_lines(&vtt), 1);

    let parsed = CaptionDocument::parse_vtt(&vtt)?;
    assert_eq!(parsed.cues.len(), 1);
    assert_eq!(parsed.cues[0].start_time_ms, 1500);
    Ok(())
}
