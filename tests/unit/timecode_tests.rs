/*!
 * Tests for timestamp encoding and decoding
 */

use subvtt::timecode;

/// Test WebVTT timestamp formatting from seconds
#[test]
fn test_format_timestamp_withZeroSeconds_shouldFormatAllZeros() {
    assert_eq!(timecode::format_timestamp(0.0), "00:00:00.000");
}

#[test]
fn test_format_timestamp_withFractionalSeconds_shouldTruncateToMillis() {
    assert_eq!(timecode::format_timestamp(3661.5), "01:01:01.500");
    // Truncation, not rounding
    assert_eq!(timecode::format_timestamp(1.9996), "00:00:01.999");
}

#[test]
fn test_format_timestamp_withWholeMinutes_shouldFormatCorrectly() {
    assert_eq!(timecode::format_timestamp(90.0), "00:01:30.000");
}

#[test]
fn test_format_timestamp_withLargeHours_shouldNotTruncateHours() {
    // 100 hours
    assert_eq!(timecode::format_timestamp(360_000.0), "100:00:00.000");
}

#[test]
fn test_format_timestamp_ms_withMixedComponents_shouldFormatCorrectly() {
    assert_eq!(timecode::format_timestamp_ms(5_025_678), "01:23:45.678");
}

/// Test timestamp parsing and formatting round trip
#[test]
fn test_parse_timestamp_withValidTimestamp_shouldParseAndFormat() {
    let ms = timecode::parse_timestamp("01:23:45,678").unwrap();
    assert_eq!(ms, 5_025_678);

    let formatted = timecode::format_timestamp_ms(ms);
    assert_eq!(formatted, "01:23:45.678");
}

#[test]
fn test_parse_timestamp_withDotSeparator_shouldParse() {
    assert_eq!(timecode::parse_timestamp("00:00:01.500").unwrap(), 1500);
}

#[test]
fn test_parse_timestamp_withInvalidComponents_shouldFail() {
    assert!(timecode::parse_timestamp("00:61:00,000").is_err());
    assert!(timecode::parse_timestamp("not a timestamp").is_err());
    assert!(timecode::parse_timestamp("00:00:00").is_err());
}

/// Test SRT comma-to-dot separator conversion
#[test]
fn test_srt_time_line_to_vtt_withValidLine_shouldReplaceExactlyTwoSeparators() {
    let converted = timecode::srt_time_line_to_vtt("00:00:01,500 --> 00:00:03,000");
    assert_eq!(converted, "00:00:01.500 --> 00:00:03.000");
}

#[test]
fn test_srt_time_line_to_vtt_withCommaOutsideTimestamp_shouldLeaveItAlone() {
    let converted = timecode::srt_time_line_to_vtt("Well, hello there");
    assert_eq!(converted, "Well, hello there");
}

#[test]
fn test_srt_time_line_to_vtt_withTrailingText_shouldOnlyTouchTimestamps() {
    let converted = timecode::srt_time_line_to_vtt("00:00:01,500 --> 00:00:03,000 position:50%,line-left");
    assert_eq!(converted, "00:00:01.500 --> 00:00:03.000 position:50%,line-left");
}

#[test]
fn test_srt_time_line_to_vtt_withMalformedLine_shouldPassThroughUnchanged() {
    let converted = timecode::srt_time_line_to_vtt("0:0:1,5 --> 0:0:3,0");
    assert_eq!(converted, "0:0:1,5 --> 0:0:3,0");
}
