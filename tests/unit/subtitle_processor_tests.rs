/*!
 * Tests for subtitle processing functionality
 */

use std::fmt::Write;
use anyhow::Result;
use scenesage::errors::SubtitleError;
use scenesage::subtitle_processor::{SrtParser, SubtitleEntry};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

#[test]
fn test_timestamp_parsing_withMalformedTimestamp_shouldFail() {
    for ts in ["", "00:00:01", "00:61:00,000", "aa:00:00,000", "00:00:00,1000"] {
        assert!(
            matches!(SubtitleEntry::parse_timestamp(ts), Err(SubtitleError::InvalidTimestamp(_))),
            "{:?} should be rejected",
            ts
        );
    }
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle");
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest subtitle\n\n");
}

#[test]
fn test_normalizedText_withLineBreaks_shouldJoinWithSpaces() {
    let entry = SubtitleEntry::new(1, 0, 1000, "  And remember,\r\nmy friend,\nfuture events  ");

    assert_eq!(entry.normalized_text(), "And remember, my friend, future events");
}

#[test]
fn test_parseFile_withPlan9Opening_shouldReadFiveCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "plan9.srt")?;

    let entries = SrtParser::parse_file(&path)?;

    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].start_time_ms, 22_719);
    assert_eq!(entries[4].end_time_ms, 48_072);
    assert_eq!(entries[1].text, "We are all interested in the future,\nfor that is where you and I");
    Ok(())
}

#[test]
fn test_parseStr_withBrokenBlocks_shouldSkipThemAndKeepOthers() {
    let content = "\u{feff}1
00:00:01,000 --> 00:00:02,000
First

2
not a timing line
Lost text

3
00:00:05,000 --> 00:00:04,000
Ends before it starts

4
00:00:06,000 --> 00:00:07,000

5
00:00:08,000 --> 00:00:09,500
Last
";

    let entries = SrtParser::parse_str(content);

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["First", "Last"]);
    assert_eq!(entries[1].seq_num, 5);
}

#[test]
fn test_parseStr_withOutOfOrderCues_shouldKeepFileOrder() {
    let content = "1
00:00:10,000 --> 00:00:11,000
Later

2
00:00:01,000 --> 00:00:02,000
Earlier
";

    let entries = SrtParser::parse_str(content);

    assert_eq!(entries[0].text, "Later");
    assert_eq!(entries[1].text, "Earlier");
}

#[test]
fn test_parseStr_withDotSeparatorAndCrlf_shouldParse() {
    let content = "1\r\n00:00:01.250 --> 00:00:02.500\r\nDot separated\r\n";

    let entries = SrtParser::parse_str(content);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].start_time_ms, 1_250);
    assert_eq!(entries[0].end_time_ms, 2_500);
}

#[test]
fn test_parseStr_withNoCues_shouldReturnEmptyList() {
    assert!(SrtParser::parse_str("").is_empty());
    assert!(SrtParser::parse_str("\u{feff}\n\n").is_empty());
    assert!(SrtParser::parse_str("just some words\n").is_empty());
}

#[test]
fn test_parseFile_withMissingFile_shouldFail() {
    assert!(SrtParser::parse_file("/definitely/not/here.srt").is_err());
}
