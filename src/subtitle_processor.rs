use std::fmt;
use std::path::Path;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: SRT parsing into timestamped cues

// @const: SRT timing line regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

// @struct: Single caption cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Cue text, lines joined with '\n'
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: text.into(),
        }
    }

    /// Cue text with line breaks folded into single spaces and outer whitespace stripped
    pub fn normalized_text(&self) -> String {
        self.text
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string()
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(invalid());
        }

        let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
        let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
        let millis: u64 = parts[3].parse().map_err(|_| invalid())?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Parser for SubRip (`.srt`) content
pub struct SrtParser;

impl SrtParser {
    /// Read and parse an SRT file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<SubtitleEntry>> {
        let content = FileManager::read_to_string(&path)?;
        let entries = Self::parse_str(&content);
        debug!("Parsed {} cues from {:?}", entries.len(), path.as_ref());
        Ok(entries)
    }

    /// Parse SRT content into cues, in file order.
    ///
    /// Blocks with a broken timing line or no text are skipped with a warning.
    /// Content without a usable cue yields an empty list.
    /// Cue order is kept as written; out-of-order starts are only reported.
    pub fn parse_str(content: &str) -> Vec<SubtitleEntry> {
        let content = content.trim_start_matches('\u{feff}');
        let mut entries = Vec::new();

        // State variables for the block being read
        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text: Vec<&str> = Vec::new();

        let mut flush = |seq_num: Option<usize>, times: Option<(u64, u64)>, text: &mut Vec<&str>| {
            match (times, text.is_empty()) {
                (Some((start_ms, end_ms)), false) => {
                    let seq_num = seq_num.unwrap_or(entries.len() + 1);
                    if end_ms < start_ms {
                        warn!("Skipping subtitle entry {}: end time precedes start time", seq_num);
                    } else {
                        entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text.join("\n")));
                    }
                },
                (Some(_), true) => {
                    warn!("Skipping empty subtitle entry {}", seq_num.unwrap_or(entries.len() + 1));
                },
                (None, false) => {
                    warn!("Skipping text without a timing line: {:?}", text.join(" "));
                },
                (None, true) => {}
            }
            text.clear();
        };

        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                flush(current_seq_num.take(), current_times.take(), &mut current_text);
                continue;
            }

            // Sequence number opens a new block
            if current_seq_num.is_none() && current_times.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if current_times.is_none() && current_text.is_empty() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    current_times = Some((Self::captured_ms(&caps, 1), Self::captured_ms(&caps, 5)));
                    continue;
                }
                if current_seq_num.is_some() {
                    warn!("Invalid timing line at line {}: {}", line_idx + 1, trimmed);
                }
            }

            current_text.push(trimmed);
        }

        flush(current_seq_num.take(), current_times.take(), &mut current_text);

        if entries.is_empty() {
            warn!("No valid subtitle entries were found in the SRT content");
            return entries;
        }

        let out_of_order = entries
            .windows(2)
            .filter(|pair| pair[1].start_time_ms < pair[0].start_time_ms)
            .count();
        if out_of_order > 0 {
            warn!("Found {} cues starting before their predecessor", out_of_order);
        }

        entries
    }

    fn captured_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let part = |offset: usize| -> u64 {
            caps.get(start_idx + offset)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        (part(0) * 3600 + part(1) * 60 + part(2)) * 1000 + part(3)
    }
}
