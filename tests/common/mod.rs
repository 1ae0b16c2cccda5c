/*!
 * Common test utilities for the scenesage test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use scenesage::subtitle_processor::SubtitleEntry;

/// Opening of Plan 9 from Outer Space: five cues with short gaps
pub const PLAN9_OPENING_SRT: &str = "1
00:00:22,719 --> 00:00:27,319
Greetings, my friend.

2
00:00:27,400 --> 00:00:31,900
We are all interested in the future,
for that is where you and I

3
00:00:32,000 --> 00:00:36,500
are going to spend the rest of our lives.

4
00:00:36,800 --> 00:00:41,200
And remember, my friend,
future events such as these

5
00:00:41,600 --> 00:00:48,072
will affect you in the future.
";

/// Two exchanges separated by a five second silence
pub const TWO_SCENES_SRT: &str = "1
00:00:01,000 --> 00:00:03,000
Who goes there?

2
00:00:03,500 --> 00:00:05,000
A friend.

3
00:00:10,000 --> 00:00:12,000
Ils sont arrivés à l'aube.

4
00:00:12,200 --> 00:00:14,000
Nobody saw them land.
";

/// A well-behaved model reply wrapped in a fenced block
pub const FENCED_REPLY: &str = "Here is the analysis you asked for:

```json
{
  \"summary\": \"A narrator greets the audience and speaks about the future.\",
  \"characters\": [\"Criswell\"],
  \"mood\": \"Ominous\",
  \"cultural_references\": [\"1950s science fiction\"]
}
```

Let me know if you need anything else.";

/// Routes library log output through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, PLAN9_OPENING_SRT)
}

/// Builds cues from `(start_ms, end_ms, text)` triples, numbered from 1
pub fn cues(timings: &[(u64, u64, &str)]) -> Vec<SubtitleEntry> {
    timings
        .iter()
        .enumerate()
        .map(|(idx, (start, end, text))| SubtitleEntry::new(idx + 1, *start, *end, *text))
        .collect()
}

/// Builds back-to-back cues where each gap is taken from `gaps_ms`
pub fn cues_with_gaps(gaps_ms: &[u64]) -> Vec<SubtitleEntry> {
    let mut entries = Vec::with_capacity(gaps_ms.len() + 1);
    let mut start = 1_000;
    entries.push(SubtitleEntry::new(1, start, start + 1_000, "cue 1"));
    for (idx, gap) in gaps_ms.iter().enumerate() {
        start = entries[idx].end_time_ms + gap;
        entries.push(SubtitleEntry::new(idx + 2, start, start + 1_000, format!("cue {}", idx + 2)));
    }
    entries
}
