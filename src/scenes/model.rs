/*!
 * Scene records produced by segmentation and enriched by analysis.
 *
 * Times are kept in milliseconds and serialized as SRT timestamps
 * (`HH:MM:SS,mmm`) so the output file reads like the subtitle source.
 */

use serde::{Deserialize, Serialize};

use crate::subtitle_processor::SubtitleEntry;

/// A frozen run of cues with no inter-cue gap at or above the pause threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Start of the first cue
    #[serde(rename = "start", with = "srt_timestamp")]
    pub start_ms: u64,

    /// End of the last cue
    #[serde(rename = "end", with = "srt_timestamp")]
    pub end_ms: u64,

    /// Normalized cue texts joined with single spaces
    pub transcript: String,

    /// Number of cues folded into this scene
    #[serde(skip)]
    pub cue_count: usize,
}

impl Scene {
    /// Scene length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// `start - end` range in SRT notation, for progress output.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            SubtitleEntry::format_timestamp(self.start_ms),
            SubtitleEntry::format_timestamp(self.end_ms)
        )
    }
}

/// Structured metadata extracted from a model response.
///
/// Every field is always present; extraction failures leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneInsights {
    /// One-sentence summary
    pub summary: String,

    /// Characters mentioned
    pub characters: Vec<String>,

    /// Overall mood or emotion
    pub mood: String,

    /// Up to three cultural references (requested, not enforced)
    pub cultural_references: Vec<String>,
}

impl SceneInsights {
    /// True when nothing could be extracted.
    pub fn is_empty(&self) -> bool {
        no_insights(&self.summary, &self.characters, &self.mood, &self.cultural_references)
    }
}

/// Output record: a scene plus its insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedScene {
    #[serde(rename = "start", with = "srt_timestamp")]
    pub start_ms: u64,

    #[serde(rename = "end", with = "srt_timestamp")]
    pub end_ms: u64,

    pub transcript: String,

    pub summary: String,

    pub characters: Vec<String>,

    pub mood: String,

    pub cultural_refs: Vec<String>,
}

impl AnalyzedScene {
    /// Combine a frozen scene with its extracted insights.
    pub fn new(scene: Scene, insights: SceneInsights) -> Self {
        Self {
            start_ms: scene.start_ms,
            end_ms: scene.end_ms,
            transcript: scene.transcript,
            summary: insights.summary,
            characters: insights.characters,
            mood: insights.mood,
            cultural_refs: insights.cultural_references,
        }
    }

    /// False when extraction left every insight field empty.
    pub fn has_insights(&self) -> bool {
        !no_insights(&self.summary, &self.characters, &self.mood, &self.cultural_refs)
    }
}

fn no_insights(summary: &str, characters: &[String], mood: &str, references: &[String]) -> bool {
    summary.is_empty() && characters.is_empty() && mood.is_empty() && references.is_empty()
}

/// Serde adapter between millisecond counts and `HH:MM:SS,mmm` strings.
pub mod srt_timestamp {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::subtitle_processor::SubtitleEntry;

    pub fn serialize<S: Serializer>(ms: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&SubtitleEntry::format_timestamp(*ms))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = String::deserialize(deserializer)?;
        SubtitleEntry::parse_timestamp(&text).map_err(de::Error::custom)
    }
}
