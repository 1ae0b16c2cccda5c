/*!
 * Pause-based scene segmentation.
 *
 * Cues are folded one at a time into a scene under construction. A gap of at
 * least the pause threshold between the previous cue's end and the next cue's
 * start closes the current scene and opens a new one.
 */

use std::time::Duration;

use log::debug;

use crate::errors::SceneError;
use crate::scenes::model::Scene;
use crate::subtitle_processor::SubtitleEntry;

/// Default pause threshold in seconds.
pub const DEFAULT_PAUSE_THRESHOLD_SECS: f64 = 4.0;

/// Scene under construction.
#[derive(Debug, Clone)]
struct SceneBuilder {
    start_ms: u64,
    end_ms: u64,
    texts: Vec<String>,
}

impl SceneBuilder {
    fn open(cue: &SubtitleEntry) -> Self {
        Self {
            start_ms: cue.start_time_ms,
            end_ms: cue.end_time_ms,
            texts: Vec::new(),
        }
    }

    fn push(&mut self, cue: &SubtitleEntry) {
        self.texts.push(cue.normalized_text());
        self.end_ms = cue.end_time_ms;
    }

    fn freeze(self) -> Scene {
        Scene {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            cue_count: self.texts.len(),
            transcript: self.texts.join(" "),
        }
    }
}

/// State carried from one cue to the next.
///
/// `advance` consumes a cue and returns the scene it closed, if any;
/// `finish` flushes whatever is still open.
#[derive(Debug, Clone)]
pub struct SegmenterState {
    threshold_ms: u64,
    current: Option<SceneBuilder>,
    previous_end_ms: Option<u64>,
}

impl SegmenterState {
    /// Fresh state for the given threshold in milliseconds.
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            current: None,
            previous_end_ms: None,
        }
    }

    /// Fold one cue into the state.
    pub fn advance(&mut self, cue: &SubtitleEntry) -> Option<Scene> {
        // Signed: overlapping cues produce a negative pause and never split
        let pause_ms = self
            .previous_end_ms
            .map_or(0, |prev_end| cue.start_time_ms as i64 - prev_end as i64);

        let closed = if pause_ms >= self.threshold_ms as i64 {
            self.current.take().map(SceneBuilder::freeze)
        } else {
            None
        };

        self.current
            .get_or_insert_with(|| SceneBuilder::open(cue))
            .push(cue);
        self.previous_end_ms = Some(cue.end_time_ms);

        closed
    }

    /// Close the open scene, if it holds any cue.
    pub fn finish(self) -> Option<Scene> {
        self.current
            .filter(|builder| !builder.texts.is_empty())
            .map(SceneBuilder::freeze)
    }
}

/// Splits an ordered cue list into scenes at long pauses.
#[derive(Debug, Clone, Copy)]
pub struct SceneSegmenter {
    threshold_ms: u64,
}

impl Default for SceneSegmenter {
    fn default() -> Self {
        Self {
            threshold_ms: (DEFAULT_PAUSE_THRESHOLD_SECS * 1000.0) as u64,
        }
    }
}

impl SceneSegmenter {
    /// Create a segmenter; the threshold is rounded up to whole milliseconds.
    pub fn new(pause_threshold_secs: f64) -> Result<Self, SceneError> {
        if !pause_threshold_secs.is_finite() || pause_threshold_secs <= 0.0 {
            return Err(SceneError::InvalidThreshold(pause_threshold_secs));
        }

        Ok(Self {
            threshold_ms: Self::threshold_to_ms(pause_threshold_secs),
        })
    }

    // Cue times are whole milliseconds, so `gap_ms >= ceil(secs * 1000)`
    // is exactly `gap >= secs`. Float noise such as 1.1 * 1000 is snapped first.
    fn threshold_to_ms(pause_threshold_secs: f64) -> u64 {
        let scaled = pause_threshold_secs * 1000.0;
        let nearest = scaled.round();
        let ms = if (scaled - nearest).abs() < 1e-6 { nearest } else { scaled.ceil() };
        (ms as u64).max(1)
    }

    /// Pause threshold in effect.
    pub fn pause_threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }

    /// Segment cues (assumed sorted by start time) into scenes.
    pub fn segment(&self, cues: &[SubtitleEntry]) -> Vec<Scene> {
        let mut state = SegmenterState::new(self.threshold_ms);
        let mut scenes: Vec<Scene> = cues.iter().filter_map(|cue| state.advance(cue)).collect();
        scenes.extend(state.finish());

        debug!(
            "Segmented {} cues into {} scenes (threshold {:?})",
            cues.len(),
            scenes.len(),
            self.pause_threshold()
        );

        scenes
    }
}

/// Segment cues with an explicit threshold in seconds.
pub fn segment(cues: &[SubtitleEntry], pause_threshold_secs: f64) -> Result<Vec<Scene>, SceneError> {
    Ok(SceneSegmenter::new(pause_threshold_secs)?.segment(cues))
}
