/*!
 * Scene segmentation.
 *
 * - `model`: frozen scene records and the analyzed output record
 * - `segmenter`: pause-based splitting of cues into scenes
 */

pub mod model;
pub mod segmenter;

// Re-export main types
pub use model::{AnalyzedScene, Scene, SceneInsights};
pub use segmenter::{segment, SceneSegmenter, SegmenterState, DEFAULT_PAUSE_THRESHOLD_SECS};
