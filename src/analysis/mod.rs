/*!
 * Scene analysis with a language model.
 *
 * - `prompts`: the structured-extraction prompt
 * - `extraction`: payload recovery from unreliable model output
 * - `analyzer`: per-scene invocation with pacing
 */

pub mod analyzer;
pub mod extraction;
pub mod prompts;

// Re-export main types
pub use analyzer::{analyze, SceneAnalyzer};
pub use extraction::{parse_insights, BraceSpan, DecodeFailure, ExtractionStrategy, FencedBlock, PayloadExtractor, RawText};
pub use prompts::PromptTemplate;
