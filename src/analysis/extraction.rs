/*!
 * Recovery of the structured payload from free-form model output.
 *
 * Models wrap JSON in markdown fences, surround it with prose, or return
 * nothing usable at all. Candidates are taken from an ordered list of
 * strategies; the first match is decoded, and any decode failure yields
 * the all-empty insights record.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::scenes::SceneInsights;

// @const: First fenced block, optional json tag, inner content trimmed
static FENCED_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]+?)\s*```").unwrap()
});

// @const: First '{' through last '}'
static BRACE_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\{[\s\S]+\})").unwrap()
});

/// One way of locating a payload candidate in raw text.
pub trait ExtractionStrategy: Send + Sync {
    /// Name for diagnostics
    fn name(&self) -> &'static str;

    /// Candidate payload, or `None` when this strategy does not match
    fn extract<'a>(&self, raw: &'a str) -> Option<&'a str>;
}

/// Inner content of a ```` ``` ```` / ```` ```json ```` fenced block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlock;

impl ExtractionStrategy for FencedBlock {
    fn name(&self) -> &'static str {
        "fenced-block"
    }

    fn extract<'a>(&self, raw: &'a str) -> Option<&'a str> {
        FENCED_BLOCK_REGEX
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Widest `{ ... }` span in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceSpan;

impl ExtractionStrategy for BraceSpan {
    fn name(&self) -> &'static str {
        "brace-span"
    }

    fn extract<'a>(&self, raw: &'a str) -> Option<&'a str> {
        BRACE_SPAN_REGEX
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// The whole text; always matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawText;

impl ExtractionStrategy for RawText {
    fn name(&self) -> &'static str {
        "raw-text"
    }

    fn extract<'a>(&self, raw: &'a str) -> Option<&'a str> {
        Some(raw)
    }
}

/// Why a response produced no insights.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeFailure {
    /// Candidate is not valid JSON
    Syntax(String),
    /// Candidate is valid JSON but not an object
    NotAnObject(&'static str),
}

impl std::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(message) => write!(f, "{}", message),
            Self::NotAnObject(kind) => write!(f, "expected a JSON object, found {}", kind),
        }
    }
}

/// Ordered chain of extraction strategies.
pub struct PayloadExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for PayloadExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(FencedBlock), Box::new(BraceSpan), Box::new(RawText)])
    }
}

impl PayloadExtractor {
    /// Chain evaluated in the given order.
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// First candidate found, with the name of the strategy that found it.
    pub fn candidate<'a>(&self, raw: &'a str) -> Option<(&'static str, &'a str)> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.extract(raw).map(|found| (strategy.name(), found)))
    }

    /// Decode the first candidate as a JSON object.
    pub fn decode(&self, raw: &str) -> Result<Map<String, Value>, DecodeFailure> {
        let candidate = self.candidate(raw).map_or(raw, |(_, found)| found);

        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(DecodeFailure::NotAnObject(json_kind(&other))),
            Err(e) => Err(DecodeFailure::Syntax(e.to_string())),
        }
    }

    /// Insights from a raw response. Never fails: undecodable payloads are
    /// logged and produce the empty record, missing fields default one by one.
    pub fn parse_insights(&self, raw: &str) -> SceneInsights {
        let raw = raw.trim();
        match self.decode(raw) {
            Ok(map) => insights_from_object(&map),
            Err(failure) => {
                warn!("Failed to parse response as JSON: {}", raw);
                warn!("Error details: {}", failure);
                SceneInsights::default()
            }
        }
    }
}

/// Parse a raw response with the default strategy chain.
pub fn parse_insights(raw: &str) -> SceneInsights {
    PayloadExtractor::default().parse_insights(raw)
}

fn insights_from_object(map: &Map<String, Value>) -> SceneInsights {
    SceneInsights {
        summary: text_field(map.get("summary")),
        characters: list_field(map.get("characters")),
        mood: text_field(map.get("mood")),
        cultural_references: list_field(map.get("cultural_references")),
    }
}

// Strings pass through; other scalars keep their JSON rendering.
fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other @ (Value::Bool(_) | Value::Number(_))) => other.to_string(),
        _ => String::new(),
    }
}

fn list_field(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(text)) => vec![text.clone()],
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
