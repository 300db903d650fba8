//! Vector-index matches → `search_results` items.
//!
//! Each output field is taken from the first *truthy* metadata field in a
//! fixed precedence list. Truthy means present and not `null`, `false`, `0`
//! or `""`. The precedence order is part of the contract with the consuming
//! platform and must not be reordered.

use index::ScoredMatch;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TITLE_FIELDS: [&str; 2] = ["title", "document_title"];
const BODY_FIELDS: [&str; 2] = ["text", "chunk_text"];
const URL_FIELDS: [&str; 2] = ["url", "document_url"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One item of `search_results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub result_metadata: ResultMetadata,
    pub title: String,
    pub body: String,
    /// Absent from the JSON (not `null`) when no URL field is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Response body of a successful search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_results: Vec<SearchResult>,
}

/// Map one match. `title` falls back to the match id, `body` to `""`.
pub fn map_match(m: &ScoredMatch) -> SearchResult {
    let empty = Map::new();
    let md = m.metadata.as_ref().unwrap_or(&empty);

    SearchResult {
        result_metadata: ResultMetadata { score: m.score },
        title: first_truthy(md, &TITLE_FIELDS).unwrap_or_else(|| m.id.clone()),
        body: first_truthy(md, &BODY_FIELDS).unwrap_or_default(),
        url: first_truthy(md, &URL_FIELDS),
    }
}

/// Map every match, preserving rank order.
pub fn map_matches(matches: &[ScoredMatch]) -> Vec<SearchResult> {
    matches.iter().map(map_match).collect()
}

fn first_truthy(md: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| md.get(*key))
        .find(|value| is_truthy(value))
        .map(render)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
