//! Entry shape parser.
//!
//! Entries reach us from config files, environment variables and command
//! line arguments, so the same declaration may arrive as a real JSON value
//! or as a string that merely looks like one. [`parse_entry`] accepts all of
//! them and never fails: anything it cannot make sense of becomes a
//! `Single` path and is left to validation.

use indexmap::IndexMap;
use serde_json::Value;

use crate::lenient;
use crate::shape::{ClientServerEntry, EntryShape};

/// Entry used when the declaration is empty.
pub const FALLBACK_ENTRY: &str = "src/index.ts";

/// Parse a raw declaration into an [`EntryShape`].
///
/// # Example
///
/// ```
/// use pkgwiz_entry::{parse_entry, EntryShape};
/// use serde_json::json;
///
/// let shape = parse_entry(&json!(["src/a.ts", "src/b.ts"]));
/// assert_eq!(shape, EntryShape::Array(vec!["src/a.ts".into(), "src/b.ts".into()]));
///
/// let shape = parse_entry(&json!("src/*.ts"));
/// assert_eq!(shape, EntryShape::Single("src/*.ts".into()));
/// ```
pub fn parse_entry(raw: &Value) -> EntryShape {
    match raw {
        Value::Array(items) => EntryShape::Array(items.iter().map(stringify).collect()),
        Value::Object(map) => from_mapping(map),
        Value::String(s) => parse_entry_str(s),
        Value::Null => EntryShape::Single(FALLBACK_ENTRY.to_string()),
        Value::Bool(_) | Value::Number(_) => EntryShape::Single(raw.to_string()),
    }
}

/// Parse a string declaration.
///
/// Comma separated lists, JSON literals and JavaScript-style object or
/// array literals (bare keys, single quotes) are understood.
pub fn parse_entry_str(raw: &str) -> EntryShape {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EntryShape::Single(FALLBACK_ENTRY.to_string());
    }

    if trimmed.contains(',') && !trimmed.starts_with(['[', '{']) {
        let pieces: Vec<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
        if pieces.len() > 1 {
            return EntryShape::Array(pieces);
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return from_parsed(value, trimmed);
    }

    if looks_like_literal(trimmed) {
        let repaired = lenient::repair(trimmed);
        match serde_json::from_str::<Value>(&repaired) {
            Ok(value) => return from_parsed(value, trimmed),
            Err(err) => tracing::debug!(entry = trimmed, %err, "entry literal could not be repaired"),
        }
    }

    EntryShape::Single(trimmed.to_string())
}

/// Recurse into a value decoded from `source`.
fn from_parsed(value: Value, source: &str) -> EntryShape {
    match value {
        Value::String(inner) if inner.trim() != source => parse_entry_str(&inner),
        Value::String(_) | Value::Bool(_) | Value::Number(_) => {
            EntryShape::Single(source.to_string())
        }
        other => parse_entry(&other),
    }
}

fn from_mapping(map: &serde_json::Map<String, Value>) -> EntryShape {
    let labels: IndexMap<String, String> = map
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|path| (key.clone(), path.to_string())))
        .collect();

    match ClientServerEntry::from_map(labels) {
        Ok(entry) => EntryShape::ClientServer(entry),
        Err(labels) => EntryShape::Object(labels),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn looks_like_literal(s: &str) -> bool {
    (s.starts_with('[') && s.ends_with(']')) || (s.starts_with('{') && s.ends_with('}'))
}
