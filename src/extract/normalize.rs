use serde_json::{Map, Value};

use super::aliases::{self, Concept};
use crate::record::{ChapterNote, Rejection};

/// Validate and coerce one reconciled raw map into a [`ChapterNote`].
///
/// The chapter number must be present and coercible to a non-negative
/// integer (integer or numeric string); anything else rejects the whole
/// record. Every other field degrades to a default instead of rejecting.
/// Pure transform, no side effects.
pub fn normalize(
    raw: &Map<String, Value>,
    source: &str,
    index: usize,
    book_title: &str,
) -> Result<ChapterNote, Rejection> {
    let reject = |reason: String| Rejection {
        source: source.to_string(),
        index,
        reason,
    };

    let chapter_number = match aliases::resolve(raw, Concept::ChapterNumber) {
        Some(value) => coerce_number(value)
            .ok_or_else(|| reject(format!("chapter number is not a non-negative integer: {value}")))?,
        None => return Err(reject("missing chapter number".to_string())),
    };

    let title = match aliases::resolve(raw, Concept::Title) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("Chapter {chapter_number}"),
    };

    let content = match aliases::resolve(raw, Concept::Content) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    Ok(ChapterNote {
        chapter_number,
        title,
        content,
        key_points: string_list(aliases::resolve(raw, Concept::KeyPoints)),
        objectives: string_list(aliases::resolve(raw, Concept::Objectives)),
        tags: string_list(aliases::resolve(raw, Concept::Tags)),
        book_title: book_title.to_string(),
        completed: false,
    })
}

fn coerce_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Non-list-shaped values coerce to an empty list. Scalar elements are
/// stringified; structured elements are dropped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}
