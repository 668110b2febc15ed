use std::sync::LazyLock;

use regex::Regex;

// A record starts where its leading field label opens an object literal.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*chapterNumber\s*:\s*\d+").unwrap());

/// Split raw seed text into candidate record spans, one per record-start
/// marker. A span runs from its marker to the next marker, or to the
/// closing array bracket (end of input if there is none) for the last one.
///
/// Spans are never empty and never overlap. Zero markers means zero spans,
/// not an error; malformed input at worst yields one span covering the
/// whole remainder.
pub fn candidate_spans(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = MARKER_RE.find_iter(text).map(|m| m.start()).collect();

    let mut spans = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = match starts.get(i + 1) {
            Some(&next) => next,
            None => start + last_span_end(&text[start..]),
        };
        let span = trim_span(&text[start..end]);
        if !span.is_empty() {
            spans.push(span);
        }
    }
    spans
}

/// End of the last span: the closing array bracket when the record's own
/// brace closes before it, otherwise end of input (a bare object whose
/// trailing list must not be cut, or an unterminated record).
fn last_span_end(rest: &str) -> usize {
    match rest.rfind(']') {
        Some(p) if rest[..p].contains('}') => p,
        _ => rest.len(),
    }
}

/// Trim trailing delimiter noise back to the last well-formed closing brace.
fn trim_span(span: &str) -> &str {
    let trimmed = span.trim_end().trim_end_matches(',').trim_end();
    if trimmed.ends_with('}') {
        return trimmed;
    }
    match trimmed.rfind('}') {
        Some(pos) => &trimmed[..=pos],
        None => trimmed,
    }
}
