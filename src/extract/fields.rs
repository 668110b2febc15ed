use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::aliases::Concept;

static QUOTED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap());

#[derive(Debug, Clone, Copy)]
enum Kind {
    /// First integer literal after the label.
    Number,
    /// First quoted literal after the label, single line.
    Title,
    /// First quoted literal after the label, embedded newlines allowed.
    Body,
    /// Bracketed list after the label; nested structure is plain text.
    List,
}

struct FieldMatcher {
    key: &'static str,
    kind: Kind,
    re: Regex,
}

// One independent matcher per (concept, alias) pair. Each is fallible on
// its own, so a malformed sibling field never blocks a valid one.
static MATCHERS: LazyLock<Vec<FieldMatcher>> = LazyLock::new(build_matchers);

fn build_matchers() -> Vec<FieldMatcher> {
    let mut out = Vec::new();
    for concept in Concept::ALL {
        let kind = kind_of(concept);
        for alias in concept.aliases() {
            let pattern = match kind {
                Kind::Number => format!(r"\b{alias}\s*:\s*(-?\d+)"),
                Kind::Title => {
                    format!(r#"\b{alias}\s*:\s*(?:"([^"\n]+)"|'([^'\n]+)'|`([^`\n]+)`)"#)
                }
                Kind::Body => format!(r#"\b{alias}\s*:\s*(?:"([^"]*)"|'([^']*)'|`([^`]*)`)"#),
                Kind::List => format!(r"\b{alias}\s*:\s*\[([^\]]*)\]"),
            };
            out.push(FieldMatcher {
                key: alias,
                kind,
                re: Regex::new(&pattern).unwrap(),
            });
        }
    }
    out
}

fn kind_of(concept: Concept) -> Kind {
    match concept {
        Concept::ChapterNumber => Kind::Number,
        Concept::Title => Kind::Title,
        Concept::Content => Kind::Body,
        Concept::KeyPoints | Concept::Objectives | Concept::Tags => Kind::List,
    }
}

/// Extract a raw field map from one candidate span. Every matcher runs
/// independently against the span only; a field that does not match is
/// simply absent. The output is untyped; validation happens in the
/// normalizer.
pub fn extract_raw(span: &str) -> Map<String, Value> {
    let mut raw = Map::new();
    for matcher in MATCHERS.iter() {
        let Some(caps) = matcher.re.captures(span) else {
            continue;
        };
        let value = match matcher.kind {
            Kind::Number => match caps[1].parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => continue,
            },
            Kind::Title | Kind::Body => Value::String(first_group(&caps)),
            Kind::List => Value::Array(
                quoted_items(&caps[1]).into_iter().map(Value::String).collect(),
            ),
        };
        raw.insert(matcher.key.to_string(), value);
    }
    raw
}

/// Every quoted string literal inside a list body, in order.
pub fn quoted_items(list_body: &str) -> Vec<String> {
    QUOTED_ITEM_RE
        .captures_iter(list_body)
        .map(|caps| first_group(&caps))
        .collect()
}

fn first_group(caps: &Captures) -> String {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_span() {
        let span = r#"{ chapterNumber: 3, title: "Airway", content: "Basics", keyPoints: ["A","B"] }"#;
        let raw = extract_raw(span);
        assert_eq!(raw["chapterNumber"], json!(3));
        assert_eq!(raw["title"], json!("Airway"));
        assert_eq!(raw["content"], json!("Basics"));
        assert_eq!(raw["keyPoints"], json!(["A", "B"]));
        assert!(raw.get("objectives").is_none());
        assert!(raw.get("tags").is_none());
    }

    #[test]
    fn quote_styles() {
        let raw = extract_raw("{ chapterNumber: 1, title: 'Single' }");
        assert_eq!(raw["title"], json!("Single"));

        let raw = extract_raw("{ chapterNumber: 1, content: `template body` }");
        assert_eq!(raw["content"], json!("template body"));
    }

    #[test]
    fn body_tolerates_embedded_newlines() {
        let span = "{ chapterNumber: 2, content: `first line\nsecond line` }";
        let raw = extract_raw(span);
        assert_eq!(raw["content"], json!("first line\nsecond line"));
    }

    #[test]
    fn list_order_is_preserved() {
        let span = r#"{ chapterNumber: 4, tags: ["c", "a", "b"] }"#;
        let raw = extract_raw(span);
        assert_eq!(raw["tags"], json!(["c", "a", "b"]));
    }

    #[test]
    fn aliased_labels_are_found() {
        let span = r#"{ chapterNumber: 6, learningObjectives: ["x", "y"] }"#;
        let raw = extract_raw(span);
        assert_eq!(raw["learningObjectives"], json!(["x", "y"]));
    }

    #[test]
    fn missing_fields_are_absent_not_errors() {
        let raw = extract_raw("{ chapterNumber: 8 }");
        assert_eq!(raw["chapterNumber"], json!(8));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn malformed_sibling_does_not_block_valid_fields() {
        // Unterminated title literal; the list field still extracts.
        let span = "{ chapterNumber: 9, title: \"broken, keyPoints: [\"A\", \"B\"] }";
        let raw = extract_raw(span);
        assert_eq!(raw["chapterNumber"], json!(9));
        assert_eq!(raw["keyPoints"], json!(["A", "B"]));
    }

    #[test]
    fn label_must_stand_alone() {
        // "videoId" must not satisfy the "id" matcher.
        let raw = extract_raw("{ videoId: 42 }");
        assert!(raw.get("id").is_none());
    }

    #[test]
    fn multiline_list_items() {
        let span = "{ chapterNumber: 5, objectives: [\n  \"First\",\n  \"Second\",\n] }";
        let raw = extract_raw(span);
        assert_eq!(raw["objectives"], json!(["First", "Second"]));
    }
}
