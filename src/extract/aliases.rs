use serde_json::{Map, Value};

/// The canonical field concepts a record can carry. Each concept accepts a
/// fixed, priority-ordered list of historical field-name spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concept {
    ChapterNumber,
    Title,
    Content,
    KeyPoints,
    Objectives,
    Tags,
}

impl Concept {
    pub const ALL: [Concept; 6] = [
        Concept::ChapterNumber,
        Concept::Title,
        Concept::Content,
        Concept::KeyPoints,
        Concept::Objectives,
        Concept::Tags,
    ];

    /// Accepted spellings, most authoritative first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Concept::ChapterNumber => &["chapterNumber", "number", "id", "chapter"],
            Concept::Title => &["title", "name"],
            Concept::Content => &["content", "description", "text"],
            Concept::KeyPoints => &["keyPoints", "key_points", "points", "highlights"],
            Concept::Objectives => &[
                "objectives",
                "learningObjectives",
                "learning_objectives",
                "goals",
            ],
            Concept::Tags => &["tags", "categories", "keywords"],
        }
    }
}

/// Resolve a concept against a raw record map: first alias with a present,
/// non-null value wins. Returns `None` when the concept is absent; the
/// normalizer decides the default, not this lookup.
pub fn resolve<'a>(raw: &'a Map<String, Value>, concept: Concept) -> Option<&'a Value> {
    concept
        .aliases()
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|v| !v.is_null())
}
