use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One normalized chapter of study notes. Field names serialize to the
/// camelCase shape used by the application's JSON data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterNote {
    pub chapter_number: u32,
    pub title: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub objectives: Vec<String>,
    pub tags: Vec<String>,
    pub book_title: String,
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

/// A candidate record that failed normalization, with enough context to
/// find it again in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub source: String,
    pub index: usize,
    pub reason: String,
}

/// Pipeline output: accepted notes sorted ascending by chapter number,
/// plus everything that went wrong along the way.
#[derive(Debug, Default)]
pub struct RecoveredSet {
    pub notes: Vec<ChapterNote>,
    pub rejections: Vec<Rejection>,
    pub source_errors: Vec<String>,
}

impl RecoveredSet {
    pub fn chapter_numbers(&self) -> Vec<u32> {
        self.notes.iter().map(|n| n.chapter_number).collect()
    }

    /// Chapter numbers that appear more than once. Duplicates are passed
    /// through the pipeline unchanged; callers decide what to do about them.
    pub fn duplicate_numbers(&self) -> Vec<u32> {
        self.notes
            .iter()
            .map(|n| n.chapter_number)
            .duplicates()
            .collect()
    }

    /// Chapters of the book (1..=chapter_count) with no recovered note.
    pub fn missing_numbers(&self, chapter_count: u32) -> Vec<u32> {
        let present: HashSet<u32> = self.chapter_numbers().into_iter().collect();
        (1..=chapter_count).filter(|n| !present.contains(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(n: u32) -> ChapterNote {
        ChapterNote {
            chapter_number: n,
            title: format!("Chapter {}", n),
            content: String::new(),
            key_points: vec![],
            objectives: vec![],
            tags: vec![],
            book_title: "Test Book".into(),
            completed: false,
        }
    }

    #[test]
    fn duplicates_reported_once() {
        let set = RecoveredSet {
            notes: vec![note(1), note(2), note(2), note(2), note(5)],
            ..Default::default()
        };
        assert_eq!(set.duplicate_numbers(), vec![2]);
    }

    #[test]
    fn missing_numbers_against_book() {
        let set = RecoveredSet {
            notes: vec![note(1), note(3)],
            ..Default::default()
        };
        assert_eq!(set.missing_numbers(4), vec![2, 4]);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(note(7)).unwrap();
        assert_eq!(json["chapterNumber"], 7);
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("bookTitle").is_some());
    }
}
