//! The recovery pipeline: scan raw text for candidate record spans, pull
//! typed fields out of each span, reconcile aliased field names, and
//! normalize into canonical records. JSON exports skip the scanning step,
//! since their objects already are raw field maps.

pub mod aliases;
pub mod fields;
pub mod json;
pub mod normalize;
pub mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::record::{ChapterNote, Rejection, RecoveredSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Loosely-formatted seed source listing with embedded record literals.
    SeedText,
    /// Parsed JSON export (list, `{chapters}`, `{data}`, or bare object).
    Json,
}

impl SourceKind {
    /// `.json` files are parsed as exports; everything else is scanned as
    /// seed text.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SourceKind::Json,
            _ => SourceKind::SeedText,
        }
    }
}

/// Run the pipeline across all sources, merging accepted records and
/// sorting ascending by chapter number. The sort is stable, so duplicate
/// chapter numbers keep their encounter order: they are passed through,
/// never deduplicated or overwritten.
///
/// Unreadable or unparsable sources are recorded and skipped; a run always
/// completes.
pub fn run(paths: &[PathBuf], book_title: &str) -> RecoveredSet {
    let mut set = RecoveredSet::default();

    for path in paths {
        match recover_source(path, book_title, &mut set) {
            Ok(count) => info!(source = %path.display(), records = count, "recovered source"),
            Err(err) => {
                warn!(%err, "skipping source");
                set.source_errors.push(err.to_string());
            }
        }
    }

    set.notes.sort_by_key(|n| n.chapter_number);
    set
}

fn recover_source(
    path: &Path,
    book_title: &str,
    set: &mut RecoveredSet,
) -> Result<usize, SourceError> {
    let label = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: label.clone(),
        source,
    })?;

    let (notes, rejections) = recover_text(SourceKind::detect(path), &label, &text, book_title)?;
    let count = notes.len();
    set.notes.extend(notes);
    set.rejections.extend(rejections);
    Ok(count)
}

/// Recover records from one in-memory source. Returned notes are in
/// encounter order; the caller owns merging and sorting.
pub fn recover_text(
    kind: SourceKind,
    label: &str,
    text: &str,
    book_title: &str,
) -> Result<(Vec<ChapterNote>, Vec<Rejection>), SourceError> {
    let mut notes = Vec::new();
    let mut rejections = Vec::new();

    match kind {
        SourceKind::SeedText => {
            for (index, span) in scanner::candidate_spans(text).iter().enumerate() {
                let raw = fields::extract_raw(span);
                match normalize::normalize(&raw, label, index, book_title) {
                    Ok(note) => notes.push(note),
                    Err(rejection) => rejections.push(rejection),
                }
            }
        }
        SourceKind::Json => {
            let root: Value = serde_json::from_str(text).map_err(|source| SourceError::Parse {
                path: label.to_string(),
                source,
            })?;
            for (index, item) in json::record_items(root).iter().enumerate() {
                match json::as_raw_map(item) {
                    Some(raw) => match normalize::normalize(raw, label, index, book_title) {
                        Ok(note) => notes.push(note),
                        Err(rejection) => rejections.push(rejection),
                    },
                    None => rejections.push(Rejection {
                        source: label.to_string(),
                        index,
                        reason: format!("not an object: {item}"),
                    }),
                }
            }
        }
    }

    Ok((notes, rejections))
}
