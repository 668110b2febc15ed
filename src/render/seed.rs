use std::fmt::Write;

use crate::record::ChapterNote;

/// SQL bootstrap for the application's study-notes table.
pub const SCHEMA_SQL: &str = "\
-- Check if study_notes table exists and create if needed
CREATE TABLE IF NOT EXISTS study_notes (
    id SERIAL PRIMARY KEY,
    chapter_number INTEGER NOT NULL,
    title VARCHAR(255) NOT NULL,
    content TEXT,
    book_title VARCHAR(255),
    tags TEXT[],
    key_points TEXT[],
    objectives TEXT[],
    is_completed BOOLEAN DEFAULT FALSE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_study_notes_chapter ON study_notes(chapter_number);
CREATE INDEX IF NOT EXISTS idx_study_notes_completed ON study_notes(is_completed);
";

const SCRIPT_HEADER: &str = r#"import { db } from './db';
import { studyNotes } from '../shared/schema';

export async function seedCompleteStudyNotes() {
  console.log("Seeding complete study notes...");

  const completeStudyNotes = [
"#;

const SCRIPT_FOOTER: &str = r#"  ];

  console.log("Clearing existing study notes...");
  await db.delete(studyNotes);

  console.log(`Inserting ${completeStudyNotes.length} study notes...`);
  for (const note of completeStudyNotes) {
    await db.insert(studyNotes).values(note);
  }

  return { success: true, count: completeStudyNotes.length };
}
"#;

/// Generate the TypeScript seeding script embedding every recovered note.
///
/// String-breaking characters (backticks and `${` in template-literal
/// bodies, quotes in titles) are escaped before embedding, never checked
/// after the fact. List fields are embedded as JSON array literals, which the
/// extractor can read back.
pub fn seed_script(notes: &[ChapterNote]) -> String {
    let mut out = String::from(SCRIPT_HEADER);

    for note in notes {
        let _ = write!(
            out,
            r#"    {{
      chapterNumber: {},
      title: '{}',
      content: `{}`,
      bookTitle: "{}",
      tags: {},
      keyPoints: {},
      objectives: {},
      isCompleted: false
    }},
"#,
            note.chapter_number,
            escape_single_quoted(&note.title),
            escape_template(&note.content),
            escape_double_quoted(&note.book_title),
            list_literal(&note.tags),
            list_literal(&note.key_points),
            list_literal(&note.objectives),
        );
    }

    out.push_str(SCRIPT_FOOTER);
    out
}

fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// JSON array literal: valid TypeScript, and re-parseable by the field
/// extractor's list matcher.
fn list_literal(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
