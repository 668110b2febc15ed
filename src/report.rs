use std::fmt::Write;

use chrono::Utc;
use itertools::Itertools;

use crate::record::RecoveredSet;

/// Render the integration summary: counts, coverage against the book,
/// data-quality warnings, and the artifacts written by this run.
pub fn integration_summary(
    set: &RecoveredSet,
    book_title: &str,
    chapter_count: u32,
    artifacts: &[String],
) -> String {
    let numbers = set.chapter_numbers();
    let coverage = if chapter_count == 0 {
        0.0
    } else {
        set.notes.len() as f64 / chapter_count as f64 * 100.0
    };

    let mut out = String::new();
    let _ = write!(
        out,
        "# Integration Summary\n\n\
         - **Book:** {}\n\
         - **Generated:** {}\n\n\
         ## Statistics\n\n\
         - **Chapters Integrated:** {}\n\
         - **Coverage:** {}/{} chapters ({:.1}%)\n\
         - **Rejected Records:** {}\n",
        book_title,
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        set.notes.len(),
        set.notes.len(),
        chapter_count,
        coverage,
        set.rejections.len(),
    );

    if !numbers.is_empty() {
        let listed = numbers.iter().map(u32::to_string).join(", ");
        let _ = writeln!(out, "- **Chapters Available:** {}", listed);
    }

    let missing = set.missing_numbers(chapter_count);
    if missing.is_empty() {
        out.push_str("\n## Missing Chapters\n\nAll chapters present.\n");
    } else {
        let listed = missing.iter().map(u32::to_string).join(", ");
        let _ = write!(out, "\n## Missing Chapters\n\n{}\n", listed);
    }

    let duplicates = set.duplicate_numbers();
    if !duplicates.is_empty() {
        let listed = duplicates.iter().map(u32::to_string).join(", ");
        let _ = write!(
            out,
            "\n## Data Quality\n\nDuplicate chapter numbers passed through: {}\n",
            listed
        );
    }

    if !set.rejections.is_empty() {
        out.push_str("\n## Rejected Records\n\n");
        for rejection in &set.rejections {
            let _ = writeln!(
                out,
                "- {}[{}]: {}",
                rejection.source, rejection.index, rejection.reason
            );
        }
    }

    if !set.source_errors.is_empty() {
        out.push_str("\n## Source Errors\n\n");
        for err in &set.source_errors {
            let _ = writeln!(out, "- {}", err);
        }
    }

    if !artifacts.is_empty() {
        out.push_str("\n## Files Created\n\n");
        for artifact in artifacts {
            let _ = writeln!(out, "- `{}`", artifact);
        }
    }

    out
}
