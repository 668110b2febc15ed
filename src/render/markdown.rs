use std::fmt::Write;

use crate::record::RecoveredSet;

/// One band of the book's table of contents.
#[derive(Debug, Clone, Copy)]
pub struct SectionBand {
    pub lower: u32,
    pub upper: u32,
    pub label: &'static str,
}

/// Fixed section table for the 41-chapter book.
pub const SECTIONS: &[SectionBand] = &[
    SectionBand { lower: 1, upper: 6, label: "Foundation (1-6)" },
    SectionBand { lower: 7, upper: 14, label: "Basic Skills & Life Span (7-14)" },
    SectionBand { lower: 15, upper: 24, label: "Medical Emergencies (15-24)" },
    SectionBand { lower: 25, upper: 33, label: "Trauma (25-33)" },
    SectionBand { lower: 34, upper: 36, label: "Special Populations (34-36)" },
    SectionBand { lower: 37, upper: 39, label: "Operations (37-39)" },
    SectionBand { lower: 40, upper: 41, label: "Advanced Topics (40-41)" },
];

/// The band a chapter belongs to. Out-of-range chapters land in the nearest
/// band so no recovered note is ever dropped from the document.
pub fn section_for(chapter_number: u32) -> &'static SectionBand {
    SECTIONS
        .iter()
        .find(|band| chapter_number <= band.upper)
        .unwrap_or(&SECTIONS[SECTIONS.len() - 1])
}

/// Render the recovered set as a section-grouped markdown study guide.
/// Notes are expected sorted; section headers are emitted on band changes.
pub fn render(set: &RecoveredSet, book_title: &str, chapter_count: u32) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "# RECOVERED STUDY NOTES\n## {}\n\n*Complete recovery of the study notes*\n\n---\n",
        book_title
    );

    let mut current_label: Option<&str> = None;
    for note in &set.notes {
        let band = section_for(note.chapter_number);
        if current_label != Some(band.label) {
            let _ = write!(out, "\n## {}\n\n", band.label);
            current_label = Some(band.label);
        }

        let _ = write!(out, "### Chapter {}: {}\n\n", note.chapter_number, note.title);

        if !note.content.is_empty() {
            let _ = write!(out, "**Content:**\n{}\n\n", note.content);
        }
        if !note.key_points.is_empty() {
            out.push_str("**Key Points:**\n");
            for point in &note.key_points {
                let _ = writeln!(out, "- {}", point);
            }
            out.push('\n');
        }
        if !note.objectives.is_empty() {
            out.push_str("**Learning Objectives:**\n");
            for objective in &note.objectives {
                let _ = writeln!(out, "- {}", objective);
            }
            out.push('\n');
        }
        if !note.tags.is_empty() {
            let _ = write!(out, "**Tags:** {}\n\n", note.tags.join(", "));
        }

        out.push_str("---\n\n");
    }

    render_footer(&mut out, set, chapter_count);
    out
}

fn render_footer(out: &mut String, set: &RecoveredSet, chapter_count: u32) {
    let numbers = set.chapter_numbers();
    let range = match (numbers.iter().min(), numbers.iter().max()) {
        (Some(lo), Some(hi)) => format!("{}-{}", lo, hi),
        _ => "n/a".to_string(),
    };

    let _ = write!(
        out,
        "\n## Summary\n\n- **Chapters Recovered:** {}\n- **Chapter Range:** {}\n",
        set.notes.len(),
        range
    );

    let missing = set.missing_numbers(chapter_count);
    if missing.is_empty() {
        out.push_str("- **Missing Chapters:** none\n");
    } else {
        let listed: Vec<String> = missing.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "- **Missing Chapters:** {}", listed.join(", "));
    }
}
