//! Markdown export of notes.

use crate::model::note::Note;

/// Localized strings used in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLabels {
    pub title: String,
    pub note_heading: String,
}

/// Renders notes oldest first, one `##` section per note.
///
/// Returns `None` when there are no notes.
pub fn render_markdown(notes: &[Note], labels: &ExportLabels) -> Option<String> {
    if notes.is_empty() {
        return None;
    }
    let mut ordered: Vec<&Note> = notes.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut out = format!("# {}\n\n", labels.title);
    for note in ordered {
        out.push_str(&format!(
            "## {} {}\n\n{}\n\n---\n\n",
            labels.note_heading, note.timestamp, note.text
        ));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{render_markdown, ExportLabels};
    use crate::model::note::Note;

    fn labels() -> ExportLabels {
        ExportLabels {
            title: "Notes export".to_string(),
            note_heading: "Note from:".to_string(),
        }
    }

    #[test]
    fn sections_are_ordered_oldest_first() {
        let notes = vec![
            Note::new("2024-02-01 00:00:00", "later"),
            Note::new("2024-01-01 00:00:00", "earlier"),
        ];
        let markdown = render_markdown(&notes, &labels()).unwrap();
        assert!(markdown.starts_with("# Notes export\n\n## Note from: 2024-01-01 00:00:00\n\nearlier\n\n---\n\n"));
        assert!(markdown.find("earlier").unwrap() < markdown.find("later").unwrap());
    }

    #[test]
    fn no_notes_renders_nothing() {
        assert_eq!(render_markdown(&[], &labels()), None);
    }
}
