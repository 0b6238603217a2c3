use chrono::Utc;

use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::{EditedManuscript, Manuscript};
use crate::outcome::Outcome;
use crate::pipeline::Stage;

/// Stage that applies the editorial pass to a fetched manuscript
///
/// # Failures
/// - `EmptyContent` when the manuscript has no content
pub struct EditStage;

impl EditStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EditStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage<Manuscript, EditedManuscript, FolioError> for EditStage {
    fn execute(&self, manuscript: Manuscript) -> Outcome<EditedManuscript, FolioError> {
        if manuscript.content.is_empty() {
            return Outcome::failure(FolioError::EmptyContent);
        }

        app_log!(
            LogLevel::Debug,
            "pipeline::edit",
            "Editing manuscript {} ({} bytes)",
            manuscript.id,
            manuscript.content.len()
        );

        Outcome::success(EditedManuscript {
            id: manuscript.id,
            title: manuscript.title,
            content: manuscript.content + "\nEdited content...",
            author: manuscript.author,
            editorial_notes: vec![
                "Fixed grammar".to_string(),
                "Improved structure".to_string(),
            ],
            edit_date: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "Edit Manuscript"
    }
}

pub fn edit_manuscript(manuscript: Manuscript) -> Outcome<EditedManuscript, FolioError> {
    EditStage::new().execute(manuscript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::stages::fetch_manuscript;

    #[test]
    fn test_edit_appends_content_and_notes() {
        let edited = fetch_manuscript(3)
            .bind(edit_manuscript)
            .into_value()
            .unwrap();

        assert_eq!(edited.content, "Initial content...\nEdited content...");
        assert_eq!(edited.editorial_notes, vec!["Fixed grammar", "Improved structure"]);
        assert_eq!(edited.id, 3);
    }

    #[test]
    fn test_edit_rejects_empty_content() {
        let mut manuscript = fetch_manuscript(3).into_value().unwrap();
        manuscript.content.clear();

        let outcome = edit_manuscript(manuscript);
        assert!(matches!(outcome.error(), Some(FolioError::EmptyContent)));
    }
}
