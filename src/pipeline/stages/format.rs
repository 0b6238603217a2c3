use chrono::Utc;

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::{EditedManuscript, FormattedManuscript};
use crate::outcome::Outcome;
use crate::pipeline::Stage;

/// Stage that lays out an edited manuscript according to the configured
/// style guide
///
/// # Failures
/// - `NoEditorialNotes` when the manuscript skipped the editorial pass
pub struct FormatStage {
    format_type: String,
}

impl FormatStage {
    pub fn new(config: &PublishingConfig) -> Self {
        Self {
            format_type: config.format_type.clone(),
        }
    }
}

impl Default for FormatStage {
    fn default() -> Self {
        Self::new(&PublishingConfig::default())
    }
}

impl Stage<EditedManuscript, FormattedManuscript, FolioError> for FormatStage {
    fn execute(&self, edited: EditedManuscript) -> Outcome<FormattedManuscript, FolioError> {
        if edited.editorial_notes.is_empty() {
            return Outcome::failure(FolioError::NoEditorialNotes);
        }

        app_log!(
            LogLevel::Debug,
            "pipeline::format",
            "Formatting manuscript {} as {}",
            edited.id,
            self.format_type
        );

        Outcome::success(FormattedManuscript {
            id: edited.id,
            title: edited.title,
            formatted_content: edited.content + "\nFormatted according to style guide...",
            author: edited.author,
            format_type: self.format_type.clone(),
            format_date: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "Format Manuscript"
    }
}

pub fn format_manuscript(edited: EditedManuscript) -> Outcome<FormattedManuscript, FolioError> {
    FormatStage::default().execute(edited)
}
