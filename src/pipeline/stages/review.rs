use chrono::Utc;

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::{FormattedManuscript, ReviewedManuscript};
use crate::outcome::Outcome;
use crate::pipeline::Stage;

/// Stage that reviews a formatted manuscript
///
/// Review always approves a manuscript laid out in the required style.
///
/// # Failures
/// - `InvalidFormatType` when the manuscript uses a different style guide
pub struct ReviewStage {
    required_format: String,
}

impl ReviewStage {
    pub fn new(config: &PublishingConfig) -> Self {
        Self {
            required_format: config.format_type.clone(),
        }
    }
}

impl Default for ReviewStage {
    fn default() -> Self {
        Self::new(&PublishingConfig::default())
    }
}

impl Stage<FormattedManuscript, ReviewedManuscript, FolioError> for ReviewStage {
    fn execute(&self, formatted: FormattedManuscript) -> Outcome<ReviewedManuscript, FolioError> {
        if formatted.format_type != self.required_format {
            app_log!(
                LogLevel::Warn,
                "pipeline::review",
                "Manuscript {} uses {} but {} is required",
                formatted.id,
                formatted.format_type,
                self.required_format
            );
            return Outcome::failure(FolioError::InvalidFormatType);
        }

        Outcome::success(ReviewedManuscript {
            id: formatted.id,
            title: formatted.title,
            formatted_content: formatted.formatted_content,
            author: formatted.author,
            approved: true,
            review_comments: vec![
                "Excellent work".to_string(),
                "Ready for publication".to_string(),
            ],
            review_date: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "Review Manuscript"
    }
}

pub fn review_manuscript(formatted: FormattedManuscript) -> Outcome<ReviewedManuscript, FolioError> {
    ReviewStage::default().execute(formatted)
}
