use chrono::Utc;

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::{PublishedManuscript, ReviewedManuscript};
use crate::outcome::Outcome;
use crate::pipeline::Stage;

/// Stage that assigns an ISBN to an approved manuscript
///
/// ISBNs take the form `ISBN-{id}-{year}`.
///
/// # Failures
/// - `NotApproved` when review did not approve the manuscript
pub struct PublishStage {
    isbn_year: u16,
}

impl PublishStage {
    pub fn new(config: &PublishingConfig) -> Self {
        Self {
            isbn_year: config.isbn_year,
        }
    }
}

impl Default for PublishStage {
    fn default() -> Self {
        Self::new(&PublishingConfig::default())
    }
}

impl Stage<ReviewedManuscript, PublishedManuscript, FolioError> for PublishStage {
    fn execute(&self, reviewed: ReviewedManuscript) -> Outcome<PublishedManuscript, FolioError> {
        if !reviewed.approved {
            return Outcome::failure(FolioError::NotApproved);
        }

        let isbn = format!("ISBN-{}-{}", reviewed.id, self.isbn_year);
        app_log!(
            LogLevel::Info,
            "pipeline::publish",
            "Published manuscript {} as {}",
            reviewed.id,
            isbn
        );

        Outcome::success(PublishedManuscript {
            id: reviewed.id,
            title: reviewed.title,
            formatted_content: reviewed.formatted_content,
            author: reviewed.author,
            isbn,
            publish_date: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "Publish Manuscript"
    }
}

pub fn publish_manuscript(reviewed: ReviewedManuscript) -> Outcome<PublishedManuscript, FolioError> {
    PublishStage::default().execute(reviewed)
}
