use chrono::Utc;

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::Manuscript;
use crate::outcome::Outcome;
use crate::pipeline::Stage;

/// Stage that looks up a submitted manuscript by id
///
/// There is no manuscript store: any positive id yields a manuscript built
/// from the configured title, author and content.
///
/// # Failures
/// - `InvalidManuscriptId` when the id is zero or negative
pub struct FetchStage {
    config: PublishingConfig,
}

impl FetchStage {
    pub fn new(config: PublishingConfig) -> Self {
        Self { config }
    }
}

impl Default for FetchStage {
    fn default() -> Self {
        Self::new(PublishingConfig::default())
    }
}

impl Stage<i64, Manuscript, FolioError> for FetchStage {
    fn execute(&self, manuscript_id: i64) -> Outcome<Manuscript, FolioError> {
        if manuscript_id <= 0 {
            return Outcome::failure(FolioError::InvalidManuscriptId);
        }

        app_log!(
            LogLevel::Debug,
            "pipeline::fetch",
            "Fetched manuscript {}",
            manuscript_id
        );

        Outcome::success(Manuscript {
            id: manuscript_id,
            title: self.config.default_title.clone(),
            content: self.config.initial_content.clone(),
            author: self.config.default_author.clone(),
            submission_date: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "Fetch Manuscript"
    }
}

/// Fetch with the default configuration
pub fn fetch_manuscript(manuscript_id: i64) -> Outcome<Manuscript, FolioError> {
    FetchStage::default().execute(manuscript_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PublishingConfigBuilder;

    #[test]
    fn test_fetch_rejects_non_positive_ids() {
        for id in [0, -1, i64::MIN] {
            let outcome = fetch_manuscript(id);
            assert!(matches!(outcome.error(), Some(FolioError::InvalidManuscriptId)));
        }
    }

    #[test]
    fn test_fetch_builds_manuscript() {
        let manuscript = fetch_manuscript(42).into_value().unwrap();
        assert_eq!(manuscript.id, 42);
        assert_eq!(manuscript.title, "The Art of Programming");
        assert_eq!(manuscript.content, "Initial content...");
        assert_eq!(manuscript.author, "John Doe");
    }

    #[test]
    fn test_fetch_uses_config() {
        let config = PublishingConfigBuilder::new()
            .default_author("Ada Lovelace")
            .build()
            .unwrap();
        let manuscript = FetchStage::new(config).execute(7).into_value().unwrap();
        assert_eq!(manuscript.author, "Ada Lovelace");
    }

    #[test]
    fn test_fetch_stage_name() {
        assert_eq!(FetchStage::default().name(), "Fetch Manuscript");
    }
}
