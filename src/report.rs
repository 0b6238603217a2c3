//! Rendering of a finished publishing run for the console

use chrono::Local;
use serde::Serialize;

use crate::error::{FolioError, FolioResult};
use crate::logger::LogEntry;
use crate::manuscript::PublishedManuscript;
use crate::outcome::Outcome;
use crate::pipeline::PipelineResult;

/// JSON shape of a publishing run
#[derive(Debug, Serialize)]
pub struct PublishReport<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<&'a PublishedManuscript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<&'a PipelineResult>,
    #[serde(skip_serializing_if = "is_empty_log")]
    pub log: &'a [LogEntry],
}

fn is_empty_log(log: &&[LogEntry]) -> bool {
    log.is_empty()
}

impl<'a> PublishReport<'a> {
    pub fn new(
        outcome: &'a Outcome<PublishedManuscript, FolioError>,
        pipeline: Option<&'a PipelineResult>,
        log: &'a [LogEntry],
    ) -> Self {
        Self {
            success: outcome.is_success(),
            published: outcome.value(),
            error: outcome.error().map(|e| e.to_string()),
            pipeline,
            log,
        }
    }
}

/// Human-readable report, one field per line
pub fn render_text(outcome: &Outcome<PublishedManuscript, FolioError>) -> String {
    match outcome {
        Outcome::Success(published) => format!(
            "Successfully published!\nTitle: {}\nAuthor: {}\nISBN: {}\nPublish Date: {}",
            published.title,
            published.author,
            published.isbn,
            publish_date_display(published),
        ),
        Outcome::Failure(error) => format!("Error in publishing pipeline: {}", error),
    }
}

/// One line per entry, oldest first
pub fn render_log(log: &[LogEntry]) -> String {
    log.iter()
        .map(|entry| {
            format!(
                "{} [{}] {}: {}",
                entry.timestamp.with_timezone(&Local).format("%H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.source,
                entry.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Publish date in local time, `ctime` style
fn publish_date_display(published: &PublishedManuscript) -> String {
    published
        .publish_date
        .with_timezone(&Local)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

pub fn render_json(
    outcome: &Outcome<PublishedManuscript, FolioError>,
    pipeline: Option<&PipelineResult>,
    log: &[LogEntry],
) -> FolioResult<String> {
    let report = PublishReport::new(outcome, pipeline, log);
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogLevel;
    use chrono::{TimeZone, Utc};

    fn published() -> PublishedManuscript {
        PublishedManuscript {
            id: 42,
            title: "The Art of Programming".to_string(),
            formatted_content: "Initial content...".to_string(),
            author: "John Doe".to_string(),
            isbn: "ISBN-42-2023".to_string(),
            publish_date: Utc.with_ymd_and_hms(2023, 3, 7, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_text_success() {
        let text = render_text(&Outcome::success(published()));
        let local = Utc
            .with_ymd_and_hms(2023, 3, 7, 9, 5, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%a %b %e %H:%M:%S %Y");
        assert_eq!(
            text,
            format!(
                "Successfully published!\nTitle: The Art of Programming\nAuthor: John Doe\nISBN: ISBN-42-2023\nPublish Date: {}",
                local
            )
        );
    }

    #[test]
    fn test_publish_date_uses_local_time() {
        let published = published();
        let expected = published.publish_date.with_timezone(&Local).naive_local();
        let shown = publish_date_display(&published);

        assert_eq!(shown, expected.format("%a %b %e %H:%M:%S %Y").to_string());
        assert!(!shown.contains("UTC"));
    }

    #[test]
    fn test_render_text_failure() {
        let text = render_text(&Outcome::failure(FolioError::InvalidManuscriptId));
        assert_eq!(text, "Error in publishing pipeline: Invalid manuscript ID");
    }

    #[test]
    fn test_render_json_failure() {
        let json = render_json(&Outcome::failure(FolioError::NotApproved), None, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Manuscript not approved");
        assert!(value.get("published").is_none());
    }

    #[test]
    fn test_render_json_success() {
        let json = render_json(&Outcome::success(published()), None, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["published"]["isbn"], "ISBN-42-2023");
        assert!(value.get("log").is_none());
    }

    #[test]
    fn test_render_log_lines() {
        let entry = |level, message: &str| LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            source: "pipeline".to_string(),
            context: None,
        };
        let log = vec![
            entry(LogLevel::Info, "Starting pipeline"),
            entry(LogLevel::Warn, "Stage failed"),
        ];

        let lines: Vec<String> = render_log(&log).lines().map(str::to_string).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" [info] pipeline: Starting pipeline"));
        assert!(lines[1].ends_with(" [warn] pipeline: Stage failed"));

        let json = render_json(&Outcome::failure(FolioError::NotApproved), None, &log).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["log"][1]["message"], "Stage failed");
    }
}
