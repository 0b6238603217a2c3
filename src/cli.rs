use chrono::Utc;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::PublishingConfig;
use crate::error::{FolioError, FolioResult};
use crate::logger::{LogLevel, LOGGER};
use crate::pipeline::stages::{publishing_pipeline, revise_and_publish};
use crate::pipeline::PipelineContext;
use crate::report;

#[derive(Parser, Debug, Default)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Run a manuscript through the publishing pipeline")]
pub struct Cli {
    /// Manuscript to publish (prompted for on stdin when omitted)
    #[arg(long)]
    pub id: Option<i64>,

    /// JSON config file; overrides FOLIO_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Editorial note applied in place before formatting (repeatable)
    #[arg(long = "note")]
    pub notes: Vec<String>,

    /// Minimum log level (debug, info, warn or error) for the recorded run
    /// log and the default stderr filter; RUST_LOG overrides the latter
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the log recorded during the run after the report
    #[arg(long)]
    pub show_log: bool,
}

/// Parse a manuscript id the way a console read would: the leading integer
/// of the first word is taken and trailing text ignored. Input with no
/// leading digits reads as 0, which the fetch stage rejects.
pub fn parse_manuscript_id(line: &str) -> i64 {
    let word = line.split_whitespace().next().unwrap_or("");
    let sign_len = usize::from(word.starts_with(['-', '+']));
    let digits_len = word[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    match word[..sign_len + digits_len].parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            app_log!(
                LogLevel::Warn,
                "cli",
                "Could not read a manuscript id from {:?}",
                line.trim()
            );
            0
        }
    }
}

pub fn prompt_manuscript_id<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> FolioResult<i64> {
    write!(output, "Enter manuscript ID: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_manuscript_id(&line))
}

/// Default stderr filter when RUST_LOG is unset: the `--log-level` value,
/// or `warn` when it is missing or unknown
pub fn default_log_filter(cli: &Cli) -> &'static str {
    cli.log_level
        .as_deref()
        .and_then(LogLevel::parse)
        .map_or("warn", |level| level.as_str())
}

fn resolve_config(cli: &Cli) -> FolioResult<PublishingConfig> {
    let mut config = match &cli.config {
        Some(path) => PublishingConfig::load(path)?,
        None => PublishingConfig::from_env()?,
    };

    if let Some(level) = &cli.log_level {
        config.log_level = LogLevel::parse(level).ok_or_else(|| {
            FolioError::InvalidInput(format!("Unknown log level: {}", level))
        })?;
    }
    Ok(config)
}

/// Run one publishing request and write the report to `output`.
///
/// Returns whether the manuscript was published.
pub fn run_with<R: BufRead, W: Write>(cli: &Cli, input: &mut R, output: &mut W) -> FolioResult<bool> {
    let config = resolve_config(cli)?;
    LOGGER.set_min_level(config.log_level);
    let started = Utc::now();

    let manuscript_id = match cli.id {
        Some(id) => id,
        None => prompt_manuscript_id(input, output)?,
    };

    let (outcome, pipeline_report) = if cli.notes.is_empty() {
        let pipeline = publishing_pipeline(&config);
        let mut context = PipelineContext::default();
        context.set_metadata("manuscript_id", manuscript_id.to_string());
        let run = pipeline.execute(manuscript_id, &mut context);
        (run.outcome, Some(run.report))
    } else {
        app_log!(
            LogLevel::Info,
            "cli",
            "Publishing manuscript {} with {} extra revision(s)",
            manuscript_id,
            cli.notes.len()
        );
        (revise_and_publish(manuscript_id, &cli.notes, &config), None)
    };

    let log = if cli.show_log { LOGGER.logs_since(started) } else { Vec::new() };

    if cli.json {
        let json = report::render_json(&outcome, pipeline_report.as_ref(), &log)?;
        writeln!(output, "{}", json)?;
    } else {
        writeln!(output, "{}", report::render_text(&outcome))?;
        if !log.is_empty() {
            writeln!(output, "\n{}", report::render_log(&log))?;
        }
    }

    Ok(outcome.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_cli(cli: Cli, stdin: &str) -> (bool, String) {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut output = Vec::new();
        let published = run_with(&cli, &mut input, &mut output).unwrap();
        (published, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_manuscript_id() {
        assert_eq!(parse_manuscript_id(" 42\n"), 42);
        assert_eq!(parse_manuscript_id("-7"), -7);
        assert_eq!(parse_manuscript_id("forty-two"), 0);
        assert_eq!(parse_manuscript_id(""), 0);
    }

    #[test]
    fn test_parse_manuscript_id_takes_leading_integer() {
        assert_eq!(parse_manuscript_id("42abc\n"), 42);
        assert_eq!(parse_manuscript_id("42 7\n"), 42);
        assert_eq!(parse_manuscript_id("+9x"), 9);
        assert_eq!(parse_manuscript_id("-3-4"), -3);
        assert_eq!(parse_manuscript_id("-abc"), 0);
        assert_eq!(parse_manuscript_id("abc 42"), 0);
    }

    #[test]
    fn test_unreadable_config_is_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/ignored.json")),
            ..Cli::default()
        };
        let mut input = Cursor::new(b"42\n".to_vec());
        let mut output = Vec::new();
        assert!(run_with(&cli, &mut input, &mut output).is_err());
    }

    #[test]
    fn test_id_flag_skips_prompt() {
        let cli = Cli {
            id: Some(42),
            ..Cli::default()
        };
        let (published, text) = run_cli(cli, "");

        assert!(published);
        assert!(text.starts_with("Successfully published!\n"));
        assert!(text.contains("ISBN: ISBN-42-2023"));
        assert!(!text.contains("Enter manuscript ID"));
    }

    #[test]
    fn test_prompt_reads_stdin() {
        let cli = Cli {
            ..Cli::default()
        };
        let (published, text) = run_cli(cli, "0\n");

        assert!(!published);
        assert_eq!(
            text,
            "Enter manuscript ID: Error in publishing pipeline: Invalid manuscript ID\n"
        );
    }

    #[test]
    fn test_json_report_includes_pipeline() {
        let cli = Cli {
            id: Some(3),
            json: true,
            ..Cli::default()
        };
        let (_, text) = run_cli(cli, "");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["published"]["isbn"], "ISBN-3-2023");
        assert_eq!(value["pipeline"]["stage_results"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_notes_use_in_place_revision() {
        let cli = Cli {
            id: Some(5),
            json: true,
            notes: vec!["Expanded chapter 3".to_string()],
            ..Cli::default()
        };
        let (published, text) = run_cli(cli, "");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(published);
        assert!(value["published"]["formatted_content"]
            .as_str()
            .unwrap()
            .contains("Revised: Expanded chapter 3"));
        assert!(value.get("pipeline").is_none());
    }

    #[test]
    fn test_show_log_prints_recorded_run() {
        let cli = Cli {
            id: Some(8),
            show_log: true,
            ..Cli::default()
        };
        let (published, text) = run_cli(cli, "");

        assert!(published);
        let (report, log) = text.split_once("\n\n").unwrap();
        assert!(report.contains("ISBN: ISBN-8-2023"));
        assert!(log.contains("[info] pipeline: Starting pipeline 'publish-manuscript'"));
    }

    #[test]
    fn test_show_log_in_json_report() {
        let cli = Cli {
            id: Some(9),
            json: true,
            show_log: true,
            ..Cli::default()
        };
        let (_, text) = run_cli(cli, "");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let log = value["log"].as_array().unwrap();
        assert!(log
            .iter()
            .any(|entry| entry["source"] == "pipeline" && entry["level"] == "info"));
    }

    #[test]
    fn test_log_omitted_without_flag() {
        let cli = Cli {
            id: Some(10),
            json: true,
            ..Cli::default()
        };
        let (_, text) = run_cli(cli, "");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("log").is_none());
    }

    #[test]
    fn test_default_log_filter_follows_log_level() {
        let with_level = |level: &str| Cli {
            log_level: Some(level.to_string()),
            ..Cli::default()
        };

        assert_eq!(default_log_filter(&Cli::default()), "warn");
        assert_eq!(default_log_filter(&with_level("debug")), "debug");
        assert_eq!(default_log_filter(&with_level("Info")), "info");
        assert_eq!(default_log_filter(&with_level("loud")), "warn");
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let cli = Cli {
            id: Some(1),
            log_level: Some("loud".to_string()),
            ..Cli::default()
        };
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = run_with(&cli, &mut input, &mut output);
        assert!(matches!(result, Err(FolioError::InvalidInput(_))));
    }
}
