use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::outcome::Outcome;

/// A single typed step in a pipeline
///
/// A stage takes the previous stage's output by value and either produces
/// the next value or fails. Failures are returned as [`Outcome::Failure`],
/// never panicked.
///
/// # Example
/// ```
/// use folio_lib::outcome::Outcome;
/// use folio_lib::pipeline::Stage;
///
/// struct Shout;
///
/// impl Stage<String, String, String> for Shout {
///     fn execute(&self, input: String) -> Outcome<String, String> {
///         if input.is_empty() {
///             return Outcome::failure("nothing to shout".to_string());
///         }
///         Outcome::success(input.to_uppercase())
///     }
///
///     fn name(&self) -> &str {
///         "Shout"
///     }
/// }
/// ```
pub trait Stage<I, O, E> {
    fn execute(&self, input: I) -> Outcome<O, E>;

    /// Get stage name for logging and progress tracking
    fn name(&self) -> &str;
}

/// Adapts a named function or closure into a [`Stage`]
pub struct FnStage<F> {
    name: String,
    func: F,
}

impl<F> FnStage<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<I, O, E, F> Stage<I, O, E> for FnStage<F>
where
    F: Fn(I) -> Outcome<O, E>,
{
    fn execute(&self, input: I) -> Outcome<O, E> {
        (self.func)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Result of a pipeline stage execution
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    /// Stage name
    pub stage_name: String,

    /// Whether the stage succeeded
    pub success: bool,

    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Duration of execution
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl StageResult {
    pub fn success(stage_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: true,
            error: None,
            duration,
        }
    }

    pub fn failure(
        stage_name: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

/// Result of a complete pipeline execution
///
/// Stages after a failure never run, so they do not appear in
/// `stage_results`.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub pipeline_name: String,

    pub success: bool,

    pub stage_results: Vec<StageResult>,

    /// Stages declared on the pipeline, whether or not they ran
    pub total_stages: usize,

    #[serde(rename = "total_duration_ms", serialize_with = "serialize_millis")]
    pub total_duration: Duration,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResult {
    pub fn success(
        pipeline_name: impl Into<String>,
        stage_results: Vec<StageResult>,
        total_stages: usize,
        total_duration: Duration,
    ) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            success: true,
            stage_results,
            total_stages,
            total_duration,
            error: None,
        }
    }

    pub fn failure(
        pipeline_name: impl Into<String>,
        stage_results: Vec<StageResult>,
        total_stages: usize,
        error: impl Into<String>,
        total_duration: Duration,
    ) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            success: false,
            stage_results,
            total_stages,
            total_duration,
            error: Some(error.into()),
        }
    }

    /// Get the number of stages that actually ran
    pub fn executed_stages(&self) -> usize {
        self.stage_results.len()
    }

    /// Stages short-circuited by an earlier failure
    pub fn short_circuited_stages(&self) -> usize {
        self.total_stages.saturating_sub(self.stage_results.len())
    }

    /// Get the stage that failed (if any)
    pub fn failed_stage(&self) -> Option<&StageResult> {
        self.stage_results.iter().find(|r| !r.success)
    }
}
