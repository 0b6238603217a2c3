use serde_json::json;
use std::collections::HashMap;
use std::fmt::Display;
use std::time::Instant;

use super::context::PipelineContext;
use super::core::{FnStage, PipelineResult, Stage, StageResult};
use crate::logger::{LogLevel, LOGGER};
use crate::outcome::Outcome;

type Runner<I, O, E> = Box<dyn Fn(I, &mut PipelineContext) -> Outcome<O, E>>;

/// Pipeline executor that runs typed stages sequentially
///
/// Stages are chained with [`Outcome::bind`]: the first failure stops the
/// run and is returned unchanged as the pipeline's outcome.
///
/// # Example
/// ```
/// use folio_lib::outcome::Outcome;
/// use folio_lib::pipeline::Pipeline;
///
/// let pipeline = Pipeline::<i32, i32, String>::builder("digits")
///     .add_step("to string", |n: i32| Outcome::success(n.to_string()))
///     .add_step("length", |s: String| Outcome::success(s.len()))
///     .build();
///
/// let run = pipeline.run(12345);
/// assert_eq!(run.outcome, Outcome::success(5));
/// assert!(run.report.success);
/// ```
pub struct Pipeline<I, O, E> {
    name: String,
    stage_names: Vec<String>,
    runner: Runner<I, O, E>,
}

/// Final outcome of a run plus the per-stage report
#[derive(Debug)]
pub struct PipelineRun<O, E> {
    pub outcome: Outcome<O, E>,
    pub report: PipelineResult,
}

impl<I: 'static, E: Display + 'static> Pipeline<I, I, E> {
    /// Create a new pipeline builder taking `I` as its input
    pub fn builder(name: impl Into<String>) -> PipelineBuilder<I, I, E> {
        PipelineBuilder::new(name)
    }
}

impl<I, O, E: Display> Pipeline<I, O, E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage_count(&self) -> usize {
        self.stage_names.len()
    }

    pub fn stage_names(&self) -> &[String] {
        &self.stage_names
    }

    /// Execute with a fresh context and a random session id
    pub fn run(&self, input: I) -> PipelineRun<O, E> {
        let mut context = PipelineContext::default();
        self.execute(input, &mut context)
    }

    /// Execute the pipeline
    ///
    /// Per-stage results are recorded in `context` and copied into the
    /// returned report.
    pub fn execute(&self, input: I, context: &mut PipelineContext) -> PipelineRun<O, E> {
        app_log!(
            LogLevel::Info,
            "pipeline",
            "Starting pipeline '{}' with {} stages (session: {})",
            self.name,
            self.stage_names.len(),
            context.session_id()
        );

        context.begin(&self.name, self.stage_names.len());
        let pipeline_start = Instant::now();

        let outcome = (self.runner)(input, context);

        let total_duration = pipeline_start.elapsed();
        let stage_results = context.stage_results().to_vec();

        let report = match outcome.error() {
            None => {
                app_log!(
                    LogLevel::Info,
                    "pipeline",
                    "Pipeline '{}' completed successfully in {:.2}s (session: {})",
                    self.name,
                    total_duration.as_secs_f64(),
                    context.session_id()
                );
                PipelineResult::success(
                    &self.name,
                    stage_results,
                    self.stage_names.len(),
                    total_duration,
                )
            }
            Some(error) => {
                let report = PipelineResult::failure(
                    &self.name,
                    stage_results,
                    self.stage_names.len(),
                    error.to_string(),
                    total_duration,
                );
                app_log!(
                    LogLevel::Warn,
                    "pipeline",
                    "Pipeline '{}' stopped after {} of {} stages: {} (session: {})",
                    self.name,
                    report.executed_stages(),
                    report.total_stages,
                    error,
                    context.session_id()
                );
                report
            }
        };

        PipelineRun { outcome, report }
    }
}

/// Builder for constructing pipelines
///
/// `O` is the output type of the last stage added so far; each
/// `add_stage` call moves it forward.
pub struct PipelineBuilder<I, O, E> {
    name: String,
    stage_names: Vec<String>,
    runner: Runner<I, O, E>,
}

impl<I: 'static, E: Display + 'static> PipelineBuilder<I, I, E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage_names: Vec::new(),
            runner: Box::new(|input: I, _context: &mut PipelineContext| Outcome::success(input)),
        }
    }
}

impl<I: 'static, O: 'static, E: Display + 'static> PipelineBuilder<I, O, E> {
    /// Add a stage consuming the current output type
    pub fn add_stage<P, S>(self, stage: S) -> PipelineBuilder<I, P, E>
    where
        P: 'static,
        S: Stage<O, P, E> + 'static,
    {
        let index = self.stage_names.len();
        let mut stage_names = self.stage_names;
        stage_names.push(stage.name().to_string());

        let previous = self.runner;
        let runner: Runner<I, P, E> = Box::new(move |input: I, context: &mut PipelineContext| {
            previous(input, context).bind(|value| run_stage(&stage, index, value, context))
        });

        PipelineBuilder {
            name: self.name,
            stage_names,
            runner,
        }
    }

    /// Add a named function or closure as a stage
    pub fn add_step<P, F>(self, name: impl Into<String>, func: F) -> PipelineBuilder<I, P, E>
    where
        P: 'static,
        F: Fn(O) -> Outcome<P, E> + 'static,
    {
        self.add_stage(FnStage::new(name, func))
    }

    pub fn build(self) -> Pipeline<I, O, E> {
        Pipeline {
            name: self.name,
            stage_names: self.stage_names,
            runner: self.runner,
        }
    }
}

fn run_stage<S, In, Out, E>(
    stage: &S,
    index: usize,
    input: In,
    context: &mut PipelineContext,
) -> Outcome<Out, E>
where
    S: Stage<In, Out, E>,
    E: Display,
{
    let stage_name = stage.name();
    app_log!(
        LogLevel::Info,
        "pipeline",
        "Executing stage {}/{}: {} (session: {})",
        index + 1,
        context.stage_count(),
        stage_name,
        context.session_id()
    );

    let stage_start = Instant::now();
    let outcome = stage.execute(input);
    let duration = stage_start.elapsed();

    match outcome.error() {
        None => {
            app_log!(
                LogLevel::Info,
                "pipeline",
                "Stage '{}' completed successfully in {:.2}s (session: {})",
                stage_name,
                duration.as_secs_f64(),
                context.session_id()
            );
            context.record_stage(StageResult::success(stage_name, duration));
        }
        Some(error) => {
            let mut fields = HashMap::new();
            fields.insert("stage".to_string(), json!(stage_name));
            fields.insert("session_id".to_string(), json!(context.session_id()));
            fields.insert("duration_ms".to_string(), json!(duration.as_millis() as u64));
            LOGGER.log_with_context(
                LogLevel::Error,
                &format!("Stage '{}' failed: {}", stage_name, error),
                "pipeline",
                fields,
            );
            context.record_stage(StageResult::failure(stage_name, error.to_string(), duration));
        }
    }

    outcome
}
