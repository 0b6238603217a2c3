//! Typed pipeline for sequential, fallible transformations
//!
//! Each stage takes the previous stage's output and returns an
//! [`Outcome`](crate::outcome::Outcome). The executor chains stages with
//! `bind`, so the first failing stage ends the run: later stages never
//! execute and the failure is returned unchanged. Every stage is timed and
//! logged, and the run produces a [`PipelineResult`] report.
//!
//! # Example
//! ```
//! use folio_lib::outcome::Outcome;
//! use folio_lib::pipeline::{Pipeline, PipelineContext};
//!
//! let pipeline = Pipeline::<i64, i64, String>::builder("checks")
//!     .add_step("positive", |n: i64| {
//!         if n > 0 {
//!             Outcome::success(n)
//!         } else {
//!             Outcome::failure("not positive".to_string())
//!         }
//!     })
//!     .add_step("describe", |n: i64| Outcome::success(format!("#{}", n)))
//!     .build();
//!
//! let mut context = PipelineContext::new("session-123");
//! let run = pipeline.execute(-1, &mut context);
//! assert_eq!(run.outcome.error().map(String::as_str), Some("not positive"));
//! assert_eq!(run.report.executed_stages(), 1);
//! ```

pub mod context;
pub mod core;
pub mod executor;
pub mod stages;

// Re-export main types
pub use context::PipelineContext;
pub use core::{FnStage, PipelineResult, Stage, StageResult};
pub use executor::{Pipeline, PipelineBuilder, PipelineRun};
