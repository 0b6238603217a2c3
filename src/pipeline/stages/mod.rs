//! Stages of the manuscript publishing pipeline
//!
//! 1. FetchStage - Look up the submitted manuscript
//! 2. EditStage - Editorial pass
//! 3. FormatStage - Apply the configured style guide
//! 4. ReviewStage - Approve manuscripts in the required style
//! 5. PublishStage - Assign the ISBN
//!
//! Every stage is also available as a plain function using the default
//! configuration, so the stages chain directly with `Outcome::bind`:
//!
//! ```
//! use folio_lib::pipeline::stages::*;
//!
//! let published = fetch_manuscript(42)
//!     .bind(edit_manuscript)
//!     .bind(format_manuscript)
//!     .bind(review_manuscript)
//!     .bind(publish_manuscript);
//!
//! assert_eq!(published.value().unwrap().isbn, "ISBN-42-2023");
//! ```

pub mod edit;
pub mod fetch;
pub mod format;
pub mod publish;
pub mod review;
pub mod revise;

pub use edit::{edit_manuscript, EditStage};
pub use fetch::{fetch_manuscript, FetchStage};
pub use format::{format_manuscript, FormatStage};
pub use publish::{publish_manuscript, PublishStage};
pub use review::{review_manuscript, ReviewStage};
pub use revise::{apply_revisions, revise_and_publish};

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::manuscript::PublishedManuscript;
use crate::pipeline::Pipeline;

pub const PUBLISHING_PIPELINE: &str = "publish-manuscript";

/// Assemble fetch → edit → format → review → publish
pub fn publishing_pipeline(
    config: &PublishingConfig,
) -> Pipeline<i64, PublishedManuscript, FolioError> {
    Pipeline::<i64, i64, FolioError>::builder(PUBLISHING_PIPELINE)
        .add_stage(FetchStage::new(config.clone()))
        .add_stage(EditStage::new())
        .add_stage(FormatStage::new(config))
        .add_stage(ReviewStage::new(config))
        .add_stage(PublishStage::new(config))
        .build()
}
