use chrono::Utc;

use crate::config::PublishingConfig;
use crate::error::FolioError;
use crate::logger::LogLevel;
use crate::manuscript::{EditedManuscript, PublishedManuscript};
use crate::outcome::{MutableOutcome, Outcome};
use crate::pipeline::Stage;

use super::{EditStage, FetchStage, FormatStage, PublishStage, ReviewStage};

/// Fold extra editorial notes into an edited draft, in place.
///
/// The draft's shared cell is updated, so every clone of `draft` sees the
/// revisions. A failed draft is left untouched.
pub fn apply_revisions<E>(draft: &mut MutableOutcome<EditedManuscript, E>, notes: &[String]) {
    draft
        .in_place_bind(|manuscript| {
            for note in notes {
                manuscript.content.push_str("\nRevised: ");
                manuscript.content.push_str(note);
                manuscript.editorial_notes.push(note.clone());
            }
            if !notes.is_empty() {
                manuscript.edit_date = Utc::now();
            }
        })
        .read_only_bind(|manuscript| {
            app_log!(
                LogLevel::Debug,
                "pipeline::revise",
                "Manuscript {} carries {} editorial notes",
                manuscript.id,
                manuscript.editorial_notes.len()
            );
        });
}

/// Publish a manuscript with extra revisions applied between the edit and
/// format stages.
///
/// Runs the stages as a direct `bind` chain rather than through a
/// [`Pipeline`](crate::pipeline::Pipeline): fetch and edit produce an
/// [`Outcome`], which is turned into a [`MutableOutcome`] for the revision
/// pass and back again for the remaining stages.
pub fn revise_and_publish(
    manuscript_id: i64,
    notes: &[String],
    config: &PublishingConfig,
) -> Outcome<PublishedManuscript, FolioError> {
    let fetch = FetchStage::new(config.clone());
    let edit = EditStage::new();

    let mut draft: MutableOutcome<EditedManuscript, FolioError> = fetch
        .execute(manuscript_id)
        .bind(|manuscript| edit.execute(manuscript))
        .into();
    apply_revisions(&mut draft, notes);

    let format = FormatStage::new(config);
    let review = ReviewStage::new(config);
    let publish = PublishStage::new(config);

    draft
        .into_outcome()
        .bind(|edited| format.execute(edited))
        .bind(|formatted| review.execute(formatted))
        .bind(|reviewed| publish.execute(reviewed))
}
