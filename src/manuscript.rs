//! Manuscript records passed between the publishing stages
//!
//! Each stage produces the next record type; fields carry over and each
//! record adds what its stage contributed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manuscript as submitted by its author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub submission_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditedManuscript {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub editorial_notes: Vec<String>,
    pub edit_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedManuscript {
    pub id: i64,
    pub title: String,
    pub formatted_content: String,
    pub author: String,
    /// Style guide applied, e.g. "IEEE"
    pub format_type: String,
    pub format_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewedManuscript {
    pub id: i64,
    pub title: String,
    pub formatted_content: String,
    pub author: String,
    pub approved: bool,
    pub review_comments: Vec<String>,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedManuscript {
    pub id: i64,
    pub title: String,
    pub formatted_content: String,
    pub author: String,
    pub isbn: String,
    pub publish_date: DateTime<Utc>,
}
