//! Column contract for submission rows served by `/view-data`.
//!
//! Rows travel as flat string arrays. Bump [`ROW_LAYOUT_VERSION`] whenever a
//! column moves; clients compare it before decoding.

use std::ops::Range;

use crate::models::feedback::Section;

pub const ROW_LAYOUT_VERSION: u32 = 1;

pub const SUBMITTED_AT: usize = 0;
pub const SUBMISSION_ID: usize = 1;
pub const FULL_NAME: usize = 2;
pub const EMAIL: usize = 3;
pub const JOB_ROLE: usize = 4;
pub const TRAINING_TITLE: usize = 5;
pub const INSTRUCTOR: usize = 6;

pub const CONTENT_RATINGS: Range<usize> = 7..11;
pub const TRAINER_RATINGS: Range<usize> = 11..17;
pub const ORGANIZATION_RATINGS: Range<usize> = 17..20;
pub const OVERALL_RATINGS: Range<usize> = 20..23;

/// First trailing cell: covered topics one per cell, then the other-topic
/// text, then the comments.
pub const TRAILING_START: usize = 23;

const IDENTITY_HEADERS: [&str; 7] = [
    "Submitted At",
    "Submission ID",
    "Full Name",
    "Email",
    "Job Role",
    "Training Title",
    "Instructor",
];

pub fn section_columns(section: Section) -> Range<usize> {
    match section {
        Section::Content => CONTENT_RATINGS,
        Section::Trainer => TRAINER_RATINGS,
        Section::Organization => ORGANIZATION_RATINGS,
        Section::Overall => OVERALL_RATINGS,
    }
}

fn section_prefix(section: Section) -> &'static str {
    match section {
        Section::Content => "Content",
        Section::Trainer => "Trainer",
        Section::Organization => "Organization",
        Section::Overall => "Overall",
    }
}

/// Header row matching the fixed part of the layout, plus descriptive
/// headers for the variable-length trailing cells.
pub fn headers() -> Vec<String> {
    let mut headers: Vec<String> = IDENTITY_HEADERS.iter().map(|h| h.to_string()).collect();
    for section in Section::ALL {
        for q in 1..=section.question_count() {
            headers.push(format!("{} Q{q}", section_prefix(section)));
        }
    }
    headers.push("Covered Topics".to_string());
    headers.push("Other Topic".to_string());
    headers.push("Comments".to_string());
    headers
}
