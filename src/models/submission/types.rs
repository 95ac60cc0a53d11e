use serde::Serialize;

use super::layout;
use crate::models::feedback::{FeedbackPayload, Section};

/// A submission as persisted by the service, with named columns.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredSubmission {
    pub submission_id: String,
    pub submitted_at: String,
    pub full_name: String,
    pub email: String,
    pub job_role: String,
    pub training_title: String,
    pub instructor_name: String,
    pub content_ratings: Vec<i32>,
    pub trainer_ratings: Vec<i32>,
    pub organization_ratings: Vec<i32>,
    pub overall_ratings: Vec<i32>,
    pub covered_topics: Vec<String>,
    pub other_topic: String,
    pub comments: String,
}

impl StoredSubmission {
    /// Build a record from a validated payload. Text fields are trimmed.
    pub fn from_payload(payload: &FeedbackPayload, submission_id: String, submitted_at: String) -> Self {
        StoredSubmission {
            submission_id,
            submitted_at,
            full_name: payload.full_name.trim().to_string(),
            email: payload.email.trim().to_string(),
            job_role: payload.job_role.trim().to_string(),
            training_title: payload.training_title.trim().to_string(),
            instructor_name: payload.instructor_name.trim().to_string(),
            content_ratings: payload.content_ratings.clone(),
            trainer_ratings: payload.trainer_ratings.clone(),
            organization_ratings: payload.organization_ratings.clone(),
            overall_ratings: payload.overall_ratings.clone(),
            covered_topics: payload.covered_topics.iter().map(|t| t.trim().to_string()).collect(),
            other_topic: payload.other_topic.trim().to_string(),
            comments: payload.comments.trim().to_string(),
        }
    }

    pub fn ratings(&self, section: Section) -> &[i32] {
        match section {
            Section::Content => &self.content_ratings,
            Section::Trainer => &self.trainer_ratings,
            Section::Organization => &self.organization_ratings,
            Section::Overall => &self.overall_ratings,
        }
    }

    /// Render as a positional row in the current layout version.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(layout::TRAILING_START + self.covered_topics.len() + 2);
        row.push(self.submitted_at.clone());
        row.push(self.submission_id.clone());
        row.push(self.full_name.clone());
        row.push(self.email.clone());
        row.push(self.job_role.clone());
        row.push(self.training_title.clone());
        row.push(self.instructor_name.clone());
        for section in Section::ALL {
            let cols = layout::section_columns(section);
            let ratings = self.ratings(section);
            // Short arrays are padded so later sections keep their columns.
            for i in 0..cols.len() {
                row.push(ratings.get(i).map(|r| r.to_string()).unwrap_or_default());
            }
        }
        row.extend(self.covered_topics.iter().cloned());
        row.push(self.other_topic.clone());
        row.push(self.comments.clone());
        row
    }
}

/// One decoded row as shown in the admin table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub submitted_at: String,
    pub submission_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub title: String,
    pub instructor: String,
    pub content_avg: Option<f64>,
    pub trainer_avg: Option<f64>,
    pub org_avg: Option<f64>,
    pub overall_avg: Option<f64>,
    pub topics: Vec<String>,
    pub comment: String,
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl SubmissionRecord {
    pub fn average(&self, section: Section) -> Option<f64> {
        match section {
            Section::Content => self.content_avg,
            Section::Trainer => self.trainer_avg,
            Section::Organization => self.org_avg,
            Section::Overall => self.overall_avg,
        }
    }
}
