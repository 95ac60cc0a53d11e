//! State controller behind the feedback form.
//!
//! Holds every field, the dialog/notification flags and the section
//! expand/collapse flags. Submission is two-phase: [`FormController::submit`]
//! only opens the confirmation prompt, and [`FormController::confirm_submit`]
//! performs the single network call when the participant accepts.

use std::fmt;

use serde_json::Value;

use crate::client::{ClientError, FeedbackApi};
use crate::models::feedback::{
    FeedbackForm, FeedbackPayload, MAX_RATING, ParticipantField, Section, Topic, rating_label,
};

/// Collapsible steps of the form, in display order.
pub const STEPS: [&str; 7] = [
    "Course Details",
    "Content & Impact",
    "Trainer",
    "Organization",
    "Overall Impression",
    "Covered Topics",
    "Comments & Suggestions",
];

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit feedback. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownSection(String),
    QuestionOutOfRange { section: Section, index: usize },
    RatingOutOfRange(u8),
    UnknownTopic(String),
    UnknownStep(usize),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownSection(name) => write!(f, "Unknown rating section '{name}'"),
            FormError::QuestionOutOfRange { section, index } => write!(
                f,
                "{} has {} questions; index {index} is out of range",
                section.title(),
                section.question_count()
            ),
            FormError::RatingOutOfRange(v) => write!(
                f,
                "Rating must be 1 ({}) to {MAX_RATING} ({}), got {v}",
                rating_label(1).unwrap_or_default(),
                rating_label(MAX_RATING).unwrap_or_default()
            ),
            FormError::UnknownTopic(label) => write!(f, "Unknown topic '{label}'"),
            FormError::UnknownStep(idx) => write!(f, "Form has {} steps; step {idx} does not exist", STEPS.len()),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone)]
pub struct FormController {
    form: FeedbackForm,
    expanded: [bool; STEPS.len()],
    confirm_open: bool,
    success_open: bool,
    error: Option<String>,
    loading: bool,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        FormController {
            form: FeedbackForm::default(),
            expanded: [true; STEPS.len()],
            confirm_open: false,
            success_open: false,
            error: None,
            loading: false,
        }
    }

    pub fn form(&self) -> &FeedbackForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_confirm_open(&self) -> bool {
        self.confirm_open
    }

    pub fn is_success_open(&self) -> bool {
        self.success_open
    }

    /// Message for the transient error notification, if one is showing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_expanded(&self, step: usize) -> bool {
        self.expanded.get(step).copied().unwrap_or(false)
    }

    /// Record the answer to question `index` of `section`. Other slots and
    /// other sections are left untouched.
    pub fn set_field(&mut self, section: Section, index: usize, value: u8) -> Result<(), FormError> {
        if !(1..=MAX_RATING).contains(&value) {
            return Err(FormError::RatingOutOfRange(value));
        }
        let slot = self
            .form
            .ratings_mut(section)
            .get_mut(index)
            .ok_or(FormError::QuestionOutOfRange { section, index })?;
        *slot = value;
        Ok(())
    }

    /// [`set_field`](Self::set_field) addressed by the section's wire name.
    pub fn set_field_by_name(&mut self, section: &str, index: usize, value: u8) -> Result<(), FormError> {
        let parsed = Section::parse(section).ok_or_else(|| FormError::UnknownSection(section.to_string()))?;
        self.set_field(parsed, index, value)
    }

    pub fn set_participant(&mut self, field: ParticipantField, value: impl Into<String>) {
        self.form.participant.set(field, value.into());
    }

    pub fn set_other_topic(&mut self, value: impl Into<String>) {
        self.form.other_topic = value.into();
    }

    pub fn set_comments(&mut self, value: impl Into<String>) {
        self.form.comments = value.into();
    }

    /// Add `topic` if absent, remove it if present.
    pub fn toggle_topic(&mut self, topic: Topic) {
        match self.form.covered_topics.iter().position(|t| *t == topic) {
            Some(pos) => {
                self.form.covered_topics.remove(pos);
            }
            None => self.form.covered_topics.push(topic),
        }
    }

    pub fn toggle_topic_label(&mut self, label: &str) -> Result<(), FormError> {
        let topic = Topic::from_label(label).ok_or_else(|| FormError::UnknownTopic(label.to_string()))?;
        self.toggle_topic(topic);
        Ok(())
    }

    pub fn toggle_section(&mut self, step: usize) -> Result<(), FormError> {
        let flag = self.expanded.get_mut(step).ok_or(FormError::UnknownStep(step))?;
        *flag = !*flag;
        Ok(())
    }

    /// Open the confirmation prompt. Nothing is sent. Blank required fields
    /// or unanswered questions keep the prompt closed and are returned.
    pub fn submit(&mut self) -> Result<(), Vec<String>> {
        let missing = self.form.missing_answers();
        if !missing.is_empty() {
            return Err(missing);
        }
        self.confirm_open = true;
        Ok(())
    }

    /// Close the prompt. When accepted, raise the loading flag and return the
    /// snapshot to send; the form stays editable while the request runs.
    pub fn begin_submit(&mut self, accepted: bool) -> Option<FeedbackPayload> {
        self.confirm_open = false;
        if !accepted {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.form.to_payload())
    }

    /// Apply the outcome of the request started by [`begin_submit`](Self::begin_submit).
    /// Success shows the success dialog and resets the form; failure keeps
    /// every field. The loading flag is cleared either way.
    pub fn complete_submit(&mut self, outcome: Result<Value, ClientError>) {
        self.loading = false;
        match outcome {
            Ok(body) => {
                log::info!("Feedback submitted: {body}");
                self.form = FeedbackForm::default();
                self.success_open = true;
            }
            Err(e) => {
                log::warn!("Feedback submission failed: {e}");
                self.error = Some(e.user_message(SUBMIT_FALLBACK_MESSAGE));
            }
        }
    }

    /// Second phase of submission: `false` discards, `true` sends once.
    pub async fn confirm_submit<A: FeedbackApi>(&mut self, accepted: bool, api: &A) {
        let Some(payload) = self.begin_submit(accepted) else {
            return;
        };
        let outcome = api.submit_feedback(&payload).await;
        self.complete_submit(outcome);
    }

    pub fn dismiss_success(&mut self) {
        self.success_open = false;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_rejects_bad_index_and_value() {
        let mut ctl = FormController::new();
        assert_eq!(
            ctl.set_field(Section::Organization, 3, 4),
            Err(FormError::QuestionOutOfRange { section: Section::Organization, index: 3 })
        );
        assert_eq!(ctl.set_field(Section::Content, 0, 0), Err(FormError::RatingOutOfRange(0)));
        assert_eq!(ctl.set_field(Section::Content, 0, 6), Err(FormError::RatingOutOfRange(6)));
        assert_eq!(
            FormError::RatingOutOfRange(6).to_string(),
            "Rating must be 1 (Strongly Disagree) to 5 (Strongly Agree), got 6"
        );
        assert_eq!(ctl.form(), &FeedbackForm::default());
    }

    #[test]
    fn set_field_by_name_parses_section() {
        let mut ctl = FormController::new();
        ctl.set_field_by_name("trainer", 5, 3).unwrap();
        assert_eq!(ctl.form().trainer_ratings, [0, 0, 0, 0, 0, 3]);
        assert!(matches!(
            ctl.set_field_by_name("catering", 0, 3),
            Err(FormError::UnknownSection(_))
        ));
    }

    #[test]
    fn sections_start_expanded_and_toggle() {
        let mut ctl = FormController::new();
        assert!((0..STEPS.len()).all(|i| ctl.is_expanded(i)));
        ctl.toggle_section(2).unwrap();
        assert!(!ctl.is_expanded(2));
        assert!(ctl.is_expanded(3));
        assert_eq!(ctl.toggle_section(7), Err(FormError::UnknownStep(7)));
    }

    #[test]
    fn toggle_topic_label_rejects_unknown_labels() {
        let mut ctl = FormController::new();
        ctl.toggle_topic_label("Case Studies").unwrap();
        assert_eq!(ctl.form().covered_topics, vec![Topic::CaseStudies]);
        assert!(ctl.toggle_topic_label("Lunch").is_err());
    }

    #[test]
    fn submit_with_blank_form_keeps_prompt_closed() {
        let mut ctl = FormController::new();
        let missing = ctl.submit().unwrap_err();
        assert!(!missing.is_empty());
        assert!(!ctl.is_confirm_open());
    }

    #[test]
    fn begin_submit_declined_changes_nothing_but_the_prompt() {
        let mut ctl = FormController::new();
        ctl.set_comments("draft");
        assert!(ctl.begin_submit(false).is_none());
        assert!(!ctl.is_loading());
        assert_eq!(ctl.form().comments, "draft");
    }

    #[test]
    fn failed_submit_uses_service_message() {
        let mut ctl = FormController::new();
        ctl.set_comments("keep me");
        ctl.begin_submit(true).unwrap();
        assert!(ctl.is_loading());
        ctl.complete_submit(Err(ClientError::Rejected {
            status: 422,
            message: Some("Email is required".into()),
        }));
        assert!(!ctl.is_loading());
        assert_eq!(ctl.error(), Some("Email is required"));
        assert_eq!(ctl.form().comments, "keep me");
        ctl.dismiss_error();
        assert_eq!(ctl.error(), None);
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut ctl = FormController::new();
        ctl.begin_submit(true).unwrap();
        ctl.complete_submit(Err(ClientError::Decode("eof".into())));
        assert_eq!(ctl.error(), Some(SUBMIT_FALLBACK_MESSAGE));
    }
}
