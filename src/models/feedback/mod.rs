pub mod types;

pub use types::*;

use crate::validate;

pub const MAX_TEXT_LEN: usize = 200;
pub const MAX_COMMENT_LEN: usize = 5000;

impl FeedbackForm {
    /// Problems that would block submission: blank participant fields and
    /// unanswered rating questions, in on-screen order.
    pub fn missing_answers(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for field in ParticipantField::ALL {
            let value = self.participant.get(field);
            let problem = if field == ParticipantField::Email {
                validate::validate_email(value)
            } else {
                validate::validate_required(value, field.label(), MAX_TEXT_LEN)
            };
            errors.extend(problem);
        }
        for section in Section::ALL {
            for (idx, &rating) in self.ratings(section).iter().enumerate() {
                if rating == UNANSWERED {
                    errors.push(format!(
                        "{}: please rate \"{}\"",
                        section.title(),
                        section.questions()[idx]
                    ));
                }
            }
        }
        errors
    }
}

impl FeedbackPayload {
    /// Server-side checks on an incoming submission.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.full_name, "Full name", MAX_TEXT_LEN));
        errors.extend(validate::validate_email(&self.email));
        errors.extend(validate::validate_required(&self.job_role, "Job role", MAX_TEXT_LEN));
        errors.extend(validate::validate_required(
            &self.training_title,
            "Training title",
            MAX_TEXT_LEN,
        ));
        errors.extend(validate::validate_required(
            &self.instructor_name,
            "Instructor name",
            MAX_TEXT_LEN,
        ));
        for section in Section::ALL {
            errors.extend(validate::validate_ratings(section, self.ratings(section)));
        }
        errors.extend(validate::validate_topics(&self.covered_topics));
        errors.extend(validate::validate_optional(&self.other_topic, "Other topic", MAX_TEXT_LEN));
        errors.extend(validate::validate_optional(&self.comments, "Comments", MAX_COMMENT_LEN));
        errors
    }
}
