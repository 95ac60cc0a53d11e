//! Field-level validators shared by the form controller and the service.
//! Each returns `None` when the value is acceptable, otherwise a message
//! suitable for showing to the participant.

use crate::models::feedback::{MAX_RATING, Section, Topic, UNANSWERED};

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an email the way a browser `type="email"` input does: one `@`
/// with a non-empty local part and domain, no whitespace, max 254 chars.
/// A dot in the domain is not required (`jane@localhost` is accepted).
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Some("Email must be a valid address (name@domain)".to_string());
    }
    None
}

/// Validate the shape of a rating array received over the wire.
/// Zero is accepted as "not answered"; anything outside 0..=5 is not.
pub fn validate_ratings(section: Section, ratings: &[i32]) -> Option<String> {
    let expected = section.question_count();
    if ratings.len() != expected {
        return Some(format!(
            "{} ratings must have exactly {expected} entries (got {})",
            section.title(),
            ratings.len()
        ));
    }
    let bound = i32::from(MAX_RATING);
    if let Some(bad) = ratings.iter().find(|r| !(i32::from(UNANSWERED)..=bound).contains(r)) {
        return Some(format!(
            "{} ratings must be 1-{bound}, or 0 for unanswered (got {bad})",
            section.title()
        ));
    }
    None
}

/// Every entry must be a label from the fixed topic list, without repeats.
pub fn validate_topics(topics: &[String]) -> Option<String> {
    let mut seen = Vec::with_capacity(topics.len());
    for label in topics {
        match Topic::from_label(label) {
            Some(topic) if seen.contains(&topic) => {
                return Some(format!("Topic '{}' was selected twice", topic.label()));
            }
            Some(topic) => seen.push(topic),
            None => return Some(format!("Unknown topic '{label}'")),
        }
    }
    None
}
