//! Form controller tests: field edits, topic toggling, and the two-phase
//! submission against a scripted service.

mod common;

use common::*;
use training_feedback::form::{FormController, SUBMIT_FALLBACK_MESSAGE};
use training_feedback::models::feedback::{FeedbackForm, ParticipantField, Section, Topic};

#[test]
fn test_set_field_changes_exactly_one_slot() {
    let mut form = FormController::new();
    form.set_field(Section::Content, 2, 4).expect("Failed to set rating");

    let state = form.form();
    assert_eq!(state.content_ratings, [0, 0, 4, 0]);
    assert_eq!(state.trainer_ratings, [0; 6]);
    assert_eq!(state.organization_ratings, [0; 3]);
    assert_eq!(state.overall_ratings, [0; 3]);

    form.set_field(Section::Content, 2, 1).expect("Failed to overwrite rating");
    assert_eq!(form.form().content_ratings, [0, 0, 1, 0]);
}

#[test]
fn test_toggle_topic_twice_restores_selection() {
    let mut form = jane_doe_form();
    let before = form.form().covered_topics.clone();

    form.toggle_topic(Topic::KeyConcepts);
    assert!(form.form().has_topic(Topic::KeyConcepts));
    form.toggle_topic(Topic::KeyConcepts);

    assert_eq!(form.form().covered_topics, before);
}

#[test]
fn test_toggle_topic_removes_without_reordering_others() {
    let mut form = FormController::new();
    form.toggle_topic(Topic::SummaryConclusion);
    form.toggle_topic(Topic::Introduction);
    form.toggle_topic(Topic::CaseStudies);
    form.toggle_topic(Topic::Introduction);
    assert_eq!(form.form().covered_topics, vec![Topic::SummaryConclusion, Topic::CaseStudies]);
}

#[test]
fn test_submit_opens_prompt_without_sending() {
    let mut form = jane_doe_form();
    form.submit().expect("Complete form should pass validation");
    assert!(form.is_confirm_open());
    assert!(!form.is_loading());
}

#[test]
fn test_submit_reports_missing_answers() {
    let mut form = jane_doe_form();
    form.set_participant(ParticipantField::Email, "not-an-email");
    let errors = form.submit().expect_err("Invalid email should block submission");
    assert_eq!(errors.len(), 1);
    assert!(!form.is_confirm_open());
}

#[actix_rt::test]
async fn test_declined_confirmation_makes_no_call() {
    let api = MockApi::new();
    let mut form = jane_doe_form();
    form.submit().expect("Complete form should pass validation");
    let before = form.form().clone();

    form.confirm_submit(false, &api).await;

    assert!(api.calls().is_empty());
    assert_eq!(form.form(), &before);
    assert!(!form.is_confirm_open());
    assert!(!form.is_loading());
    assert!(!form.is_success_open());
}

#[actix_rt::test]
async fn test_successful_submission_resets_form() {
    let api = MockApi::new();
    let mut form = jane_doe_form();
    form.toggle_section(3).expect("Step exists");
    form.submit().expect("Complete form should pass validation");

    form.confirm_submit(true, &api).await;

    assert_eq!(api.calls(), vec!["submit"]);
    assert_eq!(form.form(), &FeedbackForm::default());
    assert!(form.is_success_open());
    assert!(!form.is_loading());
    assert_eq!(form.error(), None);
    // Section collapse state is a view preference, not form data.
    assert!(!form.is_expanded(3));

    form.dismiss_success();
    assert!(!form.is_success_open());
}

#[actix_rt::test]
async fn test_jane_doe_payload_is_sent_as_entered() {
    let api = MockApi::new();
    let mut form = jane_doe_form();
    form.submit().expect("Complete form should pass validation");

    form.confirm_submit(true, &api).await;

    let sent = api.submitted.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let payload = &sent[0];
    assert_eq!(payload.content_ratings, vec![5, 5, 4, 5]);
    assert_eq!(payload.organization_ratings, vec![4, 5, 4]);
    assert_eq!(serde_json::to_value(payload).unwrap(), jane_doe_json());
    assert!(form.is_success_open());
    assert_eq!(form.form(), &FeedbackForm::default());
}

#[test]
fn test_email_without_dot_in_domain_is_accepted() {
    let mut form = jane_doe_form();
    form.set_participant(ParticipantField::Email, "jane@localhost");
    form.submit().expect("Local-domain address should pass validation");
    assert!(form.is_confirm_open());
}

#[actix_rt::test]
async fn test_failed_submission_keeps_every_field() {
    let api = MockApi::new().with_submit_reply(Reply::Rejected(500, Some("Database unavailable".into())));
    let mut form = jane_doe_form();
    form.set_other_topic("Lifetimes");
    let before = form.form().clone();

    form.confirm_submit(true, &api).await;

    assert_eq!(form.form(), &before);
    assert!(!form.is_loading());
    assert!(!form.is_success_open());
    assert_eq!(form.error(), Some("Database unavailable"));
}

#[actix_rt::test]
async fn test_failure_without_message_shows_fallback() {
    let api = MockApi::new().with_submit_reply(Reply::Rejected(502, None));
    let mut form = jane_doe_form();

    form.confirm_submit(true, &api).await;

    assert_eq!(form.error(), Some(SUBMIT_FALLBACK_MESSAGE));
    form.dismiss_error();
    assert_eq!(form.error(), None);
}

#[test]
fn test_edits_allowed_while_request_in_flight() {
    let mut form = jane_doe_form();
    let payload = form.begin_submit(true).expect("Accepted prompt yields a payload");
    assert!(form.is_loading());

    form.set_comments("typed after sending");
    assert_eq!(payload.comments, "Great session");

    form.complete_submit(Ok(serde_json::json!({ "status": "ok" })));
    assert!(!form.is_loading());
    assert_eq!(form.form().comments, "");
}
