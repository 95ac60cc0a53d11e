//! Shared test infrastructure for the service and controller tests.
//!
//! - `test_state()` / `test_app()` - in-memory service with a known admin password
//! - `MockApi` - scripted `FeedbackApi` for controller tests
//! - `jane_doe_form()` / `sample_payload()` - a fully answered submission
#![allow(dead_code)]

use std::sync::Mutex;

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use serde_json::Value;

use training_feedback::auth::password::AdminGate;
use training_feedback::auth::session;
use training_feedback::client::{ClientError, FeedbackApi, SheetData};
use training_feedback::db::Store;
use training_feedback::form::FormController;
use training_feedback::handlers::{self, AppState};
use training_feedback::models::feedback::{FeedbackPayload, ParticipantField, Section, Topic};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const MOCK_BASE: &str = "http://feedback.test";

// ============================================================================
// SERVICE SETUP
// ============================================================================

/// In-memory store plus an admin gate for `ADMIN_PASSWORD`.
pub fn test_state() -> AppState {
    let admin = AdminGate::from_plaintext(ADMIN_PASSWORD).expect("Failed to hash admin password");
    AppState::new(Store::memory(), admin)
}

/// The full service as `main` assembles it, minus the access logger.
pub fn test_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(session::session_middleware(Key::generate(), false))
        .configure(handlers::configure_app(state))
        .default_service(web::to(handlers::not_found))
}

// ============================================================================
// SAMPLE DATA
// ============================================================================

/// Ratings Jane Doe gives, per section, in question order.
pub const JANE_DOE_RATINGS: [(Section, &[u8]); 4] = [
    (Section::Content, &[5, 5, 4, 5]),
    (Section::Trainer, &[5, 5, 5, 5, 5, 5]),
    (Section::Organization, &[4, 5, 4]),
    (Section::Overall, &[5, 5, 5]),
];

/// Jane Doe on "Intro to Go" with Bob, entered field by field.
pub fn jane_doe_form() -> FormController {
    let mut form = FormController::new();
    form.set_participant(ParticipantField::FullName, "Jane Doe");
    form.set_participant(ParticipantField::Email, "jane@x.com");
    form.set_participant(ParticipantField::JobRole, "Engineer");
    form.set_participant(ParticipantField::TrainingTitle, "Intro to Go");
    form.set_participant(ParticipantField::InstructorName, "Bob");
    for (section, ratings) in JANE_DOE_RATINGS {
        for (i, &rating) in ratings.iter().enumerate() {
            form.set_field(section, i, rating).expect("Failed to set rating");
        }
    }
    form.toggle_topic(Topic::Introduction);
    form.toggle_topic(Topic::QaSession);
    form.set_comments("Great session");
    form
}

/// The request body `jane_doe_form()` must produce, written out by hand.
pub fn jane_doe_json() -> Value {
    serde_json::json!({
        "full_name": "Jane Doe",
        "email": "jane@x.com",
        "job_role": "Engineer",
        "training_title": "Intro to Go",
        "instructor_name": "Bob",
        "content_ratings": [5, 5, 4, 5],
        "trainer_ratings": [5, 5, 5, 5, 5, 5],
        "organization_ratings": [4, 5, 4],
        "overall_ratings": [5, 5, 5],
        "covered_topics": ["Introduction", "Q&A Session"],
        "other_topic": "",
        "comments": "Great session",
    })
}

pub fn sample_payload() -> FeedbackPayload {
    jane_doe_form().form().to_payload()
}

// ============================================================================
// MOCK API
// ============================================================================

/// Canned reply for a mutating call.
#[derive(Clone)]
pub enum Reply {
    Ok(Value),
    Rejected(u16, Option<String>),
}

impl Reply {
    fn into_result(self) -> Result<Value, ClientError> {
        match self {
            Reply::Ok(v) => Ok(v),
            Reply::Rejected(status, message) => Err(ClientError::Rejected { status, message }),
        }
    }
}

/// Scripted service: records every call, answers from fixed replies.
pub struct MockApi {
    pub submit_reply: Reply,
    /// Raw `/view-data` response: status and body.
    pub view_reply: (u16, String),
    pub password: String,
    pub known_ids: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<FeedbackPayload>>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            submit_reply: Reply::Ok(serde_json::json!({ "status": "ok" })),
            view_reply: (200, r#"{"status":"success","headers":[],"data":[]}"#.to_string()),
            password: ADMIN_PASSWORD.to_string(),
            known_ids: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submit_reply(mut self, reply: Reply) -> Self {
        self.submit_reply = reply;
        self
    }

    pub fn with_view_reply(mut self, status: u16, body: impl Into<String>) -> Self {
        self.view_reply = (status, body.into());
        self
    }

    pub fn with_rows(self, rows: &[Vec<String>]) -> Self {
        *self.known_ids.lock().unwrap() = rows.iter().map(|r| r[1].clone()).collect();
        let body = serde_json::json!({
            "status": "success",
            "layout_version": 1,
            "headers": [],
            "data": rows,
        });
        self.with_view_reply(200, body.to_string())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl FeedbackApi for MockApi {
    async fn submit_feedback(&self, payload: &FeedbackPayload) -> Result<Value, ClientError> {
        self.record("submit");
        self.submitted.lock().unwrap().push(payload.clone());
        self.submit_reply.clone().into_result()
    }

    async fn view_data(&self) -> Result<SheetData, ClientError> {
        self.record("view");
        SheetData::from_response(self.view_reply.0, &self.view_reply.1)
    }

    async fn login(&self, password: &str) -> Result<(), ClientError> {
        self.record("login");
        if password == self.password {
            Ok(())
        } else {
            Err(ClientError::Rejected {
                status: 401,
                message: Some("Incorrect password".into()),
            })
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.record("logout");
        Ok(())
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<(), ClientError> {
        self.record(format!("delete {submission_id}"));
        let mut ids = self.known_ids.lock().unwrap();
        match ids.iter().position(|id| id == submission_id) {
            Some(pos) => {
                ids.remove(pos);
                Ok(())
            }
            None => Err(ClientError::Rejected {
                status: 404,
                message: Some(format!("Submission with ID {submission_id} not found.")),
            }),
        }
    }

    fn export_url(&self) -> String {
        format!("{MOCK_BASE}/download-excel")
    }
}

/// One layout-v1 row with every question rated `rating`.
pub fn sheet_row(id: &str, name: &str, submitted_at: &str, rating: &str, trailing: &[&str]) -> Vec<String> {
    let mut row: Vec<String> = vec![
        submitted_at.into(),
        id.into(),
        name.into(),
        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "Engineer".into(),
        "Rust Basics".into(),
        "Bob".into(),
    ];
    let questions: usize = Section::ALL.iter().map(|s| s.question_count()).sum();
    row.extend(std::iter::repeat_n(rating.to_string(), questions));
    row.extend(trailing.iter().map(|c| c.to_string()));
    row
}
