use actix_web::{HttpResponse, web};
use rand::Rng;
use serde_json::json;

use crate::db::Store;
use crate::errors::AppError;
use crate::models::feedback::FeedbackPayload;
use crate::models::submission::{StoredSubmission, queries};

pub const SERVICE_NAME: &str = "Training Feedback API";

/// Format of `submitted_at`; sorts lexicographically in time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 8 lowercase hex chars.
pub fn new_submission_id() -> String {
    let bytes: [u8; 4] = rand::rng().random();
    hex::encode(bytes)
}

/// GET / - service banner
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Training Feedback API is running!",
        "endpoints": ["/submit-feedback", "/view-data", "/download-excel", "/delete-feedback/{id}", "/health"],
    }))
}

/// GET /health - liveness check
pub async fn health(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "storage": store.backend_name(),
    }))
}

/// POST /submit-feedback - validate and store one submission
pub async fn submit_feedback(
    store: web::Data<Store>,
    body: web::Json<FeedbackPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let errors = payload.validate();
    if !errors.is_empty() {
        log::info!("Rejected feedback submission: {}", errors.join("; "));
        return Err(AppError::Validation(errors));
    }

    let submitted_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let submission = store_submission(&store, &payload, submitted_at, new_submission_id).await?;

    log::info!(
        "Stored feedback {} for '{}' ({} topics)",
        submission.submission_id,
        submission.training_title,
        submission.covered_topics.len()
    );

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "submission_id": submission.submission_id,
    })))
}

/// Insert under a fresh id. A collision with a stored id gets one retry
/// with a second id before the conflict is reported.
async fn store_submission(
    store: &Store,
    payload: &FeedbackPayload,
    submitted_at: String,
    mut next_id: impl FnMut() -> String,
) -> Result<StoredSubmission, AppError> {
    let mut submission = StoredSubmission::from_payload(payload, next_id(), submitted_at);
    match queries::insert(store, &submission).await {
        Err(AppError::Conflict(_)) => {
            log::warn!("Submission id {} already taken, retrying", submission.submission_id);
            submission.submission_id = next_id();
            queries::insert(store, &submission).await?;
        }
        other => other?,
    }
    Ok(submission)
}
