//! Client side of the feedback service.
//!
//! [`FeedbackApi`] is the seam the form and admin controllers talk through;
//! [`HttpFeedbackApi`] implements it over reqwest. Every call is a single
//! request: nothing is retried.

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::models::feedback::FeedbackPayload;

#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The service answered with a failure; `message` is its own wording.
    Rejected { status: u16, message: Option<String> },
    /// A success status with a body we could not read.
    Decode(String),
}

impl ClientError {
    /// The service's message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected { message: Some(m), .. } if !m.trim().is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "Request failed: {e}"),
            ClientError::Rejected { status, message } => match message {
                Some(m) => write!(f, "Service returned {status}: {m}"),
                None => write!(f, "Service returned {status}"),
            },
            ClientError::Decode(e) => write!(f, "Unreadable response: {e}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

/// Tabular dump returned by `/view-data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub layout_version: Option<u32>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Cells may arrive as numbers or nulls from older sheets; normalise to text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
struct ViewDataBody {
    status: Option<String>,
    message: Option<String>,
    layout_version: Option<u32>,
    #[serde(default)]
    headers: Vec<Value>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

impl SheetData {
    /// Interpret a `/view-data` response. Anything but `status: "success"`
    /// is a failure even when the HTTP status was 2xx.
    pub fn from_response(status: u16, body: &str) -> Result<SheetData, ClientError> {
        let parsed: Option<ViewDataBody> = serde_json::from_str(body).ok();
        let ok = (200..300).contains(&status);
        match parsed {
            Some(b) if ok && b.status.as_deref() == Some("success") => Ok(SheetData {
                layout_version: b.layout_version,
                headers: b.headers.iter().map(cell_text).collect(),
                rows: b
                    .data
                    .iter()
                    .map(|row| row.iter().map(cell_text).collect())
                    .collect(),
            }),
            Some(b) => Err(ClientError::Rejected { status, message: b.message }),
            None if ok => Err(ClientError::Decode("view-data body is not valid JSON".to_string())),
            None => Err(ClientError::Rejected { status, message: None }),
        }
    }
}

/// Read the text field `key` out of a JSON error body, if there is one.
fn body_field(body: &str, key: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get(key)?
        .as_str()
        .map(String::from)
}

/// Operations the controllers need from the feedback service.
#[allow(async_fn_in_trait)]
pub trait FeedbackApi {
    /// Any 2xx with a JSON body is a success; the body is returned as-is.
    async fn submit_feedback(&self, payload: &FeedbackPayload) -> Result<Value, ClientError>;

    async fn view_data(&self) -> Result<SheetData, ClientError>;

    async fn login(&self, password: &str) -> Result<(), ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    async fn delete_submission(&self, submission_id: &str) -> Result<(), ClientError>;

    /// Link the browser navigates to for the spreadsheet download.
    fn export_url(&self) -> String;
}

/// reqwest-backed [`FeedbackApi`]. Keeps the admin session cookie between
/// calls.
#[derive(Clone)]
pub struct HttpFeedbackApi {
    base: String,
    http: reqwest::Client,
}

impl HttpFeedbackApi {
    pub fn new(base: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(base, http))
    }

    pub fn with_client(base: impl Into<String>, http: reqwest::Client) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        HttpFeedbackApi { base, http }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Send, read the body, and turn non-2xx into `Rejected` using the body
    /// field `error_key`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        error_key: &str,
    ) -> Result<(StatusCode, String), ClientError> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: body_field(&body, error_key),
            });
        }
        Ok((status, body))
    }
}

impl FeedbackApi for HttpFeedbackApi {
    async fn submit_feedback(&self, payload: &FeedbackPayload) -> Result<Value, ClientError> {
        let request = self.http.post(self.url("/submit-feedback")).json(payload);
        let (status, body) = self.send(request, "error").await?;
        log::debug!("submit-feedback answered {status}");
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn view_data(&self) -> Result<SheetData, ClientError> {
        let response = self
            .http
            .get(self.url("/view-data"))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        SheetData::from_response(status, &body)
    }

    async fn login(&self, password: &str) -> Result<(), ClientError> {
        let request = self
            .http
            .post(self.url("/admin/login"))
            .json(&serde_json::json!({ "password": password }));
        self.send(request, "message").await.map(|_| ())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let request = self
            .http
            .post(self.url("/admin/logout"))
            .json(&serde_json::json!({}));
        self.send(request, "message").await.map(|_| ())
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.url(&format!("/delete-feedback/{submission_id}")))
            .json(&serde_json::json!({}));
        self.send(request, "message").await.map(|_| ())
    }

    fn export_url(&self) -> String {
        self.url("/download-excel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_field_is_required() {
        let err = SheetData::from_response(200, r#"{"status":"error","message":"db down"}"#).unwrap_err();
        assert_eq!(err.user_message("Failed to load submissions"), "db down");
    }

    #[test]
    fn mixed_cells_are_normalised_to_text() {
        let body = r#"{"status":"success","headers":["A","B"],"data":[["x",4,null,4.5,true]]}"#;
        let sheet = SheetData::from_response(200, body).unwrap();
        assert_eq!(sheet.rows[0], vec!["x", "4", "", "4.5", "true"]);
        assert_eq!(sheet.layout_version, None);
    }

    #[test]
    fn non_json_failure_has_no_message() {
        let err = SheetData::from_response(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message("Failed to load submissions"), "Failed to load submissions");
    }

    #[test]
    fn non_json_success_is_a_decode_error() {
        let err = SheetData::from_response(200, "ok").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn body_field_reads_string_fields_only() {
        assert_eq!(body_field(r#"{"error":"nope"}"#, "error").as_deref(), Some("nope"));
        assert_eq!(body_field(r#"{"error":42}"#, "error"), None);
        assert_eq!(body_field("not json", "error"), None);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpFeedbackApi::with_client("http://127.0.0.1:9000/", reqwest::Client::new());
        assert_eq!(api.export_url(), "http://127.0.0.1:9000/download-excel");
    }
}
