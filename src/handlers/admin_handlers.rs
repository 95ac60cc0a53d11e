use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::admin::table::{SortSpec, sort_records};
use crate::auth::password::AdminGate;
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session;
use crate::db::Store;
use crate::errors::AppError;
use crate::models::feedback::Section;
use crate::models::submission::{StoredSubmission, average, decode_row, format_average, layout, queries};

pub const EXPORT_FILENAME: &str = "Training_Feedback_Data.csv";

pub const EXPORT_HEADERS: [&str; 9] = [
    "Submitted At",
    "Participant",
    "Email",
    "Role",
    "Training Title",
    "Instructor",
    "Avg Rating",
    "Topics Covered",
    "Comments",
];

/// `?sort=<column>&dir=<asc|desc>` on the export link.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Body of `GET /view-data`.
#[derive(Debug, Serialize)]
pub struct ViewDataResponse {
    pub status: &'static str,
    pub layout_version: u32,
    pub total_submissions: usize,
    pub headers: Vec<String>,
    pub data: Vec<Vec<String>>,
}

/// POST /admin/login - check the shared admin password, start a session
pub async fn login(
    req: HttpRequest,
    session: Session,
    gate: web::Data<AdminGate>,
    throttle: web::Data<LoginThrottle>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check before hashing anything
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if throttle.is_blocked(ip) {
        log::warn!("Admin login blocked for {ip}");
        return Err(AppError::TooManyAttempts);
    }

    if gate.check(&body.password)? {
        throttle.clear(ip);
        session::sign_in(&session)?;
        log::info!("Admin signed in from {ip}");
        Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
    } else {
        throttle.record_failure(ip);
        log::warn!("Failed admin login from {ip}");
        Err(AppError::Unauthorized("Incorrect password".to_string()))
    }
}

/// POST /admin/logout
pub async fn logout(session: Session) -> HttpResponse {
    session::sign_out(&session);
    HttpResponse::Ok().json(json!({ "status": "success" }))
}

/// GET /view-data - every submission as a positional row
pub async fn view_data(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let submissions = queries::find_all(&store).await?;
    let data: Vec<Vec<String>> = submissions.iter().map(StoredSubmission::to_row).collect();

    Ok(HttpResponse::Ok().json(ViewDataResponse {
        status: "success",
        layout_version: layout::ROW_LAYOUT_VERSION,
        total_submissions: data.len(),
        headers: layout::headers(),
        data,
    }))
}

/// Leading characters a spreadsheet reads as the start of a formula.
const FORMULA_TRIGGERS: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

/// Quote a cell for CSV. Text that would start a formula gets a leading `'`
/// so the spreadsheet shows it as text.
fn escape_csv(s: &str) -> String {
    let s = if s.starts_with(&FORMULA_TRIGGERS[..]) {
        format!("'{s}")
    } else {
        s.to_string()
    };
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s
    }
}

/// Overall-impression average, the single figure shown in the export.
fn overall_average(s: &StoredSubmission) -> Option<f64> {
    average(s.ratings(Section::Overall).iter().map(|&r| f64::from(r)))
}

/// Spreadsheet export: one summary line per submission.
/// Starts with a UTF-8 BOM so Excel picks the right encoding.
pub fn export_csv(submissions: &[StoredSubmission]) -> String {
    let mut csv = String::from("\u{feff}");
    csv.push_str(&EXPORT_HEADERS.join(","));
    csv.push('\n');
    for s in submissions {
        let avg = overall_average(s)
            .map(|v| format_average(Some(v)))
            .unwrap_or_default();
        let fields = [
            escape_csv(&s.submitted_at),
            escape_csv(&s.full_name),
            escape_csv(&s.email),
            escape_csv(&s.job_role),
            escape_csv(&s.training_title),
            escape_csv(&s.instructor_name),
            avg,
            escape_csv(&s.covered_topics.join(", ")),
            escape_csv(&s.comments),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

/// Order stored submissions the way the admin table shows them.
pub fn order_for_export(submissions: Vec<StoredSubmission>, spec: SortSpec) -> Vec<StoredSubmission> {
    let records: Vec<_> = submissions.iter().map(|s| decode_row(&s.to_row())).collect();
    let mut order: Vec<_> = records.iter().collect();
    sort_records(&mut order, spec);

    let mut slots: Vec<Option<StoredSubmission>> = submissions.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|record| {
            let idx = records.iter().position(|r| std::ptr::eq(r, record))?;
            slots[idx].take()
        })
        .collect()
}

/// GET /download-excel - spreadsheet attachment, rows in table order
pub async fn download_excel(
    store: web::Data<Store>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    let spec = SortSpec::from_params(query.sort.as_deref(), query.dir.as_deref());
    let submissions = order_for_export(queries::find_all(&store).await?, spec);
    log::info!(
        "Exporting {} submissions sorted by {} {}",
        submissions.len(),
        spec.column.as_str(),
        spec.dir.as_str()
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        ))
        .body(export_csv(&submissions)))
}

/// DELETE /delete-feedback/{submission_id}
pub async fn delete_feedback(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let submission_id = path.into_inner();

    if !queries::delete_by_submission_id(&store, &submission_id).await? {
        return Err(AppError::NotFound(format!(
            "Submission with ID {submission_id} not found."
        )));
    }

    log::info!("Deleted submission {submission_id}");
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": format!("Submission {submission_id} deleted successfully."),
    })))
}
