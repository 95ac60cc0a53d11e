pub mod admin_handlers;
pub mod feedback_handlers;

use actix_web::{HttpResponse, error::InternalError, web};

use crate::auth::middleware::{require_admin, require_json_content_type};
use crate::auth::password::AdminGate;
use crate::auth::rate_limit::LoginThrottle;
use crate::db::Store;
use crate::errors::ErrorBody;

/// Everything the handlers pull out of `app_data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub admin: AdminGate,
    pub throttle: LoginThrottle,
}

impl AppState {
    pub fn new(store: Store, admin: AdminGate) -> Self {
        AppState {
            store,
            admin,
            throttle: LoginThrottle::new(),
        }
    }
}

/// Register shared state and every route. Session middleware is applied by
/// the caller on the enclosing `App`.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state.store))
            .app_data(web::Data::new(state.admin))
            .app_data(web::Data::new(state.throttle))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response = HttpResponse::BadRequest().json(ErrorBody::new(format!("Invalid request body: {err}")));
                InternalError::from_response(err, response).into()
            }));
        routes(cfg);
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(feedback_handlers::index))
        .route("/health", web::get().to(feedback_handlers::health))
        .service(
            web::resource("/submit-feedback")
                .wrap(actix_web::middleware::from_fn(require_json_content_type))
                .route(web::post().to(feedback_handlers::submit_feedback)),
        )
        .service(
            web::scope("/admin")
                .wrap(actix_web::middleware::from_fn(require_json_content_type))
                .route("/login", web::post().to(admin_handlers::login))
                .route("/logout", web::post().to(admin_handlers::logout)),
        )
        .service(
            web::resource("/view-data")
                .wrap(actix_web::middleware::from_fn(require_admin))
                .route(web::get().to(admin_handlers::view_data)),
        )
        .service(
            web::resource("/download-excel")
                .wrap(actix_web::middleware::from_fn(require_admin))
                .route(web::get().to(admin_handlers::download_excel)),
        )
        .service(
            web::resource("/delete-feedback/{submission_id}")
                .wrap(actix_web::middleware::from_fn(require_json_content_type))
                .wrap(actix_web::middleware::from_fn(require_admin))
                .route(web::delete().to(admin_handlers::delete_feedback)),
        );
}

/// JSON 404 for anything unrouted.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}
