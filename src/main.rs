use actix_web::{App, HttpServer, middleware, web};

use training_feedback::auth::password::AdminGate;
use training_feedback::auth::session;
use training_feedback::config::AppConfig;
use training_feedback::db;
use training_feedback::handlers::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let store = db::connect(config.database_url.as_deref())
        .await
        .map_err(std::io::Error::other)?;

    let admin = AdminGate::from_config(&config).map_err(std::io::Error::other)?;

    let secret_key = session::session_key(config.session_key.as_deref());
    let state = AppState::new(store, admin);
    let secure = config.secure_cookies;

    log::info!(
        "Starting server at http://{} ({} storage)",
        config.bind_addr,
        state.store.backend_name()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(session::session_middleware(secret_key.clone(), secure))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_app(state.clone()))
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
