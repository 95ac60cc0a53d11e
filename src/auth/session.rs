use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

use crate::config::MIN_SESSION_KEY_LEN;
use crate::errors::AppError;

const ADMIN_KEY: &str = "admin";

/// Session cookie signing key from SESSION_KEY, or a random one.
pub fn session_key(configured: Option<&str>) -> Key {
    match configured {
        Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+); generating random key",
                val.len()
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set; generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("feedback_admin".to_string())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Strict)
        .build()
}

pub fn is_admin(session: &Session) -> bool {
    session.get::<bool>(ADMIN_KEY).unwrap_or(None).unwrap_or(false)
}

pub fn sign_in(session: &Session) -> Result<(), AppError> {
    session.renew();
    session
        .insert(ADMIN_KEY, true)
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn sign_out(session: &Session) {
    session.purge();
}
