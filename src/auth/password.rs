use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::AppConfig;
use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AppError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The shared admin secret, held only as an argon2 PHC hash.
#[derive(Clone)]
pub struct AdminGate {
    hash: Option<String>,
}

impl AdminGate {
    /// A gate that refuses every login.
    pub fn disabled() -> Self {
        AdminGate { hash: None }
    }

    pub fn from_hash(hash: impl Into<String>) -> Result<Self, AppError> {
        let hash = hash.into();
        PasswordHash::new(&hash)
            .map_err(|e| AppError::Config(format!("ADMIN_PASSWORD_HASH is not a valid PHC string: {e}")))?;
        Ok(AdminGate { hash: Some(hash) })
    }

    pub fn from_plaintext(password: &str) -> Result<Self, AppError> {
        Ok(AdminGate { hash: Some(hash_password(password)?) })
    }

    /// A configured hash wins over a plaintext password.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        match (&config.admin_password_hash, &config.admin_password) {
            (Some(hash), _) => Self::from_hash(hash.clone()),
            (None, Some(plain)) => {
                log::warn!("ADMIN_PASSWORD is set in plaintext; prefer ADMIN_PASSWORD_HASH");
                Self::from_plaintext(plain)
            }
            (None, None) => {
                log::warn!("No admin password configured; admin endpoints are disabled");
                Ok(Self::disabled())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.hash.is_some()
    }

    pub fn check(&self, candidate: &str) -> Result<bool, AppError> {
        match &self.hash {
            Some(hash) => verify_password(candidate, hash),
            None => Err(AppError::Config("Admin access is not configured".to_string())),
        }
    }
}
