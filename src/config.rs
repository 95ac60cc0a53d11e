//! Runtime configuration.
//!
//! The service reads its settings from the environment (after loading `.env`
//! via dotenvy). Clients resolve the service base URL from the host they are
//! running on; the resolved value is passed into each controller explicitly.

use std::collections::HashMap;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9000";

/// Production service used when the host is not a known deployment.
pub const DEFAULT_API_BASE: &str = "https://feedback-backend-vkzb.onrender.com";

const LOCAL_API_BASE: &str = "http://127.0.0.1:9000";

/// Known frontend hosts and the service each one talks to.
const KNOWN_HOSTS: &[(&str, &str)] = &[
    ("localhost", LOCAL_API_BASE),
    ("127.0.0.1", LOCAL_API_BASE),
    ("0.0.0.0", LOCAL_API_BASE),
];

/// Minimum SESSION_KEY length accepted by the cookie signer.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub session_key: Option<String>,
    pub admin_password_hash: Option<String>,
    pub admin_password: Option<String>,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map; blank values count as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        AppConfig {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL"),
            session_key: get("SESSION_KEY"),
            admin_password_hash: get("ADMIN_PASSWORD_HASH"),
            admin_password: get("ADMIN_PASSWORD"),
            secure_cookies: get("COOKIE_SECURE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// Pick the service base URL for a client running on `host`
/// (`hostname` or `hostname:port`).
pub fn resolve_api_base(host: &str) -> String {
    let hostname = host
        .trim()
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .split(['/', ':'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    KNOWN_HOSTS
        .iter()
        .find(|(known, _)| *known == hostname)
        .map(|(_, base)| base.to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_vars(&HashMap::new());
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert!(cfg.database_url.is_none());
        assert!(cfg.admin_password_hash.is_none());
        assert!(!cfg.secure_cookies);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = AppConfig::from_vars(&vars(&[("DATABASE_URL", "  "), ("COOKIE_SECURE", "true")]));
        assert!(cfg.database_url.is_none());
        assert!(cfg.secure_cookies);
    }

    #[test]
    fn local_hosts_use_the_local_service() {
        assert_eq!(resolve_api_base("localhost:3000"), LOCAL_API_BASE);
        assert_eq!(resolve_api_base("127.0.0.1"), LOCAL_API_BASE);
        assert_eq!(resolve_api_base("http://LOCALHOST:3000/admin"), LOCAL_API_BASE);
    }

    #[test]
    fn unknown_hosts_fall_back_to_production() {
        assert_eq!(resolve_api_base("feedback.example.org"), DEFAULT_API_BASE);
        assert_eq!(resolve_api_base(""), DEFAULT_API_BASE);
    }
}
