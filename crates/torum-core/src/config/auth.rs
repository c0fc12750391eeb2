//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn strength score (0-4).
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
    /// Failed logins tolerated per email before the lockout applies.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i64,
    /// Lockout window in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_min_score: default_password_score(),
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == default_jwt_secret()
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION_torum_jwt_secret".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

fn default_password_score() -> u8 {
    2
}

fn default_max_failed() -> i64 {
    5
}

fn default_lockout() -> u64 {
    15
}
