//! Cache key builders for every Torum cache entry.
//!
//! Centralising key construction keeps the writer and the reader of each
//! entry in agreement.

use std::fmt::Display;

/// Key marking a revoked JWT by its `jti`.
pub fn jwt_blocklist(jti: impl Display) -> String {
    format!("jwt:blocklist:{jti}")
}

/// Key counting failed login attempts for an email address.
pub fn login_failures(email: &str) -> String {
    format!("auth:login_failures:{}", email.trim().to_lowercase())
}
