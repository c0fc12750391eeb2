//! Request context carrying the authenticated user and the token they presented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use torum_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from validated access token claims and passed
/// into service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// `jti` of the access token used for this request.
    pub token_id: Uuid,
    /// When that access token expires.
    pub token_expires_at: DateTime<Utc>,
    /// IP address of the request origin, used in audit log lines.
    pub ip_address: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        token_id: Uuid,
        token_expires_at: DateTime<Utc>,
        ip_address: String,
    ) -> Self {
        Self {
            user_id,
            role,
            token_id,
            token_expires_at,
            ip_address,
        }
    }
}
