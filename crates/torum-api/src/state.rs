//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use torum_auth::jwt::{JwtDecoder, JwtEncoder};
use torum_auth::rbac::RbacEnforcer;
use torum_cache::CacheManager;
use torum_core::config::AppConfig;
use torum_service::{
    AdminUserService, AuthService, DocumentService, PostService, SearchService, UserService,
};
use torum_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory)
    pub cache: CacheManager,
    /// Object storage provider
    pub storage: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder with blocklist access
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role-based access control enforcer
    pub rbac: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and token lifecycle
    pub auth_service: Arc<AuthService>,
    /// Profile self-service
    pub user_service: Arc<UserService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Forum posts
    pub post_service: Arc<PostService>,
    /// Reading documents
    pub document_service: Arc<DocumentService>,
    /// Full-text search
    pub search_service: Arc<SearchService>,
}
