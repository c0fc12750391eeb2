//! Route definitions for the Torum HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::object_links::{LOCAL_OBJECTS_PATH, require_unexpired_link};
use crate::state::AppState;

/// Room for multipart boundaries and the text fields around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let max_upload = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(document_routes(max_upload))
        .merge(search_routes())
        .merge(admin_routes(state.clone()))
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    let mut router = Router::new().nest("/api", api_routes);
    if state.config.storage.provider == "local" {
        router = router.merge(local_object_routes(&state.config.storage.local.root_path));
    }

    router
        .layer(DefaultBodyLimit::max(max_body))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// User profile endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_me).put(handlers::user::update_me),
        )
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Forum post endpoints
fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::post::list_posts).post(handlers::post::create_post),
        )
        .route("/posts/mine", get(handlers::post::list_my_posts))
        .route(
            "/posts/{id}",
            get(handlers::post::get_post)
                .put(handlers::post::update_post)
                .delete(handlers::post::delete_post),
        )
}

/// Reading document endpoints
fn document_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(
                handlers::document::upload_document,
            ),
        )
        .route_layer(DefaultBodyLimit::max(max_upload))
        .route(
            "/documents/mine",
            get(handlers::document::list_my_documents),
        )
        .route(
            "/documents/{id}",
            get(handlers::document::get_document).delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::document::download_document),
        )
}

/// Search endpoints
fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search::search))
}

/// Admin-only endpoints
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::rbac::require_admin,
        ))
}

/// Download links issued by the local storage provider
fn local_object_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .nest_service(LOCAL_OBJECTS_PATH, ServeDir::new(root_path))
        .layer(axum_middleware::from_fn(require_unexpired_link))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
