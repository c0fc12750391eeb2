//! Application builder: wires repositories, auth and services into `AppState`
//! and runs the HTTP server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

use torum_auth::jwt::{JwtDecoder, JwtEncoder};
use torum_auth::password::{PasswordHasher, PasswordValidator};
use torum_auth::rbac::RbacEnforcer;
use torum_cache::CacheManager;
use torum_core::config::AppConfig;
use torum_core::error::{AppError, ErrorKind};
use torum_database::migration::run_migrations;
use torum_database::repositories::{
    DocumentRepository, PostRepository, SearchRepository, UserRepository,
};
use torum_service::{
    AdminUserService, AuthService, DocumentService, PostService, SearchService, UserService,
};
use torum_storage::StorageManager;

use crate::router::build_router;
use crate::state::AppState;

/// Constructs every shared dependency from configuration and a pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // ── Step 1: Initialize cache ─────────────────────────────────
    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = CacheManager::new(&config.cache).await?;

    // ── Step 2: Initialize object storage ────────────────────────
    let storage = Arc::new(StorageManager::new(&config.storage).await?);

    // ── Step 3: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let post_repo = Arc::new(PostRepository::new(db_pool.clone()));
    let doc_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
    let search_repo = Arc::new(SearchRepository::new(db_pool.clone()));

    // ── Step 4: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, cache.clone()));
    let rbac = Arc::new(RbacEnforcer::new());

    // ── Step 5: Initialize services ──────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        cache.clone(),
        config.auth.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&rbac),
    ));
    let admin_user_service = Arc::new(AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&rbac),
    ));
    let post_service = Arc::new(PostService::new(post_repo, Arc::clone(&rbac)));
    let document_service = Arc::new(DocumentService::new(
        doc_repo,
        Arc::clone(&storage),
        Arc::clone(&rbac),
        config.storage.clone(),
    ));
    let search_service = Arc::new(SearchService::new(search_repo));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        storage,
        jwt_encoder,
        jwt_decoder,
        rbac,
        auth_service,
        user_service,
        admin_user_service,
        post_service,
        document_service,
        search_service,
    })
}

/// Runs the Torum server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    info!("Starting Torum server...");

    if config.auth.uses_default_secret() {
        warn!("auth.jwt_secret is the built-in development value; override it in production");
    }

    // ── Step 1: Apply migrations ─────────────────────────────────
    if config.database.run_migrations {
        run_migrations(&db_pool).await?;
    }

    // ── Step 2: Build state and router ───────────────────────────
    let bind_address = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = build_state(config, db_pool.clone()).await?;
    let app = build_router(state);

    // ── Step 3: Bind and serve ───────────────────────────────────
    let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to bind {bind_address}"),
            e,
        )
    })?;
    info!(address = %bind_address, "Torum server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    tokio::pin!(server);

    // In-flight requests get `grace` to finish once a signal arrives.
    let drain_deadline = async {
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
        }
        _ = drain_deadline => {
            warn!(grace_secs = grace.as_secs(), "Graceful shutdown timed out; dropping open connections");
        }
    }

    // ── Step 4: Release resources ────────────────────────────────
    db_pool.close().await;
    info!("Torum server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
