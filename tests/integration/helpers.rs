//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use torum_api::{AppState, build_router, build_state};
use torum_core::config::AppConfig;
use torum_database::DatabasePool;
use torum_database::migration::run_migrations;
use torum_database::repositories::UserRepository;
use torum_entity::user::UserRole;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_ENV: &str = "TORUM_TEST_DATABASE_URL";

/// A password that satisfies the default policy.
pub const STRONG_PASSWORD: &str = "Quiet-Harbor-2024-lantern";

const BOUNDARY: &str = "torum-integration-boundary";

/// Build a [`TestApp`] or return from the test when no database is configured.
macro_rules! test_app {
    () => {
        match crate::helpers::TestApp::try_new().await {
            Some(app) => app,
            None => {
                eprintln!(
                    "skipping: {} is not set",
                    crate::helpers::TEST_DATABASE_URL_ENV
                );
                return;
            }
        }
    };
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Shared state behind the router
    pub state: AppState,
    /// Root of the local object storage
    pub storage_dir: TempDir,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// A registered account with live tokens
pub struct TestUser {
    /// User ID
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
}

impl TestApp {
    /// Create a new test application, or `None` without a test database.
    pub async fn try_new() -> Option<Self> {
        let url = std::env::var(TEST_DATABASE_URL_ENV).ok()?;
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

        let mut config = AppConfig::default();
        config.database.url = url;
        config.database.min_connections = 0;
        config.database.max_connections = 5;
        config.storage.local.root_path = storage_dir.path().to_string_lossy().into_owned();

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();
        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = build_state(config, db_pool.clone())
            .await
            .expect("Failed to build state");

        Some(Self {
            router: build_router(state.clone()),
            db_pool,
            state,
            storage_dir,
        })
    }

    /// Send a JSON request through the router.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    /// Upload a document through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        title: &str,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"docs_title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::post("/api/documents")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    /// Register a fresh account with the given role and log it in.
    pub async fn create_user(&self, role: UserRole) -> TestUser {
        let email = unique_email();
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({
                    "username": "tester",
                    "email": email,
                    "password": STRONG_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let id: Uuid = serde_json::from_value(response.data()["user_id"].clone()).unwrap();

        if role != UserRole::User {
            UserRepository::new(self.db_pool.clone())
                .update_role(id, role)
                .await
                .unwrap();
        }

        let login = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": STRONG_PASSWORD })),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);

        TestUser {
            id,
            email,
            access_token: login.data()["access_token"].as_str().unwrap().to_string(),
            refresh_token: login.data()["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}

/// An email address no other test uses.
pub fn unique_email() -> String {
    format!("user-{}@torum.test", Uuid::new_v4().simple())
}

/// A searchable word no other test uses.
pub fn unique_word() -> String {
    format!("marker{}", Uuid::new_v4().simple())
}

/// Minimal bytes accepted as a PDF upload.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n".to_vec()
}
