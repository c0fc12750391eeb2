//! Authentication service: account registration and the token lifecycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use torum_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use torum_auth::password::{PasswordHasher, PasswordValidator};
use torum_cache::CacheManager;
use torum_cache::keys;
use torum_core::config::AuthConfig;
use torum_core::error::AppError;
use torum_core::traits::cache::CacheProvider;
use torum_database::repositories::UserRepository;
use torum_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Longest accepted username, in characters.
const MAX_USERNAME_LENGTH: usize = 50;

/// Handles account creation and JWT issuance/revocation.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    cache: CacheManager,
    config: AuthConfig,
}

/// Data for creating an account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login outcome.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued tokens.
    pub tokens: TokenPair,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        cache: CacheManager,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
            cache,
            config,
        }
    }

    /// Creates a regular member account.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = normalize_username(&req.username)?;
        let email = req.email.trim().to_string();

        self.validator
            .validate(&req.password, &[username.as_str(), email.as_str()])?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already existed"));
        }

        let hashed_password = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email,
                hashed_password,
                user_role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.user_id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// Unknown emails and wrong passwords produce the same error. Repeated
    /// failures for one email are throttled for `lockout_duration_minutes`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = email.trim();
        let throttle_key = keys::login_failures(email);

        if let Some(count) = self.cache.get(&throttle_key).await? {
            if count.parse::<i64>().unwrap_or(0) >= self.config.max_failed_attempts {
                warn!(email = %email, "Login rejected: too many failed attempts");
                return Err(AppError::rate_limit(
                    "Too many failed login attempts. Please try again later.",
                ));
            }
        }

        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) if self.hasher.verify_password(password, &user.hashed_password)? => user,
            _ => {
                let window = Duration::from_secs(self.config.lockout_duration_minutes * 60);
                let failures = self.cache.incr(&throttle_key, window).await?;
                debug!(email = %email, failures, "Failed login attempt");
                return Err(AppError::authentication("Invalid email or password"));
            }
        };

        self.cache.delete(&throttle_key).await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.user_id, &user.email, user.user_role)?;

        info!(user_id = %user.user_id, role = %user.user_role, "User logged in");
        Ok(LoginResult { user, tokens })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated. The new access token
    /// carries the role currently stored for the user.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, DateTime<Utc>), AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        let issued = self
            .encoder
            .generate_access_token(user.user_id, &user.email, user.user_role)?;

        debug!(user_id = %user.user_id, "Access token refreshed");
        Ok(issued)
    }

    /// Revokes the caller's access token and, optionally, a refresh token.
    ///
    /// A refresh token that is invalid, already revoked, or belongs to
    /// someone else is ignored.
    pub async fn logout(
        &self,
        ctx: &RequestContext,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        self.decoder
            .revoke_until(ctx.token_id, ctx.token_expires_at)
            .await?;

        if let Some(token) = refresh_token {
            match self.decoder.decode_refresh_token(token).await {
                Ok(claims) if claims.user_id() == ctx.user_id => {
                    self.decoder.revoke(&claims).await?;
                }
                Ok(claims) => {
                    warn!(
                        user_id = %ctx.user_id,
                        token_owner = %claims.user_id(),
                        "Ignoring refresh token owned by another user"
                    );
                }
                Err(e) => debug!(user_id = %ctx.user_id, error = %e, "Ignoring refresh token"),
            }
        }

        info!(user_id = %ctx.user_id, ip = %ctx.ip_address, "User logged out");
        Ok(())
    }

    /// Loads the account behind a request.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

/// Trim and bound a username.
pub(crate) fn normalize_username(raw: &str) -> Result<String, AppError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AppError::validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(username.to_string())
}
