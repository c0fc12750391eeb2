//! JWT token validation and blocklist management.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;
use uuid::Uuid;

use torum_cache::CacheManager;
use torum_cache::keys;
use torum_core::config::AuthConfig;
use torum_core::error::AppError;
use torum_core::traits::cache::CacheProvider;

use super::claims::{Claims, TokenType};

/// Clock skew tolerated when checking `exp`, in seconds.
const LEEWAY_SECONDS: u64 = 5;

/// Shortest lifetime of a blocklist entry.
const MIN_BLOCKLIST_TTL_SECONDS: u64 = 60;

/// Validates JWT tokens and tracks revoked token IDs.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Cache holding blocklist entries.
    cache: CacheManager,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, cache: CacheManager) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cache,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks signature, expiration, token type and the blocklist.
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access).await
    }

    /// Decodes and validates a refresh token string.
    pub async fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh).await
    }

    async fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::authentication(format!(
                "Invalid token type: expected {} token",
                match expected {
                    TokenType::Access => "access",
                    TokenType::Refresh => "refresh",
                }
            )));
        }

        if self.is_revoked(&claims.jti).await? {
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Signature and expiry validation without type or blocklist checks.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Checks whether the given JWT ID has been blocklisted.
    pub async fn is_revoked(&self, jti: &Uuid) -> Result<bool, AppError> {
        self.cache.exists(&keys::jwt_blocklist(jti)).await
    }

    /// Blocklists a token for the rest of its lifetime.
    pub async fn revoke(&self, claims: &Claims) -> Result<(), AppError> {
        self.revoke_until(claims.jti, claims.expires_at()).await
    }

    /// Blocklists a token ID until `expires_at`, keeping the entry for at
    /// least a minute.
    pub async fn revoke_until(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let remaining = (expires_at - Utc::now()).num_seconds().max(0) as u64;
        let ttl = remaining.max(MIN_BLOCKLIST_TTL_SECONDS);
        self.cache
            .set(
                &keys::jwt_blocklist(jti),
                "revoked",
                Duration::from_secs(ttl),
            )
            .await?;

        debug!(jti = %jti, ttl_secs = ttl, "Token revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jsonwebtoken::{EncodingKey, Header, encode};
    use torum_cache::memory::MemoryCacheProvider;
    use torum_core::config::cache::MemoryCacheConfig;
    use torum_core::error::ErrorKind;
    use torum_entity::user::UserRole;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn setup() -> (AuthConfig, JwtEncoder, JwtDecoder, CacheManager) {
        let config = AuthConfig::default();
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig { max_capacity: 100 },
        )));
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config, cache.clone());
        (config, encoder, decoder, cache)
    }

    #[tokio::test]
    async fn test_access_token_round_trip() {
        let (_, encoder, decoder, _) = setup();
        let user_id = Uuid::new_v4();
        let pair = encoder
            .generate_token_pair(user_id, "mod@torum.dev", UserRole::Moderator)
            .unwrap();

        let claims = decoder.decode_access_token(&pair.access_token).await.unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "mod@torum.dev");
        assert_eq!(claims.role, UserRole::Moderator);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[tokio::test]
    async fn test_token_types_are_not_interchangeable() {
        let (_, encoder, decoder, _) = setup();
        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), "u@torum.dev", UserRole::User)
            .unwrap();

        let err = decoder
            .decode_access_token(&pair.refresh_token)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = decoder
            .decode_refresh_token(&pair.access_token)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        assert!(decoder.decode_refresh_token(&pair.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let (_, encoder, decoder, cache) = setup();
        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), "u@torum.dev", UserRole::User)
            .unwrap();
        let claims = decoder.decode_access_token(&pair.access_token).await.unwrap();

        decoder.revoke(&claims).await.unwrap();

        assert!(cache.exists(&keys::jwt_blocklist(claims.jti)).await.unwrap());
        let err = decoder
            .decode_access_token(&pair.access_token)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Token has been revoked");

        // The refresh token of the same pair is unaffected.
        assert!(decoder.decode_refresh_token(&pair.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (config, _, decoder, _) = setup();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "u@torum.dev".to_string(),
            role: UserRole::User,
            iat: now - 3600,
            exp: now - 60,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = decoder.decode_access_token(&token).await.unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[tokio::test]
    async fn test_foreign_signature_is_rejected() {
        let (_, _, decoder, _) = setup();
        let other = AuthConfig {
            jwt_secret: "another_secret_that_is_at_least_32_bytes".to_string(),
            ..AuthConfig::default()
        };
        let (token, _) = JwtEncoder::new(&other)
            .generate_access_token(Uuid::new_v4(), "u@torum.dev", UserRole::Admin)
            .unwrap();

        let err = decoder.decode_access_token(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let (_, _, decoder, _) = setup();
        let err = decoder.decode_access_token("not-a-jwt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
