//! # torum-auth
//!
//! Authentication and authorization primitives for Torum.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token issuance, validation and revocation
//! - `password`: Argon2id hashing and password policy enforcement
//! - `rbac`: role hierarchy checks and role-to-permission mapping

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
