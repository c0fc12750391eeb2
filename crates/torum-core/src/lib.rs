//! # torum-core
//!
//! Core crate for the Torum forum backend. Contains configuration schemas,
//! pagination types, the cache and object storage traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Torum crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
