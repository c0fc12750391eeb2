//! # torum-storage
//!
//! Object storage providers for uploaded reading documents. Supports
//! S3-compatible object stores and a local filesystem backend for
//! development and tests.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
