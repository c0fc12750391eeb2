//! # torum-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for users, posts, reading documents and search.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
