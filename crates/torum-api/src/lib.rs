//! # torum-api
//!
//! HTTP API layer for Torum built on Axum. Contains the router, request
//! handlers, authentication extractors, DTOs, middleware, and the mapping
//! from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
