//! # torum-service
//!
//! Business logic service layer for Torum. Each service orchestrates
//! repositories, cache, object storage, and authentication to implement
//! one area of the forum's use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod document;
pub mod post;
pub mod search;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use document::DocumentService;
pub use post::PostService;
pub use search::SearchService;
pub use user::{AdminUserService, UserService};
