//! Forum post operations.

pub mod service;

pub use service::{PostInput, PostService};
