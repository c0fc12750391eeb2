//! Full-text search across posts and documents.

pub mod service;

pub use service::{SearchResults, SearchService};
