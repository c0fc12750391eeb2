//! Core type definitions used across the Torum workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
