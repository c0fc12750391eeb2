//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod document;
pub mod health;
pub mod post;
pub mod search;
pub mod user;
