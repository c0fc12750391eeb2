//! # torum-entity
//!
//! Domain entity models for Torum. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow` and map column names one-to-one.

pub mod document;
pub mod post;
pub mod user;
