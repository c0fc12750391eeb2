//! Registration, login, token refresh and logout.

pub mod service;

pub use service::{AuthService, LoginResult, RegisterRequest};
