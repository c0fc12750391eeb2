//! Database-backed integration tests.
//!
//! Set `TORUM_TEST_DATABASE_URL` to a disposable PostgreSQL database to run
//! them; without it every test returns early.

#[macro_use]
mod helpers;

mod admin_test;
mod auth_test;
mod document_test;
mod post_test;
mod search_test;
