//! Concrete repository implementations backed by PostgreSQL.

pub mod document;
pub mod post;
pub mod search;
pub mod user;

pub use document::DocumentRepository;
pub use post::PostRepository;
pub use search::SearchRepository;
pub use user::UserRepository;
