//! Reading document entities.

pub mod kind;
pub mod model;

pub use kind::DocumentKind;
pub use model::{CreateReadingDocument, DEFAULT_TAGS, ReadingDocument};
