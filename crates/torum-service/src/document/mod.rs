//! Reading document upload, listing, download links and removal.

pub mod service;

pub use service::{DocumentService, DownloadLink, UploadDocumentParams};
