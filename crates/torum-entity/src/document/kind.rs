//! Accepted document file types.

use std::fmt;

use serde::{Deserialize, Serialize};

use torum_core::AppError;

/// File formats accepted for reading documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Determine the kind from an uploaded file name's extension.
    pub fn from_file_name(name: &str) -> Result<Self, AppError> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(AppError::validation(
                "Only .pdf and .docx files are accepted",
            )),
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// MIME type the object is stored with.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Leading bytes every well-formed file of this kind starts with.
    ///
    /// DOCX files are ZIP containers.
    pub fn magic_bytes(&self) -> &'static [u8] {
        match self {
            Self::Pdf => b"%PDF",
            Self::Docx => b"PK\x03\x04",
        }
    }

    /// Whether `data` begins with this kind's signature.
    pub fn matches_content(&self, data: &[u8]) -> bool {
        data.starts_with(self.magic_bytes())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
