//! Content items handed to the replacer by the host.

/// A single content item produced by the site generator.
///
/// Only rendered documents are scanned for directives. Static assets pass
/// through the replacer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Rendered page body (HTML).
    Document(String),
    /// Binary or static asset, never parsed.
    Static(Vec<u8>),
}

impl Content {
    /// Classify raw file bytes: valid UTF-8 is a document, anything else is static.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Document(text),
            Err(err) => Self::Static(err.into_bytes()),
        }
    }

    /// Document text, if this is a document.
    #[must_use]
    pub fn as_document(&self) -> Option<&str> {
        match self {
            Self::Document(text) => Some(text),
            Self::Static(_) => None,
        }
    }

    /// Raw bytes of the item, for writing back to disk.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Document(text) => text.into_bytes(),
            Self::Static(bytes) => bytes,
        }
    }
}
