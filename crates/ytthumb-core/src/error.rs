//! Error types for thumbnail processing.

/// Error raised while replacing directives or caching thumbnails.
///
/// None of these are recovered from inside the crate: the first error aborts
/// processing of the current content item.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    /// The directive carries additional lines after the video ID.
    ///
    /// Holds the rejected text after the first line break, verbatim.
    #[error("{0:?}")]
    UnsupportedMetadata(String),

    /// Thumbnail download failed (transport error or non-2xx status).
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// Thumbnail or logo could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Cache directory or file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
