//! Thumbnail download.
//!
//! [`ThumbnailSource`] is the seam between the cache and the network.
//! [`HttpSource`] is the production implementation backed by a ureq agent.

use std::time::Duration;

use ureq::Agent;

use crate::consts::{THUMBNAIL_REMOTE_NAME, THUMBNAIL_URL_BASE};
use crate::error::ThumbnailError;

/// Remote URL of the highest-resolution thumbnail for a video.
///
/// ```
/// assert_eq!(
///     ytthumb_core::thumbnail_url("42"),
///     "https://i.ytimg.com/vi/42/maxresdefault.jpg"
/// );
/// ```
#[must_use]
pub fn thumbnail_url(video_id: &str) -> String {
    format!("{THUMBNAIL_URL_BASE}/{video_id}/{THUMBNAIL_REMOTE_NAME}")
}

/// Something that can return the bytes behind a thumbnail URL.
pub trait ThumbnailSource {
    /// Fetch the body of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::Fetch`] on transport failure or a non-2xx status.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError>;
}

impl<S: ThumbnailSource + ?Sized> ThumbnailSource for &S {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        (**self).fetch(url)
    }
}

/// Create an HTTP agent with an optional global timeout.
///
/// Status codes of 400 and above are reported as errors.
pub fn create_agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .timeout_global(timeout)
        .http_status_as_error(true)
        .build()
        .into()
}

/// Fetches thumbnails over HTTP. No retries.
pub struct HttpSource {
    agent: Agent,
}

impl HttpSource {
    /// Create a source with the given request timeout (`None` waits indefinitely).
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            agent: create_agent(timeout),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ThumbnailSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        let to_error = |source| ThumbnailError::Fetch {
            url: url.to_owned(),
            source,
        };

        let response = self.agent.get(url).call().map_err(to_error)?;
        response.into_body().read_to_vec().map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_url_contains_id() {
        assert_eq!(
            thumbnail_url("qwertz1234"),
            "https://i.ytimg.com/vi/qwertz1234/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_reference_delegates() {
        struct Fixed;

        impl ThumbnailSource for Fixed {
            fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
                Ok(url.as_bytes().to_vec())
            }
        }

        let source = Fixed;
        let by_ref: &dyn ThumbnailSource = &source;
        assert_eq!(by_ref.fetch("abc").unwrap(), b"abc".to_vec());
        assert_eq!((&source).fetch("xyz").unwrap(), b"xyz".to_vec());
    }
}
