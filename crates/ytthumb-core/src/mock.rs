//! Mock thumbnail source for testing.
//!
//! Provides [`MockSource`] for exercising the cache and replacer without
//! network access.

use std::sync::Mutex;

use crate::error::ThumbnailError;
use crate::fetch::ThumbnailSource;

/// In-memory [`ThumbnailSource`] that records every requested URL.
///
/// # Example
///
/// ```ignore
/// use ytthumb_core::{MockSource, ThumbnailSource};
///
/// let source = MockSource::new(b"jpeg".to_vec());
/// source.fetch("https://i.ytimg.com/vi/42/maxresdefault.jpg").unwrap();
/// assert_eq!(source.requests().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockSource {
    response: Result<Vec<u8>, u16>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    /// Source answering every request with `body`.
    #[must_use]
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            response: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Source failing every request with the given HTTP status.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ThumbnailSource for MockSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        self.requests.lock().unwrap().push(url.to_owned());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ThumbnailError::Fetch {
                url: url.to_owned(),
                source: ureq::Error::StatusCode(*status),
            }),
        }
    }
}
