//! Planned text substitutions for a content buffer.
//!
//! The replacer never edits the buffer while scanning. It returns a list of
//! [`Rewrite`]s, and [`Rewrites::apply`] performs them afterwards.

use std::ops::Range;

/// One directive paragraph and the markup that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Video ID parsed from the directive.
    pub video_id: String,
    /// Byte range of the paragraph's inner HTML in the scanned buffer.
    pub span: Range<usize>,
    /// Flattened paragraph text to look for.
    pub old: String,
    /// Replacement markup.
    pub new: String,
}

/// Ordered collection of [`Rewrite`]s.
///
/// # Example
///
/// ```
/// use ytthumb_core::{Rewrite, Rewrites};
///
/// let mut html = "<p>.. youtube:: 42</p>".to_owned();
/// let mut rewrites = Rewrites::new();
/// rewrites.push(Rewrite {
///     video_id: "42".to_owned(),
///     span: 3..18,
///     old: ".. youtube:: 42".to_owned(),
///     new: "<a>42</a>".to_owned(),
/// });
/// assert_eq!(rewrites.apply(&mut html), 1);
/// assert_eq!(html, "<p><a>42</a></p>");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rewrites {
    items: Vec<Rewrite>,
}

impl Rewrites {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rewrite. Spans must be added in document order and must not
    /// overlap.
    pub fn push(&mut self, rewrite: Rewrite) {
        self.items.push(rewrite);
    }

    /// Apply every rewrite to `html`, returning how many matched.
    ///
    /// Each rewrite replaces the first occurrence of its `old` text inside its
    /// own span, so identical text elsewhere on the page is left alone. Spans
    /// are applied back to front to keep earlier offsets valid.
    pub fn apply(&self, html: &mut String) -> usize {
        let mut applied = 0;
        for rewrite in self.items.iter().rev() {
            let found = html
                .get(rewrite.span.clone())
                .and_then(|inner| inner.find(&rewrite.old));
            if let Some(offset) = found {
                let start = rewrite.span.start + offset;
                html.replace_range(start..start + rewrite.old.len(), &rewrite.new);
                applied += 1;
            } else {
                tracing::warn!(
                    video_id = %rewrite.video_id,
                    "directive text not found verbatim in content, left unchanged"
                );
            }
        }
        applied
    }

    /// Iterate over the registered rewrites.
    pub fn iter(&self) -> std::slice::Iter<'_, Rewrite> {
        self.items.iter()
    }

    /// Check if there are any rewrites registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of registered rewrites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a> IntoIterator for &'a Rewrites {
    type Item = &'a Rewrite;
    type IntoIter = std::slice::Iter<'a, Rewrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
