//! Paragraph scanning and directive parsing.
//!
//! Paragraphs are located with a regex over the rendered HTML and flattened
//! to their text content (inner tags dropped, basic entities decoded) before
//! the directive prefix is checked.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{DIRECTIVE_PREFIX, DIRECTIVE_SEPARATOR};
use crate::error::ThumbnailError;

/// Matches a `<p>` start tag.
static PARAGRAPH_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>").unwrap());

/// Matches whatever ends a paragraph: its end tag, the next paragraph, or the
/// end tag of an enclosing block. The `</p>` tag is optional in HTML.
static PARAGRAPH_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?p[\s>]|</(?:address|article|aside|blockquote|body|dd|div|footer|header|li|main|nav|section|td|th)\s*>",
    )
    .unwrap()
});

/// Matches any tag inside a paragraph.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// A paragraph found in rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Byte range of the paragraph's inner HTML.
    pub span: Range<usize>,
    /// Flattened text content.
    pub text: String,
}

/// Iterate over every paragraph, in document order.
pub fn paragraphs(html: &str) -> impl Iterator<Item = Paragraph> + '_ {
    PARAGRAPH_OPEN_RE.find_iter(html).map(move |open| {
        let start = open.end();
        let end = PARAGRAPH_END_RE
            .find_at(html, start)
            .map_or(html.len(), |close| close.start());
        Paragraph {
            span: start..end,
            text: flatten_text(&html[start..end]),
        }
    })
}

/// Iterate over the flattened text of every paragraph, in document order.
pub fn paragraph_texts(html: &str) -> impl Iterator<Item = String> + '_ {
    paragraphs(html).map(|paragraph| paragraph.text)
}

/// Strip tags and decode the basic HTML entities.
#[must_use]
pub fn flatten_text(inner_html: &str) -> String {
    let text = TAG_RE.replace_all(inner_html, "");
    if !text.contains('&') {
        return text.into_owned();
    }
    // `&amp;` last so `&amp;lt;` decodes to `&lt;`, not `<`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Extract the video ID from a paragraph's text.
///
/// Returns `Ok(None)` when the text is not a directive. The ID is the text
/// between the first `::` and the next one (or the end), trimmed.
///
/// # Errors
///
/// Returns [`ThumbnailError::UnsupportedMetadata`] when the ID spans more
/// than one line. The payload is everything after the first line break.
pub fn parse_directive(text: &str) -> Result<Option<&str>, ThumbnailError> {
    if !text.starts_with(DIRECTIVE_PREFIX) {
        return Ok(None);
    }

    let video_id = text
        .split(DIRECTIVE_SEPARATOR)
        .nth(1)
        .unwrap_or_default()
        .trim();

    if let Some((_, rest)) = video_id.split_once('\n') {
        return Err(ThumbnailError::UnsupportedMetadata(rest.to_owned()));
    }

    Ok(Some(video_id))
}
