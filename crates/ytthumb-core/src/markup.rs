//! HTML generated in place of a directive.

use crate::consts::{EMBED_URL_BASE, THUMBNAIL_DIR, THUMBNAIL_EXTENSION};

/// Build the linked thumbnail for a video.
///
/// The anchor opens the video page in a new tab; the image points at the
/// cached thumbnail under `site_url`. Neither value is escaped.
///
/// # Example
///
/// ```
/// use ytthumb_core::thumbnail_link;
///
/// assert_eq!(
///     thumbnail_link("42", "https://example.org"),
///     r#"<a href="https://youtube.com/embed/42" target="_blank"><img src="https://example.org/images/youtube/42.jpg"></a>"#
/// );
/// ```
#[must_use]
pub fn thumbnail_link(video_id: &str, site_url: &str) -> String {
    let image_dir = THUMBNAIL_DIR.join("/");
    format!(
        r#"<a href="{EMBED_URL_BASE}/{video_id}" target="_blank"><img src="{site_url}/{image_dir}/{video_id}.{THUMBNAIL_EXTENSION}"></a>"#
    )
}
