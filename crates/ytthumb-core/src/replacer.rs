//! Directive replacement over rendered content.
//!
//! [`ThumbnailReplacer`] finds `.. youtube:: <id>` paragraphs, makes sure the
//! thumbnail for each ID is cached, and rewrites the paragraph text into a
//! linked image.

use std::path::PathBuf;

use crate::cache::{CacheStatus, output_file, save_thumbnail};
use crate::content::Content;
use crate::directive::{paragraphs, parse_directive};
use crate::error::ThumbnailError;
use crate::fetch::{HttpSource, ThumbnailSource};
use crate::markup::thumbnail_link;
use crate::rewrite::{Rewrite, Rewrites};

/// Settings read by the replacer.
#[derive(Debug, Clone)]
pub struct ThumbnailSettings {
    /// Site output directory; thumbnails go to `images/youtube/` below it.
    pub output_path: PathBuf,
    /// Base URL prepended to image paths in the generated markup.
    pub site_url: String,
    /// Composite the play-button logo onto downloaded thumbnails.
    pub add_overlay: bool,
}

impl ThumbnailSettings {
    /// Settings with an empty site URL and the overlay enabled.
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            site_url: String::new(),
            add_overlay: true,
        }
    }

    /// Set the site URL.
    #[must_use]
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Enable or disable the overlay.
    #[must_use]
    pub fn with_overlay(mut self, add_overlay: bool) -> Self {
        self.add_overlay = add_overlay;
        self
    }
}

/// Replaces video directives in rendered content.
///
/// # Example
///
/// ```no_run
/// use ytthumb_core::{Content, ThumbnailReplacer, ThumbnailSettings};
///
/// let replacer = ThumbnailReplacer::new(ThumbnailSettings::new("output"));
/// let page = Content::Document("<p>.. youtube:: dQw4w9WgXcQ</p>".to_owned());
/// let page = replacer.process(page)?;
/// # Ok::<(), ytthumb_core::ThumbnailError>(())
/// ```
pub struct ThumbnailReplacer<S = HttpSource> {
    settings: ThumbnailSettings,
    source: S,
}

impl ThumbnailReplacer<HttpSource> {
    /// Create a replacer that downloads thumbnails over HTTP without a timeout.
    #[must_use]
    pub fn new(settings: ThumbnailSettings) -> Self {
        Self::with_source(settings, HttpSource::default())
    }
}

impl<S: ThumbnailSource> ThumbnailReplacer<S> {
    /// Create a replacer with a custom thumbnail source.
    #[must_use]
    pub fn with_source(settings: ThumbnailSettings, source: S) -> Self {
        Self { settings, source }
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &ThumbnailSettings {
        &self.settings
    }

    /// Thumbnail source in use.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Scan `html` and plan a rewrite for every directive paragraph.
    ///
    /// Thumbnails are cached as a side effect, one directive at a time in
    /// document order. The buffer itself is not touched.
    ///
    /// # Errors
    ///
    /// Stops at the first directive with extra lines
    /// ([`ThumbnailError::UnsupportedMetadata`]) or the first fetch, decode
    /// or write failure.
    pub fn rewrites(&self, html: &str) -> Result<Rewrites, ThumbnailError> {
        let mut rewrites = Rewrites::new();

        for paragraph in paragraphs(html) {
            let Some(video_id) = parse_directive(&paragraph.text)? else {
                continue;
            };

            self.cache_thumbnail(video_id)?;
            let markup = thumbnail_link(video_id, &self.settings.site_url);
            tracing::debug!(video_id, "replacing directive");

            rewrites.push(Rewrite {
                video_id: video_id.to_owned(),
                span: paragraph.span,
                new: markup,
                old: paragraph.text,
            });
        }

        Ok(rewrites)
    }

    /// Ensure the thumbnail for `video_id` exists in the output directory.
    ///
    /// # Errors
    ///
    /// Propagates directory, fetch, decode and write errors.
    pub fn cache_thumbnail(&self, video_id: &str) -> Result<CacheStatus, ThumbnailError> {
        let path = output_file(&self.settings.output_path, video_id)?;
        save_thumbnail(&self.source, video_id, &path, self.settings.add_overlay)
    }

    /// Replace every directive in `content` and return the new content.
    ///
    /// Static content is returned as-is without being parsed.
    ///
    /// # Errors
    ///
    /// See [`rewrites`](Self::rewrites).
    pub fn process(&self, content: Content) -> Result<Content, ThumbnailError> {
        match content {
            Content::Static(_) => Ok(content),
            Content::Document(mut html) => {
                let rewrites = self.rewrites(&html)?;
                rewrites.apply(&mut html);
                Ok(Content::Document(html))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Parser, html};
    use tempfile::TempDir;

    fn replacer(tmp: &TempDir) -> ThumbnailReplacer<MockSource> {
        let settings = ThumbnailSettings::new(tmp.path()).with_overlay(false);
        ThumbnailReplacer::with_source(settings, MockSource::new(b"jpeg".to_vec()))
    }

    fn render_markdown(markdown: &str) -> String {
        let mut output = String::new();
        html::push_html(&mut output, Parser::new(markdown));
        output
    }

    fn document(content: Content) -> String {
        match content {
            Content::Document(html) => html,
            Content::Static(_) => panic!("expected document"),
        }
    }

    const PAGE: &str = "<h3>My page</h3>\n\
<p>Welcome to my page!</p>\n\
<p>.. note::</p>\n\
<p>Want to learn more? Have a look at the video:</p>\n\
<p>.. youtube:: 1337</p>\n\
<p>.. youtube:: 1338</p>\n\
<p>Unrelated text.</p>\n\
<p>.. youtube:: qwertz1234</p>\n";

    #[test]
    fn test_process_replaces_three_directives() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);

        let html = document(replacer.process(Content::Document(PAGE.to_owned())).unwrap());

        assert_eq!(
            replacer.source().requests(),
            vec![
                "https://i.ytimg.com/vi/1337/maxresdefault.jpg".to_owned(),
                "https://i.ytimg.com/vi/1338/maxresdefault.jpg".to_owned(),
                "https://i.ytimg.com/vi/qwertz1234/maxresdefault.jpg".to_owned(),
            ]
        );
        assert!(html.contains(concat!(
            "<p><a href=\"https://youtube.com/embed/1337\" target=\"_blank\"><img src=\"/images/youtube/1337.jpg\"></a></p>\n",
            "<p><a href=\"https://youtube.com/embed/1338\" target=\"_blank\"><img src=\"/images/youtube/1338.jpg\"></a></p>\n",
            "<p>Unrelated text.</p>\n",
            "<p><a href=\"https://youtube.com/embed/qwertz1234\" target=\"_blank\"><img src=\"/images/youtube/qwertz1234.jpg\"></a></p>",
        )));
        assert!(html.contains("<p>Welcome to my page!</p>"));
        assert!(html.contains("<p>.. note::</p>"));
        for id in ["1337", "1338", "qwertz1234"] {
            assert!(tmp.path().join(format!("images/youtube/{id}.jpg")).is_file());
        }
    }

    #[test]
    fn test_rewrites_returns_old_and_new() {
        let tmp = TempDir::new().unwrap();
        let replacer = ThumbnailReplacer::with_source(
            ThumbnailSettings::new(tmp.path())
                .with_site_url("https://example.org")
                .with_overlay(false),
            MockSource::new(b"jpeg".to_vec()),
        );

        let rewrites = replacer.rewrites("<p>.. youtube:: 42</p>").unwrap();

        assert_eq!(rewrites.len(), 1);
        let rewrite = rewrites.iter().next().unwrap();
        assert_eq!(rewrite.video_id, "42");
        assert_eq!(rewrite.span, 3..18);
        assert_eq!(rewrite.old, ".. youtube:: 42");
        assert_eq!(
            rewrite.new,
            r#"<a href="https://youtube.com/embed/42" target="_blank"><img src="https://example.org/images/youtube/42.jpg"></a>"#
        );
    }

    #[test]
    fn test_prose_mention_before_directive_untouched() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<p>Write .. youtube:: 42 to embed a video.</p>\n<p>.. youtube:: 42</p>";

        let html = document(replacer.process(Content::Document(html.to_owned())).unwrap());

        assert_eq!(
            html,
            "<p>Write .. youtube:: 42 to embed a video.</p>\n\
<p><a href=\"https://youtube.com/embed/42\" target=\"_blank\"><img src=\"/images/youtube/42.jpg\"></a></p>"
        );
    }

    #[test]
    fn test_code_block_before_directive_untouched() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<pre><code>.. youtube:: 42\n</code></pre>\n<p>.. youtube:: 42</p>";

        let html = document(replacer.process(Content::Document(html.to_owned())).unwrap());

        assert!(html.starts_with("<pre><code>.. youtube:: 42\n</code></pre>\n<p><a href="));
        assert_eq!(html.matches("embed/42").count(), 1);
    }

    #[test]
    fn test_markdown_code_sample_untouched() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let old_html = render_markdown("Embed with:\n\n    .. youtube:: 42\n\n.. youtube:: 42\n");

        let new_html = document(replacer.process(Content::Document(old_html)).unwrap());

        assert!(new_html.contains("<pre><code>.. youtube:: 42\n</code></pre>"));
        assert!(new_html.contains(
            r#"<p><a href="https://youtube.com/embed/42" target="_blank"><img src="/images/youtube/42.jpg"></a></p>"#
        ));
    }

    #[test]
    fn test_unclosed_paragraph_directive() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<p>.. youtube:: 42\n<p>Next</p>";

        let html = document(replacer.process(Content::Document(html.to_owned())).unwrap());

        assert_eq!(
            html,
            "<p><a href=\"https://youtube.com/embed/42\" target=\"_blank\"><img src=\"/images/youtube/42.jpg\"></a><p>Next</p>"
        );
    }

    #[test]
    fn test_cached_thumbnails_are_not_fetched() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let cached = output_file(tmp.path(), "1338").unwrap();
        std::fs::write(&cached, b"cached").unwrap();

        replacer.process(Content::Document(PAGE.to_owned())).unwrap();

        assert_eq!(replacer.source().requests().len(), 2);
        assert!(
            !replacer
                .source()
                .requests()
                .iter()
                .any(|url| url.contains("/1338/"))
        );
        assert_eq!(std::fs::read(&cached).unwrap(), b"cached");
    }

    #[test]
    fn test_duplicate_directive_replaced_twice() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<p>.. youtube:: 42</p>\n<p>.. youtube:: 42</p>";

        let html = document(replacer.process(Content::Document(html.to_owned())).unwrap());

        assert!(!html.contains(".. youtube::"));
        assert_eq!(html.matches("embed/42").count(), 2);
        // Second occurrence hits the cache written by the first.
        assert_eq!(replacer.source().requests().len(), 1);
    }

    #[test]
    fn test_additional_metadata_rejected() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<p>.. youtube:: 1337\n   key: value\n   Some text</p>";

        let err = replacer
            .process(Content::Document(html.to_owned()))
            .unwrap_err();

        match err {
            ThumbnailError::UnsupportedMetadata(rest) => {
                assert_eq!(rest, "   key: value\n   Some text");
            }
            other => panic!("expected UnsupportedMetadata, got {other:?}"),
        }
        assert!(replacer.source().requests().is_empty());
        assert!(!tmp.path().join("images").exists());
    }

    #[test]
    fn test_fetch_error_aborts_processing() {
        let tmp = TempDir::new().unwrap();
        let replacer = ThumbnailReplacer::with_source(
            ThumbnailSettings::new(tmp.path()),
            MockSource::failing(404),
        );

        let err = replacer
            .process(Content::Document(PAGE.to_owned()))
            .unwrap_err();

        assert!(matches!(err, ThumbnailError::Fetch { .. }));
        assert_eq!(replacer.source().requests().len(), 1);
    }

    #[test]
    fn test_static_content_untouched() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let content = Content::Static(b".. youtube:: 1337".to_vec());

        let result = replacer.process(content.clone()).unwrap();

        assert_eq!(result, content);
        assert!(replacer.source().requests().is_empty());
    }

    #[test]
    fn test_document_without_directives_unchanged() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = "<p>Nothing to see, not even .. youtube:: here.</p>";

        let result = replacer.process(Content::Document(html.to_owned())).unwrap();

        assert_eq!(document(result), html);
        assert!(replacer.source().requests().is_empty());
    }

    #[test]
    fn test_markdown_page_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let markdown = "### My page\n\n\
Welcome to my page!\n\n\
.. note::\n\n   See other pages as well.\n\n\
.. youtube:: 1337\n\n\
.. youtube:: 1338\n\n\
Unrelated text.\n\n\
.. youtube:: qwertz1234\n";
        let old_html = render_markdown(markdown);

        let new_html = document(replacer.process(Content::Document(old_html.clone())).unwrap());

        assert_ne!(old_html, new_html);
        assert_eq!(replacer.source().requests().len(), 3);
        assert!(new_html.contains("<p>Unrelated text.</p>"));
        assert!(new_html.contains(
            r#"<p><a href="https://youtube.com/embed/qwertz1234" target="_blank"><img src="/images/youtube/qwertz1234.jpg"></a></p>"#
        ));
    }

    #[test]
    fn test_markdown_continuation_lines_rejected() {
        let tmp = TempDir::new().unwrap();
        let replacer = replacer(&tmp);
        let html = render_markdown(".. youtube:: 1337\n   key: value\n   Some text\n");

        let err = replacer.process(Content::Document(html)).unwrap_err();

        // The markdown renderer drops the continuation indent.
        assert!(matches!(
            err,
            ThumbnailError::UnsupportedMetadata(ref rest) if rest == "key: value\nSome text"
        ));
        assert!(replacer.source().requests().is_empty());
    }
}
