//! YouTube thumbnail links for static sites.
//!
//! Rendered pages may contain a paragraph of the form `.. youtube:: <id>`.
//! This crate replaces each such paragraph with a link to the video that wraps
//! a locally cached thumbnail, so no third-party iframe ends up on the page:
//!
//! ```html
//! <a href="https://youtube.com/embed/<id>" target="_blank"><img src="<site-url>/images/youtube/<id>.jpg"></a>
//! ```
//!
//! # Architecture
//!
//! - [`ThumbnailReplacer`]: scans paragraphs and plans [`Rewrites`]
//! - [`save_thumbnail`]: existence-checked cache under `images/youtube/`
//! - [`ThumbnailSource`]: download seam, [`HttpSource`] for production
//! - [`add_image_overlay`]: centers the bundled play-button logo on a thumbnail
//! - [`thumbnail_link`]: markup for a single video
//!
//! # Example
//!
//! ```no_run
//! use ytthumb_core::{Content, ThumbnailReplacer, ThumbnailSettings};
//!
//! let settings = ThumbnailSettings::new("output").with_site_url("https://example.org");
//! let replacer = ThumbnailReplacer::new(settings);
//!
//! let page = Content::Document("<p>.. youtube:: dQw4w9WgXcQ</p>".to_owned());
//! let page = replacer.process(page)?;
//! # Ok::<(), ytthumb_core::ThumbnailError>(())
//! ```

mod cache;
mod consts;
mod content;
mod directive;
mod error;
mod fetch;
mod markup;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod overlay;
mod replacer;
mod rewrite;

pub use cache::{CacheStatus, output_file, save_thumbnail, thumbnail_dir};
pub use consts::{DIRECTIVE_PREFIX, THUMBNAIL_DIR};
pub use content::Content;
pub use directive::{Paragraph, flatten_text, paragraph_texts, paragraphs, parse_directive};
pub use error::ThumbnailError;
pub use fetch::{HttpSource, ThumbnailSource, create_agent, thumbnail_url};
pub use markup::thumbnail_link;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use overlay::{LOGO_PNG, add_image_overlay, composite, encode, logo, overlay_offset};
pub use replacer::{ThumbnailReplacer, ThumbnailSettings};
pub use rewrite::{Rewrite, Rewrites};
