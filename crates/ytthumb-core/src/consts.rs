//! Fixed strings shared by the directive replacer.

/// Prefix a paragraph's text must start with to be treated as a directive.
pub const DIRECTIVE_PREFIX: &str = ".. youtube::";

/// Separator between the directive name and its argument.
pub(crate) const DIRECTIVE_SEPARATOR: &str = "::";

/// Thumbnail directory relative to the site output directory.
pub const THUMBNAIL_DIR: [&str; 2] = ["images", "youtube"];

/// Extension of cached thumbnail files.
pub(crate) const THUMBNAIL_EXTENSION: &str = "jpg";

/// Base URL of the highest-resolution thumbnail for a video.
pub(crate) const THUMBNAIL_URL_BASE: &str = "https://i.ytimg.com/vi";

/// Thumbnail filename on the remote host.
pub(crate) const THUMBNAIL_REMOTE_NAME: &str = "maxresdefault.jpg";

/// Base URL of the canonical video page.
pub(crate) const EMBED_URL_BASE: &str = "https://youtube.com/embed";
