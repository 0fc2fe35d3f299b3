//! CLI error types.

use ytthumb_config::ConfigError;
use ytthumb_core::ThumbnailError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Thumbnail {
        path: std::path::PathBuf,
        #[source]
        source: ThumbnailError,
    },

    #[error("video {video_id}: {source}")]
    Video {
        video_id: String,
        #[source]
        source: ThumbnailError,
    },

    #[error("{0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{0}")]
    Glob(#[from] glob::GlobError),
}
