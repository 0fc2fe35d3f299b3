//! On-disk thumbnail cache.
//!
//! A thumbnail lives at `{output_path}/images/youtube/{video_id}.jpg`. The
//! file's existence is the whole cache check: an existing file is never
//! re-fetched or validated, whatever its content.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{THUMBNAIL_DIR, THUMBNAIL_EXTENSION};
use crate::error::ThumbnailError;
use crate::fetch::{ThumbnailSource, thumbnail_url};
use crate::overlay::{add_image_overlay, encode};

/// Outcome of [`save_thumbnail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// File already existed; nothing was fetched.
    Hit,
    /// Thumbnail was downloaded and written.
    Fetched,
}

/// Directory holding cached thumbnails.
#[must_use]
pub fn thumbnail_dir(output_path: &Path) -> PathBuf {
    THUMBNAIL_DIR
        .iter()
        .fold(output_path.to_path_buf(), |dir, part| dir.join(part))
}

/// Cache path for `video_id`, creating the thumbnail directory if needed.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn output_file(output_path: &Path, video_id: &str) -> std::io::Result<PathBuf> {
    let directory = thumbnail_dir(output_path);
    if !directory.exists() {
        fs::create_dir_all(&directory)?;
    }
    Ok(directory.join(format!("{video_id}.{THUMBNAIL_EXTENSION}")))
}

/// Make sure the thumbnail for `video_id` exists at `output_file`.
///
/// On a miss, downloads the thumbnail once. With `add_overlay` the play-button
/// logo is composited and the image re-encoded in its original format;
/// otherwise the downloaded bytes are written as-is.
///
/// # Errors
///
/// Propagates fetch, decode and write errors unchanged.
pub fn save_thumbnail<S: ThumbnailSource + ?Sized>(
    source: &S,
    video_id: &str,
    output_file: &Path,
    add_overlay: bool,
) -> Result<CacheStatus, ThumbnailError> {
    if output_file.exists() {
        tracing::debug!(video_id, path = %output_file.display(), "thumbnail cached");
        return Ok(CacheStatus::Hit);
    }

    let url = thumbnail_url(video_id);
    tracing::info!(video_id, %url, "fetching thumbnail");
    let content = source.fetch(&url)?;

    if add_overlay {
        let (image, format) = add_image_overlay(&content)?;
        fs::write(output_file, encode(&image, format)?)?;
    } else {
        fs::write(output_file, &content)?;
    }

    Ok(CacheStatus::Fetched)
}
