//! Play-button overlay for downloaded thumbnails.
//!
//! The bundled logo is alpha-blended onto the center of the thumbnail, so its
//! transparent background leaves the underlying pixels intact.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, imageops};

use crate::error::ThumbnailError;

/// Play-button logo (PNG, 80x56, RGBA).
pub const LOGO_PNG: &[u8] = include_bytes!("../assets/logo.png");

/// Decode the bundled logo.
///
/// # Errors
///
/// Returns [`ThumbnailError::Image`] if the embedded asset is unreadable.
pub fn logo() -> Result<DynamicImage, ThumbnailError> {
    Ok(image::load_from_memory_with_format(
        LOGO_PNG,
        ImageFormat::Png,
    )?)
}

/// Top-left position that centers `inner` inside `outer`.
///
/// Uses floor division per axis, so the result is negative (and rounds down)
/// when `inner` is larger than `outer`.
#[must_use]
pub fn overlay_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    let axis = |o: u32, i: u32| (i64::from(o) - i64::from(i)).div_euclid(2);
    (axis(outer.0, inner.0), axis(outer.1, inner.1))
}

/// Blend `logo` onto the center of `image` using the logo's alpha channel.
///
/// The pixel layout of `image` is preserved.
pub fn composite(image: &mut DynamicImage, logo: &DynamicImage) {
    let (x, y) = overlay_offset(image.dimensions(), logo.dimensions());
    imageops::overlay(image, logo, x, y);
}

/// Decode `image_content` and overlay the play-button logo.
///
/// Returns the composited image together with the format it was decoded
/// from, so it can be written back unchanged.
///
/// # Errors
///
/// Returns [`ThumbnailError::Image`] if the content is not a supported image.
pub fn add_image_overlay(
    image_content: &[u8],
) -> Result<(DynamicImage, ImageFormat), ThumbnailError> {
    let format = image::guess_format(image_content)?;
    let mut image = image::load_from_memory_with_format(image_content, format)?;
    let logo = logo()?;
    composite(&mut image, &logo);
    Ok((image, format))
}

/// Encode `image` in `format`.
///
/// # Errors
///
/// Returns [`ThumbnailError::Image`] if the encoder rejects the image.
pub fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ThumbnailError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}
