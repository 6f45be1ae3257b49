//! Structural checks run on both images before any blending.

use image::ColorType;

use crate::codec::LoadedImage;
use crate::error::{Error, ImageRole, Result};

/// Number of color (non-alpha) components in a color type.
#[must_use]
pub fn color_components(color_type: ColorType) -> u8 {
    if color_type.has_color() {
        3
    } else {
        1
    }
}

/// Require an RGB-family image at 24 or 32 bits per pixel.
///
/// # Errors
///
/// Returns [`Error::ColorComponents`] for grayscale images and
/// [`Error::BitDepth`] for any other depth (e.g. 16-bit channels).
pub fn validate_format(color_type: ColorType, role: ImageRole) -> Result<()> {
    if color_components(color_type) != 3 {
        return Err(Error::ColorComponents { role });
    }
    if !matches!(color_type.bits_per_pixel(), 24 | 32) {
        return Err(Error::BitDepth { role });
    }
    Ok(())
}

/// Check a decoded image: its color type must pass [`validate_format`] and
/// the source must not have been palette-indexed, since an indexed file holds
/// 8 or fewer bits per pixel before the decoder expands it.
///
/// # Errors
///
/// Returns [`Error::ColorComponents`] or [`Error::BitDepth`].
pub fn validate_image(image: &LoadedImage, role: ImageRole) -> Result<()> {
    validate_format(image.color_type, role)?;
    if image.palette.is_some() {
        return Err(Error::BitDepth { role });
    }
    Ok(())
}

/// Require the watermark to fit inside the base image on both axes.
///
/// # Errors
///
/// Returns [`Error::SizeMismatch`] if the watermark is wider or taller.
pub fn validate_dimensions(base: (u32, u32), watermark: (u32, u32)) -> Result<()> {
    if watermark.0 > base.0 || watermark.1 > base.1 {
        return Err(Error::SizeMismatch);
    }
    Ok(())
}
