//! Drives the per-pixel blend over the base image.

use image::RgbaImage;

use crate::blending::{self, BlendPolicy, Weight};
use crate::placement::Region;

/// Overlay `watermark` onto a copy of `base`.
///
/// Pixels outside `region` pass through. Inside it the watermark coordinate is
/// the offset from the region's corner wrapped by the watermark size, which
/// tiles the watermark in grid mode and is the identity for a single
/// placement. Parts of `region` outside `base` are ignored, and an empty
/// watermark leaves the copy unchanged. Inputs are left untouched.
#[must_use]
pub fn composite(
    base: &RgbaImage,
    watermark: &RgbaImage,
    region: Region,
    weight: Weight,
    policy: BlendPolicy,
) -> RgbaImage {
    let (wm_w, wm_h) = watermark.dimensions();
    if wm_w == 0 || wm_h == 0 {
        return base.clone();
    }

    RgbaImage::from_fn(base.width(), base.height(), |x, y| {
        let base_px = *base.get_pixel(x, y);
        if !region.contains(x, y) {
            return base_px;
        }
        let wx = (x - region.x_min) % wm_w;
        let wy = (y - region.y_min) % wm_h;
        blending::blend(base_px, *watermark.get_pixel(wx, wy), weight, policy)
    })
}
