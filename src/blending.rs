//! Weighted blending math for watermark overlay.
//!
//! Every channel is mixed with integer arithmetic:
//! `out = (weight * watermark + (100 - weight) * base) / 100`
//!
//! The [`BlendPolicy`] decides which channels take part and when a watermark
//! pixel is skipped entirely so the base shows through.

use std::fmt;

use image::Rgba;

use crate::error::{Error, Result};

/// A single RGBA pixel, 8 bits per channel.
pub type Pixel = Rgba<u8>;

/// Fully opaque alpha.
const OPAQUE: u8 = 255;

/// Watermark strength as a percentage in `0..=100`.
///
/// `0` leaves the base image unchanged; `100` copies the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Weight(u8);

impl Weight {
    /// Largest accepted weight.
    pub const MAX: u8 = 100;

    /// Create a weight, rejecting values above [`Weight::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::WeightOutOfRange`] if `percent > 100`.
    pub fn new(percent: u8) -> Result<Self> {
        if percent > Self::MAX {
            return Err(Error::WeightOutOfRange);
        }
        Ok(Self(percent))
    }

    /// Parse a weight typed by the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeight`] if the text is not an integer and
    /// [`Error::WeightOutOfRange`] if it is outside `0..=100`.
    pub fn parse(input: &str) -> Result<Self> {
        let value: i32 = input.parse().map_err(|_| Error::InvalidWeight)?;
        let percent = u8::try_from(value).map_err(|_| Error::WeightOutOfRange)?;
        Self::new(percent)
    }

    /// The percentage value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// How a watermark pixel is combined with a base pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPolicy {
    /// Mix RGB, force the result opaque.
    Plain,
    /// Honor the watermark's own alpha: fully transparent pixels are skipped,
    /// the rest mix all four channels.
    AlphaAware,
    /// Skip watermark pixels whose RGB equals the key color (alpha ignored),
    /// mix all four channels elsewhere.
    ChromaKey(Pixel),
}

impl fmt::Display for BlendPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::AlphaAware => f.write_str("alpha-aware"),
            Self::ChromaKey(key) => write!(f, "chroma-key({} {} {})", key[0], key[1], key[2]),
        }
    }
}

/// Mix one channel.
fn mix(base: u8, watermark: u8, weight: Weight) -> u8 {
    let w = u32::from(weight.get());
    let mixed = (w * u32::from(watermark) + (100 - w) * u32::from(base)) / 100;
    // Bounded by max(base, watermark), so it always fits.
    #[allow(clippy::cast_possible_truncation)]
    {
        mixed as u8
    }
}

/// Mix the RGB channels and use `alpha` for the result.
fn mix_rgb(base: Pixel, watermark: Pixel, weight: Weight, alpha: u8) -> Pixel {
    Rgba([
        mix(base[0], watermark[0], weight),
        mix(base[1], watermark[1], weight),
        mix(base[2], watermark[2], weight),
        alpha,
    ])
}

/// Whether two pixels share the same RGB, regardless of alpha.
#[must_use]
pub fn same_rgb(a: Pixel, b: Pixel) -> bool {
    a[0] == b[0] && a[1] == b[1] && a[2] == b[2]
}

/// Compute one output pixel from a base pixel and a watermark pixel.
///
/// Total over all inputs: policy parameters are validated before this call.
#[must_use]
pub fn blend(base: Pixel, watermark: Pixel, weight: Weight, policy: BlendPolicy) -> Pixel {
    match policy {
        BlendPolicy::Plain => mix_rgb(base, watermark, weight, OPAQUE),
        BlendPolicy::AlphaAware => {
            if watermark[3] == 0 {
                return base;
            }
            mix_rgb(base, watermark, weight, mix(base[3], watermark[3], weight))
        }
        BlendPolicy::ChromaKey(key) => {
            if same_rgb(watermark, key) {
                return base;
            }
            mix_rgb(base, watermark, weight, mix(base[3], watermark[3], weight))
        }
    }
}
