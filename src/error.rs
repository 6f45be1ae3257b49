//! Error types for the watermark-overlay crate.
//!
//! The `Display` text of every user-facing variant is the exact diagnostic the
//! interactive tool prints before stopping.

use std::fmt;

/// Which of the two input images a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// The image receiving the watermark.
    Base,
    /// The image being overlaid.
    Watermark,
}

impl ImageRole {
    /// Wording used when asking for this image's filename.
    #[must_use]
    pub fn prompt_label(self) -> &'static str {
        match self {
            Self::Base => "image",
            Self::Watermark => "watermark image",
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "image",
            Self::Watermark => "watermark",
        })
    }
}

/// Errors that can stop a watermarking run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input file could not be opened or decoded.
    #[error("The file {path} doesn't exist.")]
    FileNotFound {
        /// The filename as it was entered.
        path: String,
    },

    /// The image is not RGB-family (grayscale, for example).
    #[error("The number of {role} color components isn't 3.")]
    ColorComponents {
        /// The offending image.
        role: ImageRole,
    },

    /// The image is neither 24 nor 32 bits per pixel.
    #[error("The {role} isn't 24 or 32-bit.")]
    BitDepth {
        /// The offending image.
        role: ImageRole,
    },

    /// The watermark is wider or taller than the base image.
    #[error("The watermark's dimensions are larger.")]
    SizeMismatch,

    /// The chroma-key color was not three integers in `0..=255`.
    #[error("The transparency color input is invalid.")]
    InvalidColor,

    /// The weight was not an integer.
    #[error("The transparency percentage isn't an integer number.")]
    InvalidWeight,

    /// The weight was outside `0..=100`.
    #[error("The transparency percentage is out of range.")]
    WeightOutOfRange,

    /// The offset was not two integers.
    #[error("The position input is invalid.")]
    InvalidPosition,

    /// The offset would put the watermark outside the base image.
    #[error("The position input is out of range.")]
    PositionOutOfRange,

    /// The placement keyword was neither `single` nor `grid`.
    #[error("The position method input is invalid.")]
    InvalidMode,

    /// The output filename does not end in `jpg` or `png`.
    #[error("The output file extension isn't \"jpg\" or \"png\".")]
    UnsupportedExtension,

    /// An I/O error occurred on the console or while writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output image could not be encoded.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Whether this failure was caused by the user's input rather than the
    /// environment. User errors end the program with status 0.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Image(_))
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
