//! Decoding input images and encoding the watermarked result.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat, ImageReader, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::policy::Transparency;
use crate::validation;

/// Default JPEG encoder quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Palette layout of an indexed source file.
///
/// Decoders expand palettes to RGB(A), so this is read from the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Bits per palette index (1, 2, 4 or 8).
    pub index_bits: u8,
    /// Whether some palette entries carry transparency.
    pub has_transparency: bool,
}

/// A decoded input image.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Filename as entered.
    pub name: String,
    /// Color type reported by the decoder.
    pub color_type: ColorType,
    /// Set when the source stored palette indices rather than colors.
    pub palette: Option<Palette>,
    /// Transparency capability of the source.
    pub transparency: Transparency,
    /// Pixels expanded to RGBA; sources without alpha become opaque.
    pub pixels: RgbaImage,
}

impl LoadedImage {
    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Metadata summary for diagnostics.
    #[must_use]
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            name: self.name.clone(),
            width: self.pixels.width(),
            height: self.pixels.height(),
            components: self.color_type.channel_count(),
            color_components: validation::color_components(self.color_type),
            bits_per_pixel: self
                .palette
                .map_or(self.color_type.bits_per_pixel(), |p| u16::from(p.index_bits)),
            transparency: self.transparency,
        }
    }
}

/// Image metadata as shown by `--verbose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Filename as entered.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels including alpha.
    pub components: u8,
    /// Channels excluding alpha.
    pub color_components: u8,
    /// Bits per pixel across all channels.
    pub bits_per_pixel: u16,
    /// Transparency capability.
    pub transparency: Transparency,
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image file: {}", self.name)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Number of components: {}", self.components)?;
        writeln!(f, "Number of color components: {}", self.color_components)?;
        writeln!(f, "Bits per pixel: {}", self.bits_per_pixel)?;
        write!(f, "Transparency: {}", self.transparency.as_str())
    }
}

fn png_palette(path: &Path) -> Option<Palette> {
    let file = File::open(path).ok()?;
    let reader = png::Decoder::new(BufReader::new(file)).read_info().ok()?;
    let info = reader.info();
    (info.color_type == png::ColorType::Indexed).then_some(Palette {
        index_bits: info.bit_depth as u8,
        has_transparency: info.trns.is_some(),
    })
}

fn bmp_palette(path: &Path) -> Option<Palette> {
    let mut header = [0u8; 30];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    let dib_size = u32::from_le_bytes([header[14], header[15], header[16], header[17]]);
    // OS/2 core headers keep the bit count two bytes earlier.
    let at = if dib_size == 12 { 24 } else { 28 };
    match u16::from_le_bytes([header[at], header[at + 1]]) {
        bits @ (1 | 2 | 4 | 8) => Some(Palette {
            index_bits: u8::try_from(bits).ok()?,
            has_transparency: false,
        }),
        _ => None,
    }
}

/// Palette of the source file, if it is an indexed format.
fn source_palette(path: &Path, format: Option<ImageFormat>) -> Option<Palette> {
    match format? {
        ImageFormat::Png => png_palette(path),
        ImageFormat::Bmp => bmp_palette(path),
        // GIF frames are always palette-based.
        ImageFormat::Gif => Some(Palette {
            index_bits: 8,
            has_transparency: false,
        }),
        _ => None,
    }
}

/// Decode an image file.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the file cannot be opened or decoded.
pub fn load_image(name: &str) -> Result<LoadedImage> {
    let not_found = |e: &dyn fmt::Display| {
        tracing::debug!(file = name, error = %e, "failed to open image");
        Error::FileNotFound {
            path: name.to_string(),
        }
    };

    let reader = ImageReader::open(name)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| not_found(&e))?;
    let format = reader.format();
    let decoded = reader.decode().map_err(|e| not_found(&e))?;

    let color_type = decoded.color();
    let palette = source_palette(Path::new(name), format);
    let transparency = match palette {
        Some(Palette {
            has_transparency: true,
            ..
        }) => Transparency::Bitmask,
        _ => Transparency::of(color_type),
    };
    let loaded = LoadedImage {
        name: name.to_string(),
        color_type,
        palette,
        transparency,
        pixels: decoded.into_rgba8(),
    };
    tracing::debug!(
        file = name,
        width = loaded.pixels.width(),
        height = loaded.pixels.height(),
        color_type = ?color_type,
        ?format,
        indexed = palette.is_some(),
        transparency = loaded.transparency.as_str(),
        "decoded image"
    );
    Ok(loaded)
}

/// Encoding chosen from the output filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.jpg`
    Jpeg,
    /// `.png`
    Png,
}

impl OutputFormat {
    /// Pick the format from the text after the last `.`, which must be
    /// exactly `jpg` or `png`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedExtension`] for anything else.
    pub fn from_filename(name: &str) -> Result<Self> {
        match name.rsplit('.').next() {
            Some("jpg") => Ok(Self::Jpeg),
            Some("png") => Ok(Self::Png),
            _ => Err(Error::UnsupportedExtension),
        }
    }
}

/// Encode the composited image as 24-bit RGB; alpha is discarded.
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be created or
/// encoding fails.
pub fn save_image(
    img: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let rgb: RgbImage = img.convert();
    match format {
        OutputFormat::Jpeg => {
            let file = BufWriter::new(File::create(path)?);
            let mut encoder = JpegEncoder::new_with_quality(file, jpeg_quality);
            encoder.encode_image(&rgb)?;
        }
        OutputFormat::Png => {
            rgb.save_with_format(path, ImageFormat::Png)?;
        }
    }

    tracing::info!(path = %path.display(), ?format, "wrote watermarked image");
    Ok(())
}
