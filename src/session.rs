//! The interactive watermarking session.
//!
//! Answers are collected and validated in dialogue order into a [`JobConfig`];
//! the first bad answer stops the session with its [`crate::Error`]. Rendering and
//! encoding happen only after every answer has been accepted.

use std::io::{BufRead, Write};
use std::path::Path;

use image::RgbaImage;

use crate::blending::{BlendPolicy, Weight};
use crate::codec::{self, LoadedImage, OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::compositor;
use crate::console::Console;
use crate::error::{ImageRole, Result};
use crate::placement::{self, Placement, PlacementMode, Region};
use crate::policy;
use crate::validation;

const WEIGHT_PROMPT: &str = "Input the watermark transparency percentage (Integer 0-100):";
const MODE_PROMPT: &str = "Choose the position method (single, grid):";
const OUTPUT_PROMPT: &str = "Input the output image filename (jpg or png extension):";

/// Settings that do not come from the dialogue.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// JPEG encoder quality, `1..=100`.
    pub jpeg_quality: u8,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Everything needed to render and write one watermarked image.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Validated base image.
    pub base: LoadedImage,
    /// Validated watermark, no larger than the base.
    pub watermark: LoadedImage,
    /// How watermark pixels combine with base pixels.
    pub policy: BlendPolicy,
    /// Watermark strength.
    pub weight: Weight,
    /// Placement as chosen by the user.
    pub placement: Placement,
    /// Area of the base receiving the watermark.
    pub region: Region,
    /// Output filename as entered.
    pub output_name: String,
    /// Encoding picked from the output filename.
    pub output_format: OutputFormat,
}

impl JobConfig {
    /// Composite the watermark onto the base image.
    #[must_use]
    pub fn render(&self) -> RgbaImage {
        compositor::composite(
            &self.base.pixels,
            &self.watermark.pixels,
            self.region,
            self.weight,
            self.policy,
        )
    }
}

fn ask_image<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    role: ImageRole,
) -> Result<LoadedImage> {
    let name = console.ask(&format!("Input the {} filename:", role.prompt_label()))?;
    let loaded = codec::load_image(&name)?;
    tracing::debug!("{role} metadata:\n{}", loaded.info());
    validation::validate_image(&loaded, role)?;
    Ok(loaded)
}

fn ask_placement<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    base: (u32, u32),
    watermark: (u32, u32),
) -> Result<Placement> {
    match console.ask(MODE_PROMPT)?.parse::<PlacementMode>()? {
        PlacementMode::Grid => Ok(Placement::Grid),
        PlacementMode::Single => {
            let (max_x, max_y) = placement::max_offset(base, watermark);
            let answer = console.ask(&format!(
                "Input the watermark position ([x 0-{max_x}] [y 0-{max_y}]):"
            ))?;
            let (x, y) = placement::parse_offset(&answer)?;
            Ok(Placement::Single { x, y })
        }
    }
}

/// Run the dialogue and collect a validated job.
///
/// # Errors
///
/// Returns the first validation failure in dialogue order, or
/// [`crate::Error::Io`] if the console fails.
pub fn gather_job<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<JobConfig> {
    let base = ask_image(console, ImageRole::Base)?;
    let watermark = ask_image(console, ImageRole::Watermark)?;
    validation::validate_dimensions(base.dimensions(), watermark.dimensions())?;

    let policy = policy::select_policy(watermark.transparency, console)?;
    let weight = Weight::parse(&console.ask(WEIGHT_PROMPT)?)?;

    let placement = ask_placement(console, base.dimensions(), watermark.dimensions())?;
    let region =
        placement::resolve_region(base.dimensions(), watermark.dimensions(), placement)?;

    let output_name = console.ask(OUTPUT_PROMPT)?;
    let output_format = OutputFormat::from_filename(&output_name)?;

    Ok(JobConfig {
        base,
        watermark,
        policy,
        weight,
        placement,
        region,
        output_name,
        output_format,
    })
}

/// Run a full session: dialogue, render, write, confirm.
///
/// Returns the output filename on success.
///
/// # Errors
///
/// Returns the first validation failure, or an I/O or encoding error while
/// writing the result. Nothing is written when validation fails.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    opts: &RunOptions,
) -> Result<String> {
    let job = gather_job(console)?;
    tracing::debug!(
        base = %job.base.name,
        watermark = %job.watermark.name,
        policy = %job.policy,
        weight = %job.weight,
        placement = %job.placement,
        output = %job.output_name,
        "job configured"
    );

    let output = job.render();
    codec::save_image(
        &output,
        Path::new(&job.output_name),
        job.output_format,
        opts.jpeg_quality,
    )?;

    console.say(&format!(
        "The watermarked image {} has been created.",
        job.output_name
    ))?;
    Ok(job.output_name)
}
