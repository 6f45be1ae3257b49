//! Where on the base image the watermark is applied.
//!
//! - **Grid**: the whole canvas; the compositor tiles the watermark by
//!   wrapping its coordinates.
//! - **Single**: one copy at a user-supplied top-left offset, which must keep
//!   the watermark fully inside the base image.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Inclusive rectangle of base-image pixels that receive the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Leftmost column.
    pub x_min: u32,
    /// Rightmost column.
    pub x_max: u32,
    /// Top row.
    pub y_min: u32,
    /// Bottom row.
    pub y_max: u32,
}

impl Region {
    /// Whether `(x, y)` lies inside the region.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Placement keyword chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// One watermark at an offset.
    Single,
    /// Watermark tiled over the whole image.
    Grid,
}

impl FromStr for PlacementMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Self::Single),
            "grid" => Ok(Self::Grid),
            _ => Err(Error::InvalidMode),
        }
    }
}

/// Fully specified placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Tile over the whole canvas.
    Grid,
    /// Top-left corner of a single copy. Signed so that negative input can be
    /// reported as out of range rather than unparseable.
    Single {
        /// Column offset.
        x: i64,
        /// Row offset.
        y: i64,
    },
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid => f.write_str("grid"),
            Self::Single { x, y } => write!(f, "single at ({x}, {y})"),
        }
    }
}

/// Parse an `x y` offset separated by a single space.
///
/// # Errors
///
/// Returns [`Error::InvalidPosition`] unless there are exactly two integers.
pub fn parse_offset(input: &str) -> Result<(i64, i64)> {
    let coords = input
        .split(' ')
        .map(|token| {
            token
                .parse::<i32>()
                .map(i64::from)
                .map_err(|_| Error::InvalidPosition)
        })
        .collect::<Result<Vec<i64>>>()?;

    match coords.as_slice() {
        &[x, y] => Ok((x, y)),
        _ => Err(Error::InvalidPosition),
    }
}

/// Largest valid single-placement offset, used in the position prompt.
#[must_use]
pub fn max_offset(base: (u32, u32), watermark: (u32, u32)) -> (u32, u32) {
    (
        base.0.saturating_sub(watermark.0),
        base.1.saturating_sub(watermark.1),
    )
}

/// Compute the region of the base image that receives the watermark.
///
/// Both sizes are `(width, height)`.
///
/// # Errors
///
/// Returns [`Error::PositionOutOfRange`] if either image is empty, or if a
/// single placement starts at a negative offset or would extend past the
/// base image.
pub fn resolve_region(
    base: (u32, u32),
    watermark: (u32, u32),
    placement: Placement,
) -> Result<Region> {
    let (width, height) = base;
    let (Some(last_x), Some(last_y)) = (width.checked_sub(1), height.checked_sub(1)) else {
        return Err(Error::PositionOutOfRange);
    };
    if watermark.0 == 0 || watermark.1 == 0 {
        return Err(Error::PositionOutOfRange);
    }

    match placement {
        Placement::Grid => Ok(Region {
            x_min: 0,
            x_max: last_x,
            y_min: 0,
            y_max: last_y,
        }),
        Placement::Single { x, y } => {
            let x_max = x + i64::from(watermark.0) - 1;
            let y_max = y + i64::from(watermark.1) - 1;
            if x < 0 || y < 0 || x_max >= i64::from(width) || y_max >= i64::from(height) {
                return Err(Error::PositionOutOfRange);
            }
            let to_u32 = |v: i64| u32::try_from(v).map_err(|_| Error::PositionOutOfRange);
            Ok(Region {
                x_min: to_u32(x)?,
                x_max: to_u32(x_max)?,
                y_min: to_u32(y)?,
                y_max: to_u32(y_max)?,
            })
        }
    }
}
