//! Choosing how watermark transparency is interpreted.
//!
//! A watermark with continuous alpha offers to honor that alpha; any other
//! watermark offers a chroma-key color instead. Declining either keeps the
//! plain weighted blend.

use std::io::{BufRead, Write};

use image::{ColorType, Rgba};

use crate::blending::{BlendPolicy, Pixel};
use crate::console::Console;
use crate::error::{Error, Result};

/// Transparency capability of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// No transparency; every pixel is opaque.
    Opaque,
    /// Binary transparency: pixels are either opaque or fully transparent.
    Bitmask,
    /// Continuous alpha channel.
    Translucent,
}

impl Transparency {
    /// Classify from the decoded color type: anything carrying an alpha
    /// channel is translucent.
    #[must_use]
    pub fn of(color_type: ColorType) -> Self {
        if color_type.has_alpha() {
            Self::Translucent
        } else {
            Self::Opaque
        }
    }

    /// The yes/no question asked for a watermark of this kind.
    #[must_use]
    pub fn policy_question(self) -> PolicyQuestion {
        match self {
            Self::Translucent => PolicyQuestion::UseAlphaChannel,
            Self::Opaque | Self::Bitmask => PolicyQuestion::UseKeyColor,
        }
    }

    /// Upper-case name as shown in image reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Bitmask => "BITMASK",
            Self::Translucent => "TRANSLUCENT",
        }
    }
}

/// The question that decides between [`BlendPolicy::Plain`] and a
/// transparency-aware policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyQuestion {
    /// Accepting selects [`BlendPolicy::AlphaAware`].
    UseAlphaChannel,
    /// Accepting asks for a key color and selects [`BlendPolicy::ChromaKey`].
    UseKeyColor,
}

impl PolicyQuestion {
    /// Prompt text for this question.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Self::UseAlphaChannel => "Do you want to use the watermark's Alpha channel?",
            Self::UseKeyColor => "Do you want to set a transparency color?",
        }
    }
}

const KEY_COLOR_PROMPT: &str = "Input a transparency color ([Red] [Green] [Blue]):";

/// `yes` in any letter case. Every other answer declines.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}

/// Parse an `R G B` triple separated by single spaces.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] unless there are exactly three integer
/// tokens, each in `0..=255`.
pub fn parse_key_color(input: &str) -> Result<Pixel> {
    let channels = input
        .split(' ')
        .map(|token| {
            token
                .parse::<i32>()
                .ok()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or(Error::InvalidColor)
        })
        .collect::<Result<Vec<u8>>>()?;

    match channels.as_slice() {
        &[r, g, b] => Ok(Rgba([r, g, b, 255])),
        _ => Err(Error::InvalidColor),
    }
}

/// Ask the policy question for a watermark and build the blend policy.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for a malformed key color, or
/// [`Error::Io`] if the console fails.
pub fn select_policy<R: BufRead, W: Write>(
    transparency: Transparency,
    console: &mut Console<R, W>,
) -> Result<BlendPolicy> {
    let question = transparency.policy_question();
    if !is_affirmative(&console.ask(question.prompt())?) {
        return Ok(BlendPolicy::Plain);
    }

    match question {
        PolicyQuestion::UseAlphaChannel => Ok(BlendPolicy::AlphaAware),
        PolicyQuestion::UseKeyColor => {
            let key = parse_key_color(&console.ask(KEY_COLOR_PROMPT)?)?;
            Ok(BlendPolicy::ChromaKey(key))
        }
    }
}
