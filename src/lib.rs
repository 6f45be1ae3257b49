//! Overlay a watermark image onto a base image.
//!
//! The watermark is mixed in with a percentage weight, either once at an
//! offset or tiled across the whole canvas. Transparency can be taken from the
//! watermark's alpha channel or from a chroma-key color.
//!
//! # Quick Start
//!
//! ```no_run
//! use watermark_overlay::{composite, resolve_region, BlendPolicy, Placement, Weight};
//!
//! let base = image::open("photo.png").unwrap().into_rgba8();
//! let logo = image::open("logo.png").unwrap().into_rgba8();
//! let region = resolve_region(base.dimensions(), logo.dimensions(), Placement::Grid).unwrap();
//! let out = composite(&base, &logo, region, Weight::new(30).unwrap(), BlendPolicy::AlphaAware);
//! out.save("watermarked.png").unwrap();
//! ```
//!
//! # Interactive Session
//!
//! [`session::run`] drives the full question-and-answer dialogue over any
//! [`Console`], validating each answer as it arrives.
//!
//! ```no_run
//! use std::io;
//! use watermark_overlay::{session, Console, RunOptions};
//!
//! let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
//! if let Err(e) = session::run(&mut console, &RunOptions::default()) {
//!     println!("{e}");
//! }
//! ```

#![deny(missing_docs)]

pub mod blending;
pub mod codec;
pub mod compositor;
mod console;
pub mod error;
pub mod placement;
pub mod policy;
pub mod session;
pub mod validation;

pub use blending::{blend, BlendPolicy, Pixel, Weight};
pub use codec::{load_image, save_image, ImageInfo, LoadedImage, OutputFormat, Palette};
pub use compositor::composite;
pub use console::Console;
pub use error::{Error, ImageRole, Result};
pub use placement::{resolve_region, Placement, PlacementMode, Region};
pub use policy::{select_policy, Transparency};
pub use session::{JobConfig, RunOptions};
