//! bead-pattern: bead pattern construction from raster images
//!
//! This library turns decoded images into bead/cross-stitch patterns by
//! quantizing every pixel to the nearest color of a fixed physical bead
//! palette and assembling the result into a labelled grid with a usage
//! table.
//!
//! # Quick Start
//!
//! ```
//! use bead_pattern::{Frame, Matcher, Palette, PatternGrid};
//!
//! // 1x1 opaque red image
//! let mut frame = Frame::from_rgba8(1, 1, vec![255, 0, 0, 255]);
//! frame.trim_transparent();
//! frame.flip_vertical();
//!
//! let matcher = Matcher::new(Palette::standard());
//! let grid = PatternGrid::build(&frame, &matcher).unwrap();
//!
//! assert_eq!(grid.bead_count(), 1);
//! assert!(matcher.palette().contains(grid.cell(0, 0).code()));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! decoded RGBA frame       (from the application's image codec)
//!     |
//!     v
//! trim_transparent         (crop to the opaque bounding box)
//! flip_vertical            (grid row 0 = visual bottom)
//!     |
//!     v
//! PatternGrid::build       (per pixel: transparent -> empty sentinel,
//!     |                     otherwise Matcher::from_sample)
//!     v
//! grid + usage table       (ascending by count, ties first-seen)
//! ```
//!
//! # Color Science
//!
//! Matching runs in CIE Lab with the D50 reference white, reached through
//! the fixed sRGB gamma decode and sRGB-to-XYZ(D50) matrix in
//! [`Lab::from`]. Lab components are rounded to whole numbers; the rounding
//! is part of the matching contract and affects rank ordering at close
//! calls.
//!
//! Two metrics exist: plain Euclidean Lab distance (the active default)
//! and a CMC(1:1) delta-E preserved verbatim from the reference formula,
//! including its divergences from the textbook standard (see
//! [`Lab::cmc_distance`]). The choice is a [`Matcher`] configuration
//! option.
//!
//! The palette is an explicit, injected value with no ambient global
//! registry, so tests substitute small deterministic palettes freely.

pub mod color;
pub mod error;
pub mod frame;
pub mod grid;
pub mod matcher;
pub mod palette;


pub use color::{Lab, Rgb};
pub use error::PatternError;
pub use frame::{Frame, PixelSource, Rgba};
pub use grid::{GridError, PatternGrid};
pub use matcher::{ColorInput, DistanceMetric, MatchedColor, Matcher};
pub use palette::{Palette, PaletteEntry, PaletteError, ParseColorError};
