//! Color types and conversion utilities
//!
//! This module provides the two color representations the matching pipeline
//! works with:
//!
//! - **Rgb**: 8-bit device color, as read from image pixels or parsed from
//!   hex-like strings. Use for I/O and palette data.
//! - **Lab**: CIE Lab (D50 reference white), derived from sRGB through an XYZ
//!   intermediate. All perceptual distance computation happens here.
//!
//! # Example
//!
//! ```
//! use bead_pattern::{Lab, Rgb};
//!
//! // Read a pixel from an image
//! let rgb = Rgb::new(128, 64, 32);
//!
//! // Convert once, then compare against palette entries
//! let lab = Lab::from(rgb);
//! let white = Lab::from(Rgb::new(255, 255, 255));
//! assert!(lab.euclidean_distance(white) > 0.0);
//! ```

mod lab;
mod rgb;

pub use lab::Lab;
pub use rgb::Rgb;
