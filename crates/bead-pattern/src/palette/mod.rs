//! Palette types and utilities
//!
//! This module provides the bead palette registry: an insertion-ordered
//! mapping of manufacturer codes to RGB colors, validated at construction,
//! plus the error types for parsing and validation.

mod error;
#[allow(clippy::module_inception)]
mod palette;
mod standard;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteEntry};
