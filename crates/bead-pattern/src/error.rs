//! Unified error type for the bead-pattern public API.
//!
//! [`PatternError`] wraps the crate's error types into a single enum for
//! convenient `?` propagation in application code.

use thiserror::Error;

use crate::grid::GridError;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the bead-pattern public API.
///
/// # Example
///
/// ```
/// use bead_pattern::{Palette, PatternError};
///
/// fn load_palette() -> Result<Palette, PatternError> {
///     let palette = Palette::from_hex([("W", "#FFFFFF"), ("K", "#000000")])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Color parsing error
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    /// Grid construction error
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}
