//! Error types for palette operations

use thiserror::Error;

/// Error type for parsing hex-like color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Fewer than six hexadecimal digits remained after stripping
    #[error("hex color too short: {digits} hex digits after stripping (need 6)")]
    TooShort {
        /// How many hex digits survived the strip
        digits: usize,
    },
}

/// Error type for palette validation.
///
/// An invalid palette is a programmer error, not a runtime condition: the
/// registry is static data loaded once at startup, so these surface during
/// development and never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No entries provided
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// The same code appeared twice
    #[error("duplicate palette code {code:?}")]
    DuplicateCode {
        /// The offending code
        code: String,
    },

    /// A color string failed to parse
    #[error("invalid color for code {code:?}: {source}")]
    ParseColor {
        /// Code whose color failed to parse
        code: String,
        /// Underlying parse failure
        source: ParseColorError,
    },
}
