//! Palette struct: the bead code registry with precomputed Lab coordinates.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::{Lab, Rgb};

/// One palette entry: a manufacturer code and its advertised color.
///
/// The Lab coordinates are computed once at palette construction so the
/// per-pixel nearest search never re-converts palette colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    code: String,
    rgb: Rgb,
    lab: Lab,
}

impl PaletteEntry {
    /// The manufacturer code, e.g. `"C18"`.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The advertised bead color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The precomputed Lab coordinates of [`rgb()`](Self::rgb).
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }
}

/// An immutable, insertion-ordered registry of bead colors.
///
/// The palette is loaded once (either the built-in
/// [`standard()`](Palette::standard) table or a custom set) and shared
/// read-only from then on. Enumeration order is insertion order; the matcher
/// relies on it for deterministic tie-breaking, so it never changes after
/// construction.
///
/// # Example
///
/// ```
/// use bead_pattern::{Palette, Rgb};
///
/// let palette = Palette::new([
///     ("R", Rgb::new(255, 0, 0)),
///     ("G", Rgb::new(0, 255, 0)),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.get("R"), Some(Rgb::new(255, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from `(code, color)` pairs.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] when no pairs are given: an empty
    ///   palette would make every nearest-color search meaningless, so it is
    ///   rejected here once instead of checked per call.
    /// - [`PaletteError::DuplicateCode`] when a code appears twice.
    pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (code, rgb) in colors {
            let code = code.into();
            if !seen.insert(code.clone()) {
                return Err(PaletteError::DuplicateCode { code });
            }
            let lab = Lab::from(rgb);
            entries.push(PaletteEntry { code, rgb, lab });
        }

        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        Ok(Self { entries })
    }

    /// Create a palette from `(code, hex string)` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use bead_pattern::Palette;
    ///
    /// let palette = Palette::from_hex([("W", "#FFFFFF"), ("K", "#000000")]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex<'a, I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, &'a str)>,
        S: Into<String>,
    {
        let mut pairs = Vec::new();
        for (code, hex) in colors {
            let code = code.into();
            let rgb: Rgb = hex.parse().map_err(|source| PaletteError::ParseColor {
                code: code.clone(),
                source,
            })?;
            pairs.push((code, rgb));
        }
        Self::new(pairs)
    }

    /// The built-in bead manufacturer table.
    pub fn standard() -> Self {
        Self::new(
            super::standard::STANDARD_BEADS
                .iter()
                .map(|&(code, rgb)| (code, Rgb::from_bytes(rgb))),
        )
        .expect("built-in bead table is non-empty with unique codes")
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in enumeration (insertion) order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Look up the color for a code.
    pub fn get(&self, code: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.rgb)
    }

    /// Whether the code exists in this palette.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_construction() {
        let palette = Palette::new([
            ("A", Rgb::new(1, 2, 3)),
            ("B", Rgb::new(4, 5, 6)),
        ])
        .unwrap();
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
    }

    #[test]
    fn test_empty_rejected() {
        let result = Palette::new(Vec::<(String, Rgb)>::new());
        assert!(matches!(result, Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = Palette::new([
            ("A", Rgb::new(1, 2, 3)),
            ("B", Rgb::new(4, 5, 6)),
            ("A", Rgb::new(7, 8, 9)),
        ]);
        assert!(matches!(
            result,
            Err(PaletteError::DuplicateCode { code }) if code == "A"
        ));
    }

    #[test]
    fn test_duplicate_colors_allowed() {
        // Two codes may share a color; only codes must be unique
        let palette = Palette::new([
            ("A", Rgb::new(10, 10, 10)),
            ("B", Rgb::new(10, 10, 10)),
        ])
        .unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_enumeration_preserves_insertion_order() {
        let palette = Palette::new([
            ("Z", Rgb::new(0, 0, 0)),
            ("A", Rgb::new(1, 1, 1)),
            ("M", Rgb::new(2, 2, 2)),
        ])
        .unwrap();
        let codes: Vec<&str> = palette.entries().iter().map(|e| e.code()).collect();
        assert_eq!(codes, ["Z", "A", "M"]);
    }

    #[test]
    fn test_get_and_contains() {
        let palette = Palette::new([("A", Rgb::new(9, 8, 7))]).unwrap();
        assert_eq!(palette.get("A"), Some(Rgb::new(9, 8, 7)));
        assert_eq!(palette.get("missing"), None);
        assert!(palette.contains("A"));
        assert!(!palette.contains("a"));
    }

    #[test]
    fn test_entries_carry_precomputed_lab() {
        let palette = Palette::new([("W", Rgb::new(255, 255, 255))]).unwrap();
        let entry = &palette.entries()[0];
        assert_eq!(entry.lab(), Lab::from(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex([("R", "#FF0000"), ("G", "00FF00")]).unwrap();
        assert_eq!(palette.get("R"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(palette.get("G"), Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_from_hex_invalid_color() {
        let result = Palette::from_hex([("R", "#F0")]);
        assert!(matches!(
            result,
            Err(PaletteError::ParseColor { code, .. }) if code == "R"
        ));
    }

    #[test]
    fn test_standard_table_loads() {
        let palette = Palette::standard();
        assert!(palette.len() >= 30);
        assert!(palette.contains("C01"));
        // White and black must be present for any sensible pattern
        assert!(palette.entries().iter().any(|e| e.rgb() == Rgb::new(255, 255, 255)));
        assert!(palette.entries().iter().any(|e| e.rgb() == Rgb::new(10, 10, 10)));
    }
}
