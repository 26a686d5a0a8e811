//! Nearest-palette-entry search.
//!
//! [`Matcher`] owns a validated [`Palette`] and a [`DistanceMetric`] and maps
//! arbitrary sample colors to the perceptually closest bead code. The scan is
//! a plain linear pass over the palette in enumeration order; with catalogue
//! palettes of a few dozen entries that beats any index structure, and the
//! fixed order makes tie-breaking deterministic.

use crate::color::{Lab, Rgb};
use crate::palette::{Palette, ParseColorError};

/// A sample color fed to the matcher.
///
/// Either an already-decoded RGB triple or a hex-like string still to be
/// parsed. Resolution to RGB happens exactly once, before any distance
/// computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// A decoded RGB triple.
    Rgb(Rgb),
    /// A hex-like string, parsed with the lenient [`Rgb`] parser.
    Hex(String),
}

impl ColorInput {
    fn resolve(&self) -> Result<Rgb, ParseColorError> {
        match self {
            ColorInput::Rgb(rgb) => Ok(*rgb),
            ColorInput::Hex(s) => s.parse(),
        }
    }
}

impl From<Rgb> for ColorInput {
    fn from(rgb: Rgb) -> Self {
        ColorInput::Rgb(rgb)
    }
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        ColorInput::Hex(s.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        ColorInput::Hex(s)
    }
}

/// Distance metric for the nearest search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Euclidean distance in CIE Lab. The active default.
    #[default]
    EuclideanLab,

    /// CMC(1:1) delta-E as implemented by [`Lab::cmc_distance`]. Kept as a
    /// selectable alternative; matches the reference formula literally
    /// rather than the textbook CMC(l:c) standard.
    Cmc,
}

/// One matched cell color: a bead code plus the pixel sample that produced it.
///
/// The empty string code is the transparent/no-bead sentinel, constructed via
/// [`MatchedColor::empty`]; any non-empty code exists in the palette that
/// produced it. `sample` is diagnostic only (renderers draw the palette
/// color, not the sample) and is absent for the sentinel and for legend
/// entries rebuilt from a bare code.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedColor {
    code: String,
    sample: Option<Rgb>,
}

impl MatchedColor {
    /// The empty/transparent sentinel.
    pub fn empty() -> Self {
        Self {
            code: String::new(),
            sample: None,
        }
    }

    /// Rebuild a matched color from a bare code (no sample), as the usage
    /// legend does.
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            sample: None,
        }
    }

    /// Whether this is the empty sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// The bead code; empty string for the sentinel.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The original pixel sample, when this value came from one.
    #[inline]
    pub fn sample(&self) -> Option<Rgb> {
        self.sample
    }

    /// The advertised palette color for this code, the fill color a
    /// renderer should use. `None` for the sentinel or a foreign code.
    pub fn palette_rgb(&self, palette: &Palette) -> Option<Rgb> {
        palette.get(&self.code)
    }
}

/// Maps sample colors to their nearest palette entry.
///
/// # Example
///
/// ```
/// use bead_pattern::{Matcher, Palette, Rgb};
///
/// let palette = Palette::new([
///     ("R", Rgb::new(255, 0, 0)),
///     ("B", Rgb::new(0, 0, 255)),
/// ])
/// .unwrap();
/// let matcher = Matcher::new(palette);
///
/// assert_eq!(matcher.nearest(Rgb::new(250, 10, 10)).unwrap(), "R");
/// assert_eq!(matcher.nearest("#0000FE").unwrap(), "B");
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    palette: Palette,
    metric: DistanceMetric,
}

impl Matcher {
    /// Create a matcher over the given palette with the default
    /// [`DistanceMetric::EuclideanLab`] metric.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            metric: DistanceMetric::default(),
        }
    }

    /// Select a different distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// The palette this matcher searches.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Find the nearest palette code for a sample.
    ///
    /// Errors only when a [`ColorInput::Hex`] string fails to parse; an RGB
    /// input never fails.
    pub fn nearest(&self, input: impl Into<ColorInput>) -> Result<&str, ParseColorError> {
        Ok(self.nearest_rgb(input.into().resolve()?))
    }

    /// Find the nearest palette code for a decoded RGB sample.
    ///
    /// The sample converts to Lab once; every entry's precomputed Lab is
    /// compared under the configured metric. Comparison keeps the entry with
    /// the smallest distance seen so far using `<=`, so on an exact tie the
    /// entry later in palette enumeration order wins. Deterministic for a
    /// fixed palette; O(palette size).
    pub fn nearest_rgb(&self, rgb: Rgb) -> &str {
        let sample = Lab::from(rgb);

        let mut best = f64::INFINITY;
        let mut code = "";
        for entry in self.palette.entries() {
            // CMC takes its weights from the reference color, which is the
            // palette entry, so the entry is always the left-hand side.
            let distance = match self.metric {
                DistanceMetric::EuclideanLab => entry.lab().euclidean_distance(sample),
                DistanceMetric::Cmc => entry.lab().cmc_distance(sample),
            };
            if distance <= best {
                best = distance;
                code = entry.code();
            }
        }
        code
    }

    /// Match a pixel sample into a [`MatchedColor`] carrying the sample.
    pub fn from_sample(&self, rgb: Rgb) -> MatchedColor {
        MatchedColor {
            code: self.nearest_rgb(rgb).to_string(),
            sample: Some(rgb),
        }
    }
}
