//! CIE Lab color space (D50 reference white)
//!
//! Lab is the perceptually motivated space all palette matching runs in:
//! lightness `L`, green-red `a`, blue-yellow `b`, derived from sRGB through
//! an XYZ intermediate. Components are rounded to whole numbers during
//! conversion; the rounding is deliberate and affects rank ordering when two
//! palette entries are nearly equidistant from a sample, so it must not be
//! removed.

use std::f64::consts::PI;

use super::rgb::Rgb;

// CIE constants: 216/24389 and 24389/27, the exact rational forms.
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

// D50 reference white.
const WHITE_X: f64 = 0.964221;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 0.825211;

/// A color in CIE Lab space.
///
/// Produced by `Lab::from(Rgb)`; components hold whole numbers after the
/// conversion rounds them, but stay `f64` for distance arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0 (black) to 100 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from raw components.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance over (L, a, b).
    ///
    /// The default metric for nearest-palette-entry search.
    ///
    /// # Example
    ///
    /// ```
    /// use bead_pattern::{Lab, Rgb};
    ///
    /// let red = Lab::from(Rgb::new(255, 0, 0));
    /// assert_eq!(red.euclidean_distance(red), 0.0);
    /// ```
    #[inline]
    pub fn euclidean_distance(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// CMC(1:1) delta-E, reproducing the reference formula literally.
    ///
    /// `self` is the reference color (the palette entry): the `Sl`, `Sc` and
    /// `Sh` weights come from its lightness, chroma and hue, so the metric is
    /// asymmetric.
    ///
    /// Three deliberate departures from the textbook CMC(l:c) standard are
    /// preserved for parity with the upstream formula and must not be
    /// "corrected":
    ///
    /// - the hue angle is computed as `atan2(a, b)` with the arguments in
    ///   that order; the convention only needs to be internally consistent
    ///   with the hue ranges in the `T` term;
    /// - `cos` is applied to degree-valued arguments without conversion to
    ///   radians;
    /// - the final term combines the full chroma-plane difference
    ///   `sqrt(da^2 + db^2 + dC^2) / Sh` instead of the separate hue
    ///   difference term.
    ///
    /// Not the default metric; see
    /// [`DistanceMetric`](crate::matcher::DistanceMetric).
    pub fn cmc_distance(self, other: Lab) -> f64 {
        let c1 = (self.a * self.a + self.b * self.b).sqrt();
        let c2 = (other.a * other.a + other.b * other.b).sqrt();

        // Hue angle in degrees, normalised to [0, 360) with integer modulo
        // arithmetic scaled by 1e6 to keep six decimal places.
        let h1 = ((((180_000_000.0 / PI) * self.a.atan2(self.b) + 360_000_000.0) as i64)
            % 360_000_000) as f64
            / 1_000_000.0;

        let t = if (164.0..=345.0).contains(&h1) {
            0.56 + (0.2 * (h1 + 168.0).cos()).abs()
        } else {
            0.36 + (0.4 * (h1 + 35.0).cos()).abs()
        };
        let f = (c1.powi(4) / (c1.powi(4) + 1900.0)).sqrt();

        let sl = if self.l < 16.0 {
            0.511
        } else {
            (0.040975 * self.l) / (1.0 + 0.01765 * self.l)
        };
        let sc = (0.0638 * c1) / (1.0 + 0.0131 * c1) + 0.638;
        let sh = sc * (f * t + 1.0 - f);

        let da = self.a - other.a;
        let db = self.b - other.b;
        let dc = c1 - c2;

        (((self.l - other.l) / sl).powi(2)
            + (dc / sc).powi(2)
            + ((da * da + db * db + dc * dc).sqrt() / sh).powi(2))
        .sqrt()
    }
}

impl From<Rgb> for Lab {
    /// Convert sRGB to CIE Lab through XYZ with the D50 white point.
    ///
    /// Pipeline: normalise channels to [0, 1], decode the sRGB gamma curve,
    /// apply the sRGB-to-XYZ(D50) matrix, scale by the reference white, apply
    /// the cube-root / linear split at epsilon, and round each component to
    /// the nearest whole number.
    fn from(rgb: Rgb) -> Self {
        let linear = |v: f64| {
            if v <= 0.04045 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        };
        let r = linear(rgb.r as f64 / 255.0);
        let g = linear(rgb.g as f64 / 255.0);
        let b = linear(rgb.b as f64 / 255.0);

        // sRGB to XYZ, D50-adapted matrix
        let x = 0.4360747 * r + 0.3850649 * g + 0.1430804 * b;
        let y = 0.2225045 * r + 0.7168786 * g + 0.0606169 * b;
        let z = 0.0139322 * r + 0.0971045 * g + 0.7141733 * b;

        let f = |t: f64| {
            if t > EPSILON {
                t.cbrt()
            } else {
                (KAPPA * t + 16.0) / 116.0
            }
        };
        let fx = f(x / WHITE_X);
        let fy = f(y / WHITE_Y);
        let fz = f(z / WHITE_Z);

        Self {
            l: (116.0 * fy - 16.0).round(),
            a: (500.0 * (fx - fy)).round(),
            b: (200.0 * (fy - fz)).round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_round_trip() {
        // Pure white lands on L=100, a=0, b=0 within rounding
        let white = Lab::from(Rgb::new(255, 255, 255));
        assert_eq!(white.l, 100.0);
        assert_eq!(white.a, 0.0);
        assert_eq!(white.b, 0.0);
    }

    #[test]
    fn test_black_is_origin() {
        let black = Lab::from(Rgb::new(0, 0, 0));
        assert_eq!(black.l, 0.0);
        assert_eq!(black.a, 0.0);
        assert_eq!(black.b, 0.0);
    }

    #[test]
    fn test_components_are_rounded() {
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(12, 200, 99),
            Rgb::new(128, 128, 128),
        ] {
            let lab = Lab::from(rgb);
            assert_eq!(lab.l, lab.l.round());
            assert_eq!(lab.a, lab.a.round());
            assert_eq!(lab.b, lab.b.round());
        }
    }

    #[test]
    fn test_greys_have_no_chroma() {
        for v in [32u8, 96, 160, 224] {
            let lab = Lab::from(Rgb::new(v, v, v));
            assert_eq!(lab.a, 0.0, "grey {v} should sit on the L axis");
            assert_eq!(lab.b, 0.0, "grey {v} should sit on the L axis");
        }
    }

    #[test]
    fn test_red_is_warm() {
        // Sanity on axis signs: red has positive a (red direction) and
        // positive b (yellow direction)
        let red = Lab::from(Rgb::new(255, 0, 0));
        assert!(red.a > 0.0);
        assert!(red.b > 0.0);

        let blue = Lab::from(Rgb::new(0, 0, 255));
        assert!(blue.b < 0.0);
    }

    #[test]
    fn test_euclidean_self_distance_zero() {
        let lab = Lab::from(Rgb::new(37, 120, 201));
        assert_eq!(lab.euclidean_distance(lab), 0.0);
    }

    #[test]
    fn test_euclidean_is_symmetric() {
        let a = Lab::from(Rgb::new(10, 20, 30));
        let b = Lab::from(Rgb::new(200, 100, 50));
        assert_eq!(a.euclidean_distance(b), b.euclidean_distance(a));
    }

    #[test]
    fn test_euclidean_black_to_white() {
        let black = Lab::from(Rgb::new(0, 0, 0));
        let white = Lab::from(Rgb::new(255, 255, 255));
        assert_eq!(black.euclidean_distance(white), 100.0);
    }

    #[test]
    fn test_cmc_self_distance_zero() {
        let lab = Lab::from(Rgb::new(37, 120, 201));
        assert_eq!(lab.cmc_distance(lab), 0.0);
    }

    #[test]
    fn test_cmc_distinct_colors_positive() {
        let red = Lab::from(Rgb::new(255, 0, 0));
        let green = Lab::from(Rgb::new(0, 255, 0));
        assert!(red.cmc_distance(green) > 0.0);
    }

    #[test]
    fn test_cmc_is_asymmetric() {
        // The S weights come from the reference (self) color, so swapping
        // arguments changes the result for most color pairs.
        let dark = Lab::from(Rgb::new(20, 10, 10));
        let bright = Lab::from(Rgb::new(240, 240, 20));
        let forward = dark.cmc_distance(bright);
        let backward = bright.cmc_distance(dark);
        assert!((forward - backward).abs() > 1e-9);
    }

    #[test]
    fn test_hue_angle_normalisation_stays_finite() {
        // Exercise all four quadrants of the a/b plane; the degree modulo
        // arithmetic must keep results finite and non-negative.
        for (a, b) in [(30.0, 40.0), (-30.0, 40.0), (30.0, -40.0), (-30.0, -40.0)] {
            let lab1 = Lab::new(50.0, a, b);
            let lab2 = Lab::new(60.0, -a, -b);
            let d = lab1.cmc_distance(lab2);
            assert!(d.is_finite() && d > 0.0);
        }
    }
}
