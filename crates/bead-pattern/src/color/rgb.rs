//! 8-bit RGB color type
//!
//! `Rgb` is the device color representation: what image pixels and palette
//! tables store. Perceptual work happens in [`Lab`](super::Lab); `Rgb` exists
//! for I/O and as the conversion source.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with 8-bit red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new Rgb color.
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Rgb color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse an Rgb color from a hex-like string.
    ///
    /// Every non-hexadecimal character is stripped before parsing, so
    /// `"#FF0000"`, `"ff 00 00"` and `"FF-00-00"` all parse to pure red.
    /// Note that `a`..`f` survive the strip wherever they appear, including
    /// in prose prefixes. The remaining digits are split into 2-character
    /// byte pairs; the first three pairs form the color and anything after
    /// them is ignored.
    ///
    /// Fails with [`ParseColorError::TooShort`] when fewer than six hex
    /// digits remain after stripping.
    ///
    /// # Examples
    ///
    /// ```
    /// use bead_pattern::Rgb;
    ///
    /// let red: Rgb = "#FF0000".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    ///
    /// let stripped: Rgb = "FF-AA-00".parse().unwrap();
    /// assert_eq!(stripped, Rgb::new(255, 170, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .collect::<String>()
            .to_ascii_lowercase();

        if digits.len() < 6 {
            return Err(ParseColorError::TooShort {
                digits: digits.len(),
            });
        }

        // Only hex digits remain, so radix parsing cannot fail.
        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .expect("stripped string contains only hex digits");
        }

        Ok(Self::from_bytes(channels))
    }
}
