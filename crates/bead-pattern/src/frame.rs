//! Decoded-image access and preprocessing.
//!
//! The grid builder does not care where pixels come from; it consumes any
//! [`PixelSource`]. [`Frame`] is the owned RGBA buffer the application's
//! codec decodes into, and it carries the two preprocessing operations the
//! grid contract relies on: trimming fully-transparent borders and the
//! vertical flip that puts grid row 0 at the visual bottom.

use crate::color::Rgb;

/// One RGBA sample.
///
/// Alpha 0 is the exact fully-transparent sentinel; every other value counts
/// as "a bead goes here", including barely-opaque ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel; 0 means fully transparent
    pub a: u8,
}

impl Rgba {
    /// Create an RGBA sample.
    #[inline]
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color channels without alpha.
    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Whether this sample is the exact fully-transparent sentinel.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Read access to a decoded image.
///
/// Implementations must return a stable sample for every in-bounds
/// coordinate; the grid builder reads each coordinate exactly once.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// The sample at `(x, y)`. `x` and `y` must be in bounds.
    fn pixel(&self, x: u32, y: u32) -> Rgba;
}

/// An owned row-major RGBA8 pixel buffer.
///
/// # Example
///
/// ```
/// use bead_pattern::{Frame, PixelSource};
///
/// // 1x1 opaque red
/// let frame = Frame::from_rgba8(1, 1, vec![255, 0, 0, 255]);
/// assert_eq!(frame.pixel(0, 0).rgb().to_bytes(), [255, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a row-major RGBA8 buffer.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `data.len() == width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "buffer length ({}) must match {}x{} RGBA8",
            data.len(),
            width,
            height,
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// The raw RGBA8 bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Crop away fully-transparent border rows and columns, leaving the
    /// minimal bounding box of pixels with any opacity.
    ///
    /// A frame with no opaque pixel at all trims to 0x0; the grid builder
    /// rejects that as an empty image.
    pub fn trim_transparent(&mut self) {
        let mut min_x = self.width;
        let mut min_y = self.height;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut any = false;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.data[self.offset(x, y) + 3] != 0 {
                    any = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if !any {
            self.width = 0;
            self.height = 0;
            self.data.clear();
            return;
        }

        let new_width = max_x - min_x + 1;
        let new_height = max_y - min_y + 1;
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut cropped = Vec::with_capacity(new_width as usize * new_height as usize * 4);
        for y in min_y..=max_y {
            let start = self.offset(min_x, y);
            cropped.extend_from_slice(&self.data[start..start + new_width as usize * 4]);
        }
        self.width = new_width;
        self.height = new_height;
        self.data = cropped;
    }

    /// Mirror the frame top-to-bottom, so that row 0 becomes the visually
    /// lowest row. Applying it twice restores the original byte-for-byte.
    pub fn flip_vertical(&mut self) {
        let row_len = self.width as usize * 4;
        if row_len == 0 {
            return;
        }
        let mut rows: Vec<&[u8]> = self.data.chunks_exact(row_len).collect();
        rows.reverse();
        self.data = rows.concat();
    }
}

impl PixelSource for Frame {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }
}
