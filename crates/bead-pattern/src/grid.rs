//! Pattern grid construction.
//!
//! [`PatternGrid`] is the finished data model: one [`MatchedColor`] per
//! pixel of the (trimmed, flipped) source image plus the per-code usage
//! table that drives the legend. It is built in a single synchronous pass
//! and read-only afterwards; a new image means a new build.

use thiserror::Error;

use crate::frame::PixelSource;
use crate::matcher::{MatchedColor, Matcher};

/// Error for grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The source image had zero width or height (e.g. after trimming a
    /// fully transparent image).
    #[error("image is empty after trimming")]
    EmptyImage,
}

/// The finished bead pattern: cell grid plus usage table.
///
/// Invariants, established at build time and never broken afterwards:
///
/// - dimensions equal the source's dimensions;
/// - every cell is the empty sentinel or carries a code present in the
///   usage table with a positive count;
/// - usage counts sum to the number of non-empty cells;
/// - usage is sorted ascending by count, ties keeping first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGrid {
    width: u32,
    height: u32,
    /// Row-major, `cells[y * width + x]`.
    cells: Vec<MatchedColor>,
    usage: Vec<(String, u64)>,
}

impl PatternGrid {
    /// Build a grid from a decoded image.
    ///
    /// The source is expected to be preprocessed already (transparent
    /// borders trimmed, vertically flipped so row 0 is the visual bottom);
    /// see [`Frame`](crate::frame::Frame). Every coordinate is read once:
    /// an exactly-transparent sample stores the empty sentinel, anything
    /// else is matched against the palette and counted.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyImage`] when the source has zero width or height.
    pub fn build(source: &impl PixelSource, matcher: &Matcher) -> Result<Self, GridError> {
        let width = source.width();
        let height = source.height();
        if width == 0 || height == 0 {
            return Err(GridError::EmptyImage);
        }

        let mut cells = vec![MatchedColor::empty(); width as usize * height as usize];
        let mut usage: Vec<(String, u64)> = Vec::new();

        // Column-outer traversal fixes the first-seen order of usage keys,
        // which survives the stable sort below on tied counts.
        for x in 0..width {
            for y in 0..height {
                let pixel = source.pixel(x, y);
                if pixel.is_transparent() {
                    continue;
                }
                let matched = matcher.from_sample(pixel.rgb());
                match usage.iter_mut().find(|(code, _)| code == matched.code()) {
                    Some((_, count)) => *count += 1,
                    None => usage.push((matched.code().to_string(), 1)),
                }
                cells[(y * width + x) as usize] = matched;
            }
        }

        usage.sort_by_key(|&(_, count)| count);

        Ok(Self {
            width,
            height,
            cells,
            usage,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell at `(x, y)`. Row 0 is the visual bottom.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> &MatchedColor {
        &self.cells[(y * self.width + x) as usize]
    }

    /// Per-code usage counts, ascending by count, ties in first-seen order.
    #[inline]
    pub fn usage(&self) -> &[(String, u64)] {
        &self.usage
    }

    /// Total number of beads (= non-empty cells).
    pub fn bead_count(&self) -> u64 {
        self.usage.iter().map(|&(_, count)| count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::frame::Frame;
    use crate::palette::Palette;

    fn rgb_matcher() -> Matcher {
        Matcher::new(
            Palette::new([
                ("R", Rgb::new(255, 0, 0)),
                ("G", Rgb::new(0, 255, 0)),
                ("B", Rgb::new(0, 0, 255)),
            ])
            .unwrap(),
        )
    }

    /// Build a frame from (r, g, b, a) tuples, row-major.
    fn frame(width: u32, height: u32, pixels: &[(u8, u8, u8, u8)]) -> Frame {
        let data = pixels
            .iter()
            .flat_map(|&(r, g, b, a)| [r, g, b, a])
            .collect();
        Frame::from_rgba8(width, height, data)
    }

    #[test]
    fn test_sample_scenario() {
        // 2x1: opaque pure red, then fully transparent
        let source = frame(2, 1, &[(255, 0, 0, 255), (0, 0, 0, 0)]);
        let grid = PatternGrid::build(&source, &rgb_matcher()).unwrap();

        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.cell(0, 0).code(), "R");
        assert!(grid.cell(1, 0).is_empty());
        assert_eq!(grid.usage(), &[("R".to_string(), 1)]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let source = Frame::from_rgba8(0, 0, vec![]);
        assert_eq!(
            PatternGrid::build(&source, &rgb_matcher()),
            Err(GridError::EmptyImage)
        );
    }

    #[test]
    fn test_usage_conservation() {
        // 2x2: three opaque pixels, one transparent
        let source = frame(
            2,
            2,
            &[
                (255, 0, 0, 255),
                (250, 5, 5, 255),
                (0, 0, 255, 255),
                (0, 0, 0, 0),
            ],
        );
        let grid = PatternGrid::build(&source, &rgb_matcher()).unwrap();

        assert_eq!(grid.bead_count(), 3);
        let non_empty = (0..2)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .filter(|&(x, y)| !grid.cell(x, y).is_empty())
            .count() as u64;
        assert_eq!(grid.bead_count(), non_empty);
        // Transparent pixels never become usage keys
        assert!(grid.usage().iter().all(|(code, _)| !code.is_empty()));
    }

    #[test]
    fn test_usage_sorted_ascending_stable() {
        // Counts R:3, G:1, B:3 with first-seen order R, G, B.
        // Expected order: G first (count 1), then R before B (tie, R seen
        // first).
        let source = frame(
            7,
            1,
            &[
                (255, 0, 0, 255),
                (255, 0, 0, 255),
                (255, 0, 0, 255),
                (0, 255, 0, 255),
                (0, 0, 255, 255),
                (0, 0, 255, 255),
                (0, 0, 255, 255),
            ],
        );
        let grid = PatternGrid::build(&source, &rgb_matcher()).unwrap();
        let order: Vec<(&str, u64)> = grid
            .usage()
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        assert_eq!(order, [("G", 1), ("R", 3), ("B", 3)]);
    }

    #[test]
    fn test_every_cell_code_in_usage() {
        let source = frame(
            2,
            2,
            &[
                (200, 10, 10, 255),
                (10, 200, 10, 255),
                (10, 10, 200, 255),
                (255, 0, 0, 128),
            ],
        );
        let grid = PatternGrid::build(&source, &rgb_matcher()).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                let cell = grid.cell(x, y);
                assert!(!cell.is_empty(), "alpha 128 still places a bead");
                assert!(grid
                    .usage()
                    .iter()
                    .any(|(code, count)| code == cell.code() && *count > 0));
            }
        }
    }

    #[test]
    fn test_cells_keep_their_samples() {
        let source = frame(1, 1, &[(250, 3, 3, 255)]);
        let grid = PatternGrid::build(&source, &rgb_matcher()).unwrap();
        assert_eq!(grid.cell(0, 0).sample(), Some(Rgb::new(250, 3, 3)));
    }
}
