//! End-to-end pattern generation.
//!
//! One service owns the whole image-to-diagram pipeline: decode, trim,
//! flip, match against the bead palette, lay out the SVG and rasterize it.
//! The HTTP handlers and the CLI both go through it.

use bead_pattern::{GridError, Matcher, Palette, PatternGrid};

use crate::error::RenderError;
use crate::models::AppConfig;
use crate::rendering::{DiagramRenderer, Rasterizer};
use crate::services::codec::{self, CodecError};

/// Error type for pattern generation
#[derive(Debug, thiserror::Error)]
pub enum PatternServiceError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Grid(#[from] GridError),

    #[error("{0}")]
    Render(#[from] RenderError),
}

/// A finished pattern diagram plus the numbers worth logging.
pub struct GeneratedPattern {
    /// The rendered diagram as PNG bytes
    pub png: Vec<u8>,
    /// Grid width in cells, after trimming
    pub width: u32,
    /// Grid height in cells, after trimming
    pub height: u32,
    /// Total beads placed
    pub bead_count: u64,
}

/// The image-to-diagram pipeline.
pub struct PatternService {
    matcher: Matcher,
    diagram: DiagramRenderer,
    rasterizer: Rasterizer,
}

impl PatternService {
    pub fn new(config: &AppConfig) -> Self {
        let matcher = Matcher::new(Palette::standard()).with_metric(config.metric.into());
        Self {
            matcher,
            diagram: DiagramRenderer::new(config.multiplier),
            rasterizer: Rasterizer::new(),
        }
    }

    /// Generate a diagram from uploaded PNG bytes.
    pub fn generate(
        &self,
        png_bytes: &[u8],
        label: Option<&str>,
    ) -> Result<GeneratedPattern, PatternServiceError> {
        let mut frame = codec::decode_png(png_bytes)?;
        frame.trim_transparent();
        frame.flip_vertical();

        let grid = PatternGrid::build(&frame, &self.matcher)?;
        let svg = self
            .diagram
            .render(&grid, &frame, self.matcher.palette(), label);
        let png = self.rasterizer.render_png(&svg)?;

        Ok(GeneratedPattern {
            png,
            width: grid.width(),
            height: grid.height(),
            bead_count: grid.bead_count(),
        })
    }
}
