//! SVG to PNG rasterization.

use std::io::Cursor;
use std::sync::Arc;

use resvg::usvg;
use tiny_skia::Pixmap;

use crate::error::RenderError;

/// Rasterizes diagram SVGs to PNG at their native size.
pub struct Rasterizer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    /// Create a rasterizer with the system fonts loaded.
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::info!(font_count = fontdb.len(), "Loaded fonts for SVG text rendering");

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Render an SVG document to an RGB PNG, composited over white.
    pub fn render_png(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap =
            Pixmap::new(size.width(), size.height()).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        encode_png(&pixmap)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a pixmap as 8-bit RGB PNG. The canvas is opaque white, so alpha
/// collapses by compositing against white.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut rgb = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        let a = c.alpha() as u16;
        rgb.push(((c.red() as u16 * a + 255 * (255 - a)) / 255) as u8);
        rgb.push(((c.green() as u16 * a + 255 * (255 - a)) / 255) as u8);
        rgb.push(((c.blue() as u16 * a + 255 * (255 - a)) / 255) as u8);
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
