//! SVG diagram generation.
//!
//! Lays out the printable pattern sheet: the bead grid with reference
//! numbers and guide highlights on the right, and an information panel on
//! the left with a scaled preview, the pattern dimensions, the total bead
//! count and the per-color legend. Geometry is driven by a single cell
//! `multiplier`; every other measure derives from it.
//!
//! Each bead code is drawn once as a `<defs>` symbol and placed with
//! `<use>`, so the SVG stays small even for large grids.

use std::fmt::Write;

use bead_pattern::{Frame, Palette, PatternGrid, PixelSource, Rgb};

/// Renders a [`PatternGrid`] to an SVG diagram string.
pub struct DiagramRenderer {
    multiplier: u32,
}

impl DiagramRenderer {
    pub fn new(multiplier: u32) -> Self {
        // A cell below 8px leaves no room for the code text
        Self {
            multiplier: multiplier.max(8),
        }
    }

    fn dot_size(&self) -> f64 {
        (self.multiplier - 1) as f64
    }

    /// The margin reserved for reference numbers, same on both axes.
    fn number_row(&self) -> f64 {
        (self.multiplier - 1) as f64
    }

    fn grid_width(&self, grid: &PatternGrid) -> f64 {
        grid.width() as f64 * self.multiplier as f64 + self.dot_size() + self.number_row()
    }

    fn grid_height(&self, grid: &PatternGrid) -> f64 {
        grid.height() as f64 * self.multiplier as f64 + self.dot_size() + self.number_row()
    }

    /// Center of the cell in column `x`, relative to the grid panel.
    fn calc_x(&self, x: u32) -> f64 {
        x as f64 * self.multiplier as f64 + self.dot_size() + self.number_row()
    }

    fn calc_y(&self, y: u32) -> f64 {
        y as f64 * self.multiplier as f64 + self.dot_size() + self.number_row()
    }

    /// Every 50th row/column gets the red guide color.
    fn is_guide(value: u32) -> bool {
        value % 50 == 0
    }

    fn reference_color(x: u32, y: u32) -> (&'static str, f64) {
        if Self::is_guide(x) || Self::is_guide(y) {
            ("rgb(210,0,0)", 0.8)
        } else {
            ("rgb(0,0,0)", 0.4)
        }
    }

    fn font_size(&self) -> f64 {
        self.multiplier as f64 / 2.0
    }

    fn reference_font_size(&self) -> f64 {
        self.multiplier as f64 / 2.5
    }

    /// Render the full diagram.
    ///
    /// `frame` is the same preprocessed image the grid was built from; it
    /// feeds the preview panel. `label` is an optional caption shown under
    /// the preview.
    pub fn render(
        &self,
        grid: &PatternGrid,
        frame: &Frame,
        palette: &Palette,
        label: Option<&str>,
    ) -> String {
        let grid_w = self.grid_width(grid);
        let grid_h = self.grid_height(grid);

        let preview_panel_w = frame.width() as f64 * 4.0;
        let preview_panel_h = self.preview_panel_height(frame, label);

        let usage_avail_h = (grid_h - preview_panel_h).max(0.0);
        let usage_columns = self.usage_columns(grid, usage_avail_h);
        let usage_w = usage_columns as f64 * 90.0;

        let info_w = preview_panel_w.max(usage_w);
        let total_w = info_w + grid_w;
        let total_h = grid_h;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_w:.0}" height="{total_h:.0}" viewBox="0 0 {total_w:.0} {total_h:.0}" font-family="sans-serif">"#,
        );
        svg.push('\n');
        let _ = write!(
            svg,
            r##"<rect width="{total_w:.0}" height="{total_h:.0}" fill="#fff"/>"##
        );
        svg.push('\n');

        self.write_defs(&mut svg, grid, palette);
        self.write_info_panel(&mut svg, grid, frame, label, info_w, preview_panel_h, usage_avail_h);
        self.write_grid_panel(&mut svg, grid, info_w);

        // Credit line, bottom right
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" text-anchor="end" fill="rgb(0,0,0)" fill-opacity="0.4">Generated with beadloom</text>"#,
            total_w - 4.0,
            total_h - 4.0,
            self.reference_font_size(),
        );
        svg.push('\n');

        svg.push_str("</svg>\n");
        svg
    }

    /// One symbol per used bead code plus the two blank markers.
    fn write_defs(&self, svg: &mut String, grid: &PatternGrid, palette: &Palette) {
        let dot = self.dot_size();
        svg.push_str("<defs>\n");

        let _ = write!(
            svg,
            r#"<g id="blank-plain"><circle r="{:.2}" fill="rgb(0,0,0)" fill-opacity="0.4"/></g>"#,
            dot / 8.0,
        );
        svg.push('\n');
        let _ = write!(
            svg,
            r#"<g id="blank-guide"><circle r="{:.2}" fill="rgb(210,0,0)" fill-opacity="0.8"/></g>"#,
            dot / 8.0,
        );
        svg.push('\n');

        for (code, _) in grid.usage() {
            let rgb = match palette.get(code) {
                Some(rgb) => rgb,
                None => continue,
            };
            let (text_fill, text_opacity) = contrast_color(rgb);
            let _ = write!(
                svg,
                r##"<g id="bead-{code}"><circle r="{radius:.2}" fill="{fill}" stroke="rgb(0,0,0)" stroke-opacity="0.4" stroke-width="1"/><text font-size="{font:.1}" text-anchor="middle" dominant-baseline="central" fill="{text_fill}" fill-opacity="{text_opacity}">{text}</text></g>"##,
                code = xml_escape(code),
                radius = dot / 2.0,
                fill = rgb,
                font = self.reference_font_size(),
                text_fill = text_fill,
                text_opacity = text_opacity,
                text = xml_escape(code.trim_start_matches('C')),
            );
            svg.push('\n');
        }

        svg.push_str("</defs>\n");
    }

    fn write_grid_panel(&self, svg: &mut String, grid: &PatternGrid, offset_x: f64) {
        let _ = write!(svg, r#"<g transform="translate({offset_x:.1},0)">"#);
        svg.push('\n');

        for x in 0..grid.width() {
            for y in 0..grid.height() {
                self.write_reference_numbers(svg, x, y);

                let cell = grid.cell(x, y);
                let cx = self.calc_x(x);
                let cy = self.calc_y(y);
                if cell.is_empty() {
                    let id = if Self::is_guide(x + 1) || Self::is_guide(y + 1) {
                        "blank-guide"
                    } else {
                        "blank-plain"
                    };
                    let _ = write!(svg, r##"<use href="#{id}" x="{cx:.1}" y="{cy:.1}"/>"##);
                } else {
                    let _ = write!(
                        svg,
                        r##"<use href="#bead-{}" x="{cx:.1}" y="{cy:.1}"/>"##,
                        xml_escape(cell.code()),
                    );
                }
                svg.push('\n');
            }
        }

        svg.push_str("</g>\n");
    }

    /// Column numbers above every 2nd column, row numbers left of every 2nd
    /// row, in the guide color when the 1-based index hits a guide line.
    fn write_reference_numbers(&self, svg: &mut String, x: u32, y: u32) {
        let font = self.reference_font_size();

        if y == 0 && (x + 1) % 2 == 0 {
            let (fill, opacity) = Self::reference_color(x + 1, y + 1);
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{font:.1}" text-anchor="middle" dominant-baseline="central" fill="{fill}" fill-opacity="{opacity}">{}</text>"#,
                self.calc_x(x),
                self.calc_y(y) - self.number_row(),
                x + 1,
            );
            svg.push('\n');
        }

        if x == 0 && (y + 1) % 2 == 0 {
            let (fill, opacity) = Self::reference_color(x + 1, y + 1);
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{font:.1}" text-anchor="middle" dominant-baseline="central" fill="{fill}" fill-opacity="{opacity}">{}</text>"#,
                self.calc_x(x) - self.number_row(),
                self.calc_y(y),
                y + 1,
            );
            svg.push('\n');
        }
    }

    fn preview_panel_height(&self, frame: &Frame, label: Option<&str>) -> f64 {
        let lines = if label.is_some() { 3.0 } else { 2.0 };
        60.0 + frame.height() as f64 * 2.0 + (self.font_size() + 6.0) * lines
    }

    #[allow(clippy::too_many_arguments)]
    fn write_info_panel(
        &self,
        svg: &mut String,
        grid: &PatternGrid,
        frame: &Frame,
        label: Option<&str>,
        info_w: f64,
        preview_panel_h: f64,
        usage_avail_h: f64,
    ) {
        let panel_w = frame.width() as f64 * 4.0;
        let preview_w = frame.width() as f64 * 2.0;
        let preview_h = frame.height() as f64 * 2.0;
        let preview_x = panel_w / 2.0 - preview_w / 2.0;

        // Preview pixels, 2x scale, re-flipped to visual orientation
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let pixel = frame.pixel(x, y);
                if pixel.is_transparent() {
                    continue;
                }
                let visual_y = frame.height() - 1 - y;
                let _ = write!(
                    svg,
                    r#"<rect x="{:.1}" y="{:.1}" width="2" height="2" fill="{}" fill-opacity="{:.3}"/>"#,
                    preview_x + x as f64 * 2.0,
                    30.0 + visual_y as f64 * 2.0,
                    pixel.rgb(),
                    pixel.a as f64 / 255.0,
                );
                svg.push('\n');
            }
        }

        // Caption lines under the preview
        let font = self.font_size();
        let mut top = 30.0 + preview_h + 18.0;
        if let Some(label) = label {
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{top:.1}" font-size="{font:.1}" text-anchor="middle" fill="rgb(0,0,0)">{}</text>"#,
                panel_w / 2.0,
                xml_escape(label),
            );
            svg.push('\n');
            top += 18.0;
        }
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{top:.1}" font-size="{font:.1}" text-anchor="middle" fill="rgb(0,0,0)">{} x {}</text>"#,
            panel_w / 2.0,
            grid.width(),
            grid.height(),
        );
        svg.push('\n');
        top += 18.0;
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{top:.1}" font-size="{font:.1}" text-anchor="middle" fill="rgb(0,0,0)">{} beads</text>"#,
            panel_w / 2.0,
            grid.bead_count(),
        );
        svg.push('\n');

        self.write_usage_legend(svg, grid, preview_panel_h, usage_avail_h);

        // Divider between preview and legend, and between panel and grid
        let _ = write!(
            svg,
            r##"<line x1="0" y1="{preview_panel_h:.1}" x2="{info_w:.1}" y2="{preview_panel_h:.1}" stroke="#aaa" stroke-width="2"/>"##,
        );
        svg.push('\n');
        let _ = write!(
            svg,
            r##"<line x1="{info_w:.1}" y1="0" x2="{info_w:.1}" y2="{:.1}" stroke="#aaa" stroke-width="2"/>"##,
            self.grid_height(grid),
        );
        svg.push('\n');
    }

    /// Legend entries in usage order, wrapping into 90px columns when the
    /// available height runs out.
    fn write_usage_legend(
        &self,
        svg: &mut String,
        grid: &PatternGrid,
        panel_top: f64,
        avail_h: f64,
    ) {
        let dot = self.dot_size();
        let step = dot + 5.0;
        let top0 = dot / 2.0 + 15.0;
        let mut top = top0;
        let mut left = 15.0;

        for (code, count) in grid.usage() {
            if top > avail_h {
                top = top0;
                left += 90.0;
            }
            let _ = write!(
                svg,
                r##"<use href="#bead-{code}" x="{:.1}" y="{:.1}"/>"##,
                left + dot / 1.5,
                panel_top + top,
                code = xml_escape(code),
            );
            svg.push('\n');
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" dominant-baseline="central" fill="rgb(0,0,0)">x {count}</text>"#,
                left + dot * 1.5,
                panel_top + top + dot / 6.0,
                self.font_size(),
            );
            svg.push('\n');
            top += step;
        }
    }

    /// Number of 90px legend columns needed for the usage table.
    fn usage_columns(&self, grid: &PatternGrid, avail_h: f64) -> u32 {
        let dot = self.dot_size();
        let step = dot + 5.0;
        let top0 = dot / 2.0 + 15.0;
        let mut top = top0;
        let mut columns = 1u32;

        for _ in grid.usage() {
            if top > avail_h {
                top = top0;
                columns += 1;
            }
            top += step;
        }
        columns
    }
}

/// Black or white code text, whichever contrasts with the bead color.
/// Uses the YIQ luma approximation.
fn contrast_color(rgb: Rgb) -> (&'static str, f64) {
    let yiq =
        (rgb.r as u32 * 299 + rgb.g as u32 * 587 + rgb.b as u32 * 114) as f64 / 1000.0;
    if yiq >= 128.0 {
        ("rgb(0,0,0)", 0.75)
    } else {
        ("rgb(255,255,255)", 0.75)
    }
}

/// Escape text and attribute values; codes land in ids, hrefs and text, so
/// the same escaping is applied in all three to keep `use` references and
/// symbol ids matching.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_pattern::{Matcher, Rgb};

    fn small_pattern() -> (PatternGrid, Frame, Palette) {
        let palette = Palette::new([
            ("C01", Rgb::new(255, 255, 255)),
            ("C14", Rgb::new(10, 10, 10)),
            ("C20", Rgb::new(220, 20, 20)),
        ])
        .unwrap();
        let matcher = Matcher::new(palette.clone());
        // 2x2: red, white, transparent, black
        let frame = Frame::from_rgba8(
            2,
            2,
            vec![
                220, 20, 20, 255, //
                255, 255, 255, 255, //
                0, 0, 0, 0, //
                10, 10, 10, 255,
            ],
        );
        let grid = PatternGrid::build(&frame, &matcher).unwrap();
        (grid, frame, palette)
    }

    #[test]
    fn test_renders_valid_svg_shell() {
        let (grid, frame, palette) = small_pattern();
        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_defines_each_used_code_once() {
        let (grid, frame, palette) = small_pattern();
        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);
        for (code, _) in grid.usage() {
            assert_eq!(
                svg.matches(&format!(r##"<g id="bead-{code}">"##)).count(),
                1,
                "one symbol for {code}"
            );
            assert!(svg.contains(&format!(r##"href="#bead-{code}""##)));
        }
    }

    #[test]
    fn test_bead_text_drops_code_prefix() {
        let (grid, frame, palette) = small_pattern();
        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);
        // C14 renders as "14" inside its symbol
        assert!(svg.contains(">14</text>"));
    }

    #[test]
    fn test_legend_lists_counts_in_usage_order() {
        let (grid, frame, palette) = small_pattern();
        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);
        for (_, count) in grid.usage() {
            assert!(svg.contains(&format!(">x {count}</text>")));
        }
    }

    #[test]
    fn test_label_is_escaped() {
        let (grid, frame, palette) = small_pattern();
        let svg =
            DiagramRenderer::new(26).render(&grid, &frame, &palette, Some("cats & <dogs>"));
        assert!(svg.contains("cats &amp; &lt;dogs&gt;"));
        assert!(!svg.contains("cats & <dogs>"));
    }

    #[test]
    fn test_caption_includes_dimensions_and_bead_count() {
        let (grid, frame, palette) = small_pattern();
        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);
        assert!(svg.contains(">2 x 2</text>"));
        assert!(svg.contains(">3 beads</text>"));
    }

    #[test]
    fn test_custom_codes_are_escaped_everywhere() {
        // Codes with XML metacharacters must not corrupt the document; the
        // escaped form has to match between the symbol id and its uses.
        let palette = Palette::new([("A&\"", Rgb::new(200, 10, 10))]).unwrap();
        let matcher = Matcher::new(palette.clone());
        let frame = Frame::from_rgba8(1, 1, vec![200, 10, 10, 255]);
        let grid = PatternGrid::build(&frame, &matcher).unwrap();

        let svg = DiagramRenderer::new(26).render(&grid, &frame, &palette, None);

        assert!(svg.contains(r##"id="bead-A&amp;&quot;""##));
        assert!(svg.contains(r##"href="#bead-A&amp;&quot;""##));
        assert!(!svg.contains(r#"bead-A&""#));
        // Symbol text is escaped too
        assert!(svg.contains(">A&amp;&quot;</text>"));
    }

    #[test]
    fn test_guide_color_on_fiftieth_column() {
        assert_eq!(DiagramRenderer::reference_color(50, 3).0, "rgb(210,0,0)");
        assert_eq!(DiagramRenderer::reference_color(3, 100).0, "rgb(210,0,0)");
        assert_eq!(DiagramRenderer::reference_color(3, 3).0, "rgb(0,0,0)");
    }

    #[test]
    fn test_contrast_color_yiq_threshold() {
        assert_eq!(contrast_color(Rgb::new(255, 255, 255)).0, "rgb(0,0,0)");
        assert_eq!(contrast_color(Rgb::new(10, 10, 10)).0, "rgb(255,255,255)");
    }
}
