use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Point,
    SpreadMode, Stroke, Transform,
};

use super::measure::{FontBook, FontSpec, TextMeasurer};
use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `alpha` in 0.0..=1.0
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha * 255.0 + 0.5) as u8,
            ..self
        }
    }

    fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn to_skia(self) -> Result<tiny_skia::Rect, RenderError> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
            .ok_or(RenderError::SurfaceUnavailable)
    }
}

/// 2D drawing surface the result card is composed on. Text is centred on
/// `center_x` with `baseline` as the alphabetic baseline.
pub trait Canvas {
    fn fill_gradient(
        &mut self,
        start: (f32, f32),
        end: (f32, f32),
        from: Rgba,
        to: Rgba,
    ) -> Result<(), RenderError>;

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgba, width: f32) -> Result<(), RenderError>;

    fn stroke_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    ) -> Result<(), RenderError>;

    fn fill_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
    ) -> Result<(), RenderError>;

    fn fill_round_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        color: Rgba,
    ) -> Result<(), RenderError>;

    fn fill_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Rgba,
        center_x: f32,
        baseline: f32,
    ) -> Result<(), RenderError>;
}

/// CPU raster canvas backed by a tiny-skia pixmap, with glyphs rasterized by
/// fontdue.
pub struct SkiaCanvas<'a> {
    pixmap: Pixmap,
    fonts: &'a FontBook,
}

impl<'a> SkiaCanvas<'a> {
    pub fn new(width: u32, height: u32, fonts: &'a FontBook) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable)?;
        Ok(Self { pixmap, fonts })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encoding(e.to_string()))
    }

    fn paint(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            path,
            &Self::paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.pixmap.fill_path(
            path,
            &Self::paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

impl Canvas for SkiaCanvas<'_> {
    fn fill_gradient(
        &mut self,
        start: (f32, f32),
        end: (f32, f32),
        from: Rgba,
        to: Rgba,
    ) -> Result<(), RenderError> {
        let shader = LinearGradient::new(
            Point::from_xy(start.0, start.1),
            Point::from_xy(end.0, end.1),
            vec![
                GradientStop::new(0.0, from.to_skia()),
                GradientStop::new(1.0, to.to_skia()),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .ok_or(RenderError::SurfaceUnavailable)?;
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        let rect = Bounds::new(0.0, 0.0, self.width() as f32, self.height() as f32).to_skia()?;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgba, width: f32) -> Result<(), RenderError> {
        let path = PathBuilder::from_rect(bounds.to_skia()?);
        self.stroke_path(&path, color, width);
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    ) -> Result<(), RenderError> {
        let path = PathBuilder::from_circle(center.0, center.1, radius)
            .ok_or(RenderError::SurfaceUnavailable)?;
        self.stroke_path(&path, color, width);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
    ) -> Result<(), RenderError> {
        let path = PathBuilder::from_circle(center.0, center.1, radius)
            .ok_or(RenderError::SurfaceUnavailable)?;
        self.fill_path(&path, color);
        Ok(())
    }

    fn fill_round_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        color: Rgba,
    ) -> Result<(), RenderError> {
        let path = rounded_rect(bounds, radius).ok_or(RenderError::SurfaceUnavailable)?;
        self.fill_path(&path, color);
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Rgba,
        center_x: f32,
        baseline: f32,
    ) -> Result<(), RenderError> {
        let fonts: &FontBook = self.fonts;
        let face = fonts.font(font);
        let mut pen_x = center_x - fonts.measure(text, font) / 2.0;
        let mut previous: Option<char> = None;

        for ch in text.chars() {
            if let Some(prev) = previous {
                pen_x += face.horizontal_kern(prev, ch, font.size).unwrap_or(0.0);
            }
            let (metrics, coverage) = face.rasterize(ch, font.size);
            if let Some(glyph) = glyph_pixmap(&coverage, metrics.width, metrics.height, color) {
                let x = (pen_x + metrics.xmin as f32).round() as i32;
                let y = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
                self.pixmap.draw_pixmap(
                    x,
                    y,
                    glyph.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
            pen_x += metrics.advance_width + font.letter_spacing;
            previous = Some(ch);
        }
        Ok(())
    }
}

/// Premultiplied RGBA pixmap tinted with `color`, alpha from glyph coverage.
fn glyph_pixmap(coverage: &[u8], width: usize, height: usize, color: Rgba) -> Option<Pixmap> {
    if width == 0 || height == 0 {
        return None;
    }
    let mut glyph = Pixmap::new(width as u32, height as u32)?;
    for (pixel, &cov) in glyph.data_mut().chunks_exact_mut(4).zip(coverage) {
        let alpha = color.a as u32 * cov as u32 / 255;
        pixel[0] = (color.r as u32 * alpha / 255) as u8;
        pixel[1] = (color.g as u32 * alpha / 255) as u8;
        pixel[2] = (color.b as u32 * alpha / 255) as u8;
        pixel[3] = alpha as u8;
    }
    Some(glyph)
}

fn rounded_rect(bounds: Bounds, radius: f32) -> Option<Path> {
    let Bounds {
        x,
        y,
        width: w,
        height: h,
    } = bounds;
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha() {
        let gold = Rgba::rgb(197, 165, 114).with_alpha(0.1);
        assert_eq!(gold.a, 26);
        assert_eq!(gold.with_alpha(1.0).a, 255);
        assert_eq!(gold.with_alpha(0.0).a, 0);
        assert_eq!((gold.r, gold.g, gold.b), (197, 165, 114));
    }

    #[test]
    fn test_glyph_pixmap_premultiplies() {
        let glyph = glyph_pixmap(&[255, 0, 128, 255], 2, 2, Rgba::rgb(200, 100, 50)).unwrap();
        let data = glyph.data();
        assert_eq!(&data[0..4], &[200, 100, 50, 255]);
        assert_eq!(&data[4..8], &[0, 0, 0, 0]);
        assert_eq!(data[11], 128);
        assert_eq!(data[8], (200 * 128 / 255) as u8);
    }

    #[test]
    fn test_empty_glyph_has_no_pixmap() {
        assert!(glyph_pixmap(&[], 0, 12, Rgba::rgb(255, 255, 255)).is_none());
    }

    #[test]
    fn test_rounded_rect_path_bounds() {
        let path = rounded_rect(Bounds::new(140.0, 1550.0, 800.0, 250.0), 20.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 140.0);
        assert_eq!(bounds.top(), 1550.0);
        assert_eq!(bounds.right(), 940.0);
        assert_eq!(bounds.bottom(), 1800.0);
    }
}
