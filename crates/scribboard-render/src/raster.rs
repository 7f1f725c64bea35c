//! Software rasterizer backend.
//!
//! Every shape is turned into a coverage mask over its bounding box and then
//! composited source-over onto an RGBA image. Coverage is derived from the
//! distance between a pixel center and the shape's outline, which gives a
//! one-pixel anti-aliased edge without any supersampling.

use crate::pipeline::{DisplayList, DrawCommand};
use crate::renderer::{RenderResult, Renderer, RendererError};
use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect, Size};
use scribboard_core::{SerializableColor, WhiteboardConfig};
use std::path::Path;

/// Per-pixel coverage over a clipped region of the surface.
struct Mask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl Mask {
    /// Mask covering `bounds`, clipped to a `surface_w` x `surface_h` image.
    fn new(bounds: Rect, surface_w: u32, surface_h: u32) -> Option<Self> {
        let x0 = bounds.x0.floor().max(0.0);
        let y0 = bounds.y0.floor().max(0.0);
        let x1 = bounds.x1.ceil().min(surface_w as f64);
        let y1 = bounds.y1.ceil().min(surface_h as f64);
        if !(x1 > x0 && y1 > y0) {
            return None;
        }
        let (width, height) = ((x1 - x0) as u32, (y1 - y0) as u32);
        Some(Self {
            x0: x0 as u32,
            y0: y0 as u32,
            width,
            height,
            coverage: vec![0.0; width as usize * height as usize],
        })
    }

    /// Raise coverage for every pixel using `f(pixel_center)`.
    ///
    /// Overlapping parts of one shape take the maximum, so joints in a
    /// polyline are not blended twice.
    fn accumulate(&mut self, f: impl Fn(Point) -> f64) {
        for row in 0..self.height {
            for col in 0..self.width {
                let center = Point::new(
                    (self.x0 + col) as f64 + 0.5,
                    (self.y0 + row) as f64 + 0.5,
                );
                let c = f(center).clamp(0.0, 1.0) as f32;
                let slot = &mut self.coverage[row as usize * self.width as usize + col as usize];
                if c > *slot {
                    *slot = c;
                }
            }
        }
    }

    fn set_max(&mut self, x: i64, y: i64, c: f32) {
        let (col, row) = (x - self.x0 as i64, y - self.y0 as i64);
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let slot = &mut self.coverage[row as usize * self.width as usize + col as usize];
        if c > *slot {
            *slot = c.min(1.0);
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over blend of `color` at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: SerializableColor, coverage: f32) {
    let sa = color.a as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}

/// CPU renderer producing an [`RgbaImage`].
///
/// Identical display lists always yield identical pixels.
pub struct Rasterizer {
    image: RgbaImage,
    font: Option<FontVec>,
}

impl Rasterizer {
    /// Create a transparent surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            font: None,
        }
    }

    /// Create a surface sized for `config`, loading its font if one is set.
    pub fn from_config(config: &WhiteboardConfig) -> RenderResult<Self> {
        let rasterizer = Self::new(config.width, config.height);
        match &config.font_path {
            Some(path) => Ok(rasterizer.with_font(load_font(path)?)),
            None => Ok(rasterizer),
        }
    }

    /// Use `font` for text commands.
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn mask(&self, bounds: Rect) -> Option<Mask> {
        Mask::new(bounds, self.image.width(), self.image.height())
    }

    fn composite(&mut self, mask: &Mask, color: SerializableColor) {
        for row in 0..mask.height {
            for col in 0..mask.width {
                let c = mask.coverage[row as usize * mask.width as usize + col as usize];
                if c > 0.0 {
                    blend(
                        self.image.get_pixel_mut(mask.x0 + col, mask.y0 + row),
                        color,
                        c,
                    );
                }
            }
        }
    }

    fn clear(&mut self, color: SerializableColor) {
        let px = Rgba([color.r, color.g, color.b, color.a]);
        for pixel in self.image.pixels_mut() {
            *pixel = px;
        }
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: SerializableColor, width: f64) {
        let Some(first) = segments.first() else {
            return;
        };
        let hw = width / 2.0;
        let bounds = segments
            .iter()
            .fold(Rect::from_points(first.0, first.1), |r, (a, b)| {
                r.union_pt(*a).union_pt(*b)
            })
            .inflate(hw + 1.0, hw + 1.0);
        let Some(mut mask) = self.mask(bounds) else {
            return;
        };
        for &(a, b) in segments {
            let seg_bounds = Rect::from_points(a, b).inflate(hw + 1.0, hw + 1.0);
            let Some(region) = self.mask(seg_bounds) else {
                continue;
            };
            // Evaluate only the segment's own box, writing into the shared mask.
            for row in 0..region.height {
                for col in 0..region.width {
                    let (x, y) = (region.x0 + col, region.y0 + row);
                    let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let c = (hw + 0.5 - segment_distance(center, a, b)).clamp(0.0, 1.0) as f32;
                    if c > 0.0 {
                        mask.set_max(x as i64, y as i64, c);
                    }
                }
            }
        }
        self.composite(&mask, color);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: SerializableColor, width: f64) {
        let hw = width / 2.0;
        let reach = radius + hw + 1.0;
        let bounds = Rect::from_center_size(center, (reach * 2.0, reach * 2.0));
        let Some(mut mask) = self.mask(bounds) else {
            return;
        };
        mask.accumulate(|p| hw + 0.5 - (p.distance(center) - radius).abs());
        self.composite(&mask, color);
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: SerializableColor) {
        let radius = radius.max(0.5);
        let reach = radius + 1.0;
        let bounds = Rect::from_center_size(center, (reach * 2.0, reach * 2.0));
        let Some(mut mask) = self.mask(bounds) else {
            return;
        };
        mask.accumulate(|p| radius + 0.5 - p.distance(center));
        self.composite(&mask, color);
    }

    fn text(&mut self, anchor: Point, text: &str, size: f64, color: SerializableColor) {
        let Some(font) = &self.font else {
            log::warn!("no font configured; skipping text {:?}", text);
            return;
        };
        let scale = PxScale::from(size as f32);
        let scaled = font.as_scaled(scale);
        let mut outlines = Vec::new();
        let mut bounds: Option<Rect> = None;
        let mut pen_x = anchor.x as f32;
        let mut prev = None;
        for ch in text.chars() {
            let gid = font.glyph_id(ch);
            if let Some(prev) = prev {
                pen_x += scaled.kern(prev, gid);
            }
            let glyph = gid.with_scale_and_position(scale, point(pen_x, anchor.y as f32));
            pen_x += scaled.h_advance(gid);
            prev = Some(gid);
            if let Some(outlined) = font.outline_glyph(glyph) {
                let px = outlined.px_bounds();
                let rect = Rect::new(px.min.x as f64, px.min.y as f64, px.max.x as f64, px.max.y as f64);
                bounds = Some(bounds.map_or(rect, |b| b.union(rect)));
                outlines.push(outlined);
            }
        }
        let Some(mut mask) = bounds.and_then(|b| self.mask(b)) else {
            return;
        };
        for outlined in &outlines {
            let min = outlined.px_bounds().min;
            outlined.draw(|gx, gy, c| {
                mask.set_max(min.x as i64 + gx as i64, min.y as i64 + gy as i64, c);
            });
        }
        self.composite(&mask, color);
    }
}

impl Renderer for Rasterizer {
    fn draw(&mut self, list: &DisplayList) {
        for command in list {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::Polyline { points, color, width } => {
                    let segments: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
                    self.stroke_segments(&segments, *color, *width);
                }
                DrawCommand::Dot { center, radius, color } => self.fill_disc(*center, *radius, *color),
                DrawCommand::StrokeRect { rect, color, width } => {
                    let corners = [
                        Point::new(rect.x0, rect.y0),
                        Point::new(rect.x1, rect.y0),
                        Point::new(rect.x1, rect.y1),
                        Point::new(rect.x0, rect.y1),
                    ];
                    let segments: Vec<_> = (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect();
                    self.stroke_segments(&segments, *color, *width);
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => self.stroke_circle(*center, *radius, *color, *width),
                DrawCommand::Line { from, to, color, width } => {
                    self.stroke_segments(&[(*from, *to)], *color, *width)
                }
                DrawCommand::Text {
                    anchor,
                    text,
                    size,
                    color,
                } => self.text(*anchor, text, *size, *color),
            }
        }
    }

    fn size(&self) -> Size {
        Size::new(self.image.width() as f64, self.image.height() as f64)
    }
}

/// Read a TrueType/OpenType font from disk.
pub fn load_font(path: impl AsRef<Path>) -> RenderResult<FontVec> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| RendererError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| RendererError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("loaded font {}", path.display());
    Ok(font)
}
