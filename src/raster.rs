// ============================================================================
// RASTER SURFACES & DRAWING PRIMITIVES
// ============================================================================

use crate::config::Color;
use rusttype::{point, Font, PositionedGlyph, Scale};

pub type Point = (f64, f64);

/// Point on a compass-convention circle: 0° is up, angles grow clockwise.
pub fn polar_point(center: Point, radius: f64, degrees: f64) -> Point {
    let theta = degrees.to_radians();
    (
        center.0 + radius * theta.sin(),
        center.1 - radius * theta.cos(),
    )
}

/// Rotates `p` about the origin, clockwise on screen for positive degrees.
pub fn rotate(p: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (p.0 * cos - p.1 * sin, p.0 * sin + p.1 * cos)
}

/// Compass bearing of `p` as seen from `center`, in `[0, 360)`.
pub fn bearing_to(center: Point, p: Point) -> f64 {
    let dx = p.0 - center.0;
    let dy = center.1 - p.1;
    crate::telemetry::wrap_degrees(dx.atan2(dy).to_degrees())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Owned RGBA buffer that panels and charts paint into.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Reallocates only when the size actually changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = Surface::new(width, height);
        }
    }

    pub fn canvas(&mut self) -> Option<Canvas<'_>> {
        Canvas::new(&mut self.pixels, self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Copies this surface into `frame` with its top-left corner at (x, y),
    /// cropping whatever falls outside the frame.
    pub fn blit_into(&self, frame: &mut [u8], frame_width: usize, x: i64, y: i64) {
        if frame_width == 0 {
            return;
        }
        let frame_height = frame.len() / (frame_width * 4);
        for row in 0..self.height {
            let fy = y + row as i64;
            if fy < 0 || fy >= frame_height as i64 {
                continue;
            }
            let x_start = x.max(0);
            let x_end = (x + self.width as i64).min(frame_width as i64);
            if x_start >= x_end {
                continue;
            }
            let src_start = (row * self.width + (x_start - x) as usize) * 4;
            let len = (x_end - x_start) as usize * 4;
            let dst_start = (fy as usize * frame_width + x_start as usize) * 4;
            frame[dst_start..dst_start + len]
                .copy_from_slice(&self.pixels[src_start..src_start + len]);
        }
    }
}

/// Borrowed drawing target. Construction fails for an empty or mis-sized
/// buffer, which callers treat as "no drawing context".
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || frame.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            frame,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = (y as usize * self.width + x as usize) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let out = [
            (src[0] * a + self.frame[idx] as f32 * (1.0 - a)).round() as u8,
            (src[1] * a + self.frame[idx + 1] as f32 * (1.0 - a)).round() as u8,
            (src[2] * a + self.frame[idx + 2] as f32 * (1.0 - a)).round() as u8,
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Clipped pixel bounding box of a region, or `None` when fully outside.
    fn clip(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<(i64, i64, i64, i64)> {
        let x0 = (min_x.floor() as i64).max(0);
        let y0 = (min_y.floor() as i64).max(0);
        let x1 = (max_x.ceil() as i64).min(self.width as i64 - 1);
        let y1 = (max_y.ceil() as i64).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }

    pub fn line(&mut self, from: Point, to: Point, thickness: f32, color: Color, alpha: f32) {
        self.stroke(from, to, thickness, 0.0, color, alpha);
    }

    /// Line whose width narrows to a point at `to`.
    pub fn tapered_line(&mut self, from: Point, to: Point, thickness: f32, color: Color, alpha: f32) {
        self.stroke(from, to, thickness, 0.95, color, alpha);
    }

    fn stroke(&mut self, from: Point, to: Point, thickness: f32, taper: f32, color: Color, alpha: f32) {
        let pad = thickness.ceil() as f64 + 1.0;
        let Some((x0, y0, x1, y1)) = self.clip(
            from.0.min(to.0) - pad,
            from.1.min(to.1) - pad,
            from.0.max(to.0) + pad,
            from.1.max(to.1) + pad,
        ) else {
            return;
        };
        let dx = (to.0 - from.0) as f32;
        let dy = (to.1 - from.1) as f32;
        let len_sq = (dx * dx + dy * dy).max(f32::EPSILON);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f32 - from.0 as f32;
                let py = y as f32 - from.1 as f32;
                let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
                let lx = t * dx;
                let ly = t * dy;
                let dist = ((lx - px).powi(2) + (ly - py).powi(2)).sqrt();
                let local_thickness = thickness * (1.0 - t * taper);
                let aa = (1.0 - (dist - local_thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa * alpha);
                }
            }
        }
    }

    pub fn polyline(&mut self, points: &[Point], closed: bool, thickness: f32, color: Color, alpha: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], thickness, color, alpha);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], thickness, color, alpha);
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(
            center.0 - radius - 1.0,
            center.1 - radius - 1.0,
            center.0 + radius + 1.0,
            center.1 + radius + 1.0,
        ) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dist = ((x as f64 - center.0).powi(2) + (y as f64 - center.1).powi(2)).sqrt();
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.blend_pixel(x, y, color, aa as f32 * alpha);
                }
            }
        }
    }

    pub fn ring(&mut self, center: Point, radius: f64, thickness: f64, color: Color, alpha: f32) {
        self.arc(center, radius, thickness, 0.0, std::f64::consts::TAU, color, alpha);
    }

    /// Arc band of `thickness` ending at `radius`. Angles are radians in
    /// screen convention (0 points right, positive turns clockwise).
    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        thickness: f64,
        start_angle: f64,
        arc_span: f64,
        color: Color,
        alpha: f32,
    ) {
        let Some((x0, y0, x1, y1)) = self.clip(
            center.0 - radius - 1.0,
            center.1 - radius - 1.0,
            center.0 + radius + 1.0,
            center.1 + radius + 1.0,
        ) else {
            return;
        };
        let full = arc_span.abs() >= std::f64::consts::TAU;
        let start = start_angle.rem_euclid(std::f64::consts::TAU);
        let inner = radius - thickness;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 - center.0;
                let dy = y as f64 - center.1;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < inner - 1.0 || dist > radius + 1.0 {
                    continue;
                }
                if !full {
                    let angle = dy.atan2(dx).rem_euclid(std::f64::consts::TAU);
                    let offset = (angle - start).rem_euclid(std::f64::consts::TAU);
                    if offset > arc_span {
                        continue;
                    }
                }
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.blend_pixel(x, y, color, aa as f32 * alpha);
                }
            }
        }
    }

    /// Even-odd fill sampled at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let (min_x, min_y, max_x, max_y) = points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.0), min_y.min(p.1), max_x.max(p.0), max_y.max(p.1))
            },
        );
        let Some((x0, y0, x1, y1)) = self.clip(min_x, min_y, max_x, max_y) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if point_in_polygon((x as f64 + 0.5, y as f64 + 0.5), points) {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, x + w - 1.0, y + h - 1.0) else {
            return;
        };
        for py in y0..=y1 {
            for px in x0..=x1 {
                self.blend_pixel(px, py, color, alpha);
            }
        }
    }

    /// Vertical gradient from `top` to `bottom`.
    pub fn gradient_rect(&mut self, x: f64, y: f64, w: f64, h: f64, top: Color, bottom: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, x + w - 1.0, y + h - 1.0) else {
            return;
        };
        for py in y0..=y1 {
            let t = if h > 1.0 { (py as f64 - y) / (h - 1.0) } else { 0.0 };
            let color = top.mix(bottom, t);
            for px in x0..=x1 {
                self.blend_pixel(px, py, color, 1.0);
            }
        }
    }

    /// Draws `text` anchored at (x, y): vertically centred, horizontally
    /// per `align`.
    pub fn text(
        &mut self,
        position: Point,
        text: &str,
        font: &Font<'static>,
        size: f32,
        align: Align,
        color: Color,
        alpha: f32,
    ) {
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> =
            font.layout(text, scale, point(0.0, v_metrics.ascent)).collect();
        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let width_px = (max_x - min_x) as i64;
        let height_px = (max_y - min_y) as i64;
        let x = position.0.round() as i64;
        let offset_x = match align {
            Align::Left => x,
            Align::Center => x - width_px / 2,
            Align::Right => x - width_px,
        };
        let offset_y = position.1.round() as i64 - height_px / 2;
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + gx as i64 + (bb.min.x - min_x) as i64;
                    let py = offset_y + gy as i64 + (bb.min.y - min_y) as i64;
                    self.blend_pixel(px, py, color, v * alpha);
                });
            }
        }
    }
}

pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    const BLACK: Color = Color::new(0, 0, 0);

    #[test]
    fn canvas_rejects_missing_context() {
        let mut empty: Vec<u8> = Vec::new();
        assert!(Canvas::new(&mut empty, 0, 0).is_none());
        let mut short = vec![0u8; 10];
        assert!(Canvas::new(&mut short, 4, 4).is_none());
    }

    #[test]
    fn polar_point_uses_compass_convention() {
        let (x, y) = polar_point((0.0, 0.0), 10.0, 90.0);
        assert!((x - 10.0).abs() < 1e-9 && y.abs() < 1e-9);
        let (x, y) = polar_point((0.0, 0.0), 10.0, 0.0);
        assert!(x.abs() < 1e-9 && (y + 10.0).abs() < 1e-9);
        assert!((bearing_to((0.0, 0.0), (0.0, 10.0)) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_fill_covers_interior_only() {
        let mut surface = Surface::new(20, 20);
        let mut canvas = surface.canvas().unwrap();
        canvas.clear(BLACK);
        canvas.fill_polygon(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)], WHITE, 1.0);
        assert_eq!(surface.pixel(10, 10), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(surface.pixel(2, 2), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn blit_crops_to_frame() {
        let mut tile = Surface::new(4, 4);
        tile.canvas().unwrap().clear(WHITE);
        let mut frame = vec![0u8; 6 * 6 * 4];
        tile.blit_into(&mut frame, 6, 4, -2);
        // row 0 receives tile row 2, columns 4..6
        assert_eq!(&frame[(4) * 4..(4) * 4 + 4], &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(&frame[0..4], &[0, 0, 0, 0]);
        // rows 2.. untouched
        assert_eq!(&frame[(2 * 6 + 5) * 4..(2 * 6 + 5) * 4 + 4], &[0, 0, 0, 0]);
    }
}
