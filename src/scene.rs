// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::Color;
use crate::error::{CockpitError, Result};
use crate::raster::{Align, Canvas, Point};
use rusttype::Font;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Label font shared by every renderer
#[derive(Clone)]
pub struct Typeface {
    font: Font<'static>,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").finish_non_exhaustive()
    }
}

impl Typeface {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| CockpitError::FontIo {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_bytes(data).ok_or_else(|| CockpitError::InvalidFont {
            path: path.to_path_buf(),
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self { font })
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }
}

static MISSING_FONT_REPORTED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
        alpha: f32,
    },
    Needle {
        from: Point,
        to: Point,
        thickness: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        thickness: f32,
        color: Color,
        alpha: f32,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
        alpha: f32,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
        alpha: f32,
    },
    Ring {
        center: Point,
        radius: f64,
        thickness: f64,
        color: Color,
        alpha: f32,
    },
    Arc {
        center: Point,
        radius: f64,
        thickness: f64,
        start_angle: f64,
        arc_span: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        alpha: f32,
    },
    Gradient {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        top: Color,
        bottom: Color,
    },
    Text {
        position: Point,
        text: String,
        font_size: f32,
        align: Align,
        color: Color,
    },
}

/// Ordered list of draw commands built by a renderer, then replayed onto a
/// canvas.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    // Shorthands used by the renderers

    pub fn line(&mut self, from: Point, to: Point, thickness: f64, color: Color) {
        self.add_command(DrawCommand::Line {
            from,
            to,
            thickness: thickness as f32,
            color,
            alpha: 1.0,
        });
    }

    pub fn faint_line(&mut self, from: Point, to: Point, thickness: f64, color: Color, alpha: f32) {
        self.add_command(DrawCommand::Line {
            from,
            to,
            thickness: thickness as f32,
            color,
            alpha,
        });
    }

    pub fn ring(&mut self, center: Point, radius: f64, thickness: f64, color: Color, alpha: f32) {
        self.add_command(DrawCommand::Ring {
            center,
            radius,
            thickness,
            color,
            alpha,
        });
    }

    pub fn text(&mut self, position: Point, text: impl Into<String>, font_size: f32, align: Align, color: Color) {
        self.add_command(DrawCommand::Text {
            position,
            text: text.into(),
            font_size,
            align,
            color,
        });
    }

    pub fn render(&self, canvas: &mut Canvas, typeface: Option<&Typeface>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                    alpha,
                } => canvas.line(*from, *to, *thickness, *color, *alpha),
                DrawCommand::Needle {
                    from,
                    to,
                    thickness,
                    color,
                } => canvas.tapered_line(*from, *to, *thickness, *color, 1.0),
                DrawCommand::Polyline {
                    points,
                    closed,
                    thickness,
                    color,
                    alpha,
                } => canvas.polyline(points, *closed, *thickness, *color, *alpha),
                DrawCommand::Polygon {
                    points,
                    color,
                    alpha,
                } => canvas.fill_polygon(points, *color, *alpha),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    alpha,
                } => canvas.fill_circle(*center, *radius, *color, *alpha),
                DrawCommand::Ring {
                    center,
                    radius,
                    thickness,
                    color,
                    alpha,
                } => canvas.ring(*center, *radius, *thickness, *color, *alpha),
                DrawCommand::Arc {
                    center,
                    radius,
                    thickness,
                    start_angle,
                    arc_span,
                    color,
                } => canvas.arc(*center, *radius, *thickness, *start_angle, *arc_span, *color, 1.0),
                DrawCommand::Rect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    alpha,
                } => canvas.fill_rect(*x, *y, *w, *h, *color, *alpha),
                DrawCommand::Gradient {
                    x,
                    y,
                    w,
                    h,
                    top,
                    bottom,
                } => canvas.gradient_rect(*x, *y, *w, *h, *top, *bottom),
                DrawCommand::Text {
                    position,
                    text,
                    font_size,
                    align,
                    color,
                } => match typeface {
                    Some(typeface) => {
                        canvas.text(*position, text, typeface.font(), *font_size, *align, *color, 1.0)
                    }
                    None => {
                        if !MISSING_FONT_REPORTED.swap(true, Ordering::Relaxed) {
                            log::warn!("No font configured; skipping text labels");
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Surface;

    #[test]
    fn text_without_font_is_skipped() {
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(Color::new(1, 2, 3)));
        scene.text((5.0, 5.0), "ALT", 12.0, Align::Center, Color::new(255, 255, 255));
        let mut surface = Surface::new(10, 10);
        scene.render(&mut surface.canvas().unwrap(), None);
        assert!(surface
            .as_bytes()
            .chunks_exact(4)
            .all(|px| px == [1, 2, 3, 0xff]));
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["ALT"]);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        assert!(Typeface::from_bytes(vec![0, 1, 2, 3]).is_none());
    }
}
