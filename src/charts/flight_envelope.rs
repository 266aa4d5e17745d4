// ============================================================================
// FLIGHT ENVELOPE CHART
// ============================================================================
//
// Altitude–Mach flight envelope traced along its boundary.

use super::reveal_path;
use crate::i18n::Key;
use crate::panels::{chrome, PanelFrame};
use crate::raster::{Align, Point};
use crate::scene::{DrawCommand, Scene};

/// Envelope boundary as (Mach, altitude in kft), clockwise from sea level.
pub const ENVELOPE: [(f64, f64); 16] = [
    (0.20, 0.0),
    (0.25, 10.0),
    (0.35, 20.0),
    (0.50, 30.0),
    (0.70, 40.0),
    (0.90, 50.0),
    (1.20, 58.0),
    (1.60, 62.0),
    (2.00, 60.0),
    (2.20, 55.0),
    (2.25, 45.0),
    (2.10, 35.0),
    (1.80, 25.0),
    (1.40, 15.0),
    (1.10, 5.0),
    (0.95, 0.0),
];

pub const MACH_MAX: f64 = 2.4;
pub const ALTITUDE_MAX_KFT: f64 = 70.0;

/// Plot area inside the chart: (x, y, w, h).
fn plot_area(frame: &PanelFrame) -> (f64, f64, f64, f64) {
    let (x, y, w, h) = frame.content();
    let left = frame.px(40.0);
    let bottom = frame.px(30.0);
    let pad = frame.px(12.0);
    (
        x + left,
        y + pad,
        (w - left - pad).max(1.0),
        (h - bottom - pad).max(1.0),
    )
}

/// Pixel position of an envelope point.
pub fn to_screen(frame: &PanelFrame, mach: f64, altitude_kft: f64) -> Point {
    let (x, y, w, h) = plot_area(frame);
    (
        x + w * mach / MACH_MAX,
        y + h - h * altitude_kft / ALTITUDE_MAX_KFT,
    )
}

pub fn closest_point(frame: &PanelFrame, local: Point) -> Option<usize> {
    let limit = frame.px(14.0);
    ENVELOPE
        .iter()
        .enumerate()
        .map(|(i, &(mach, alt))| {
            let p = to_screen(frame, mach, alt);
            (i, ((p.0 - local.0).powi(2) + (p.1 - local.1).powi(2)).sqrt())
        })
        .filter(|&(_, d)| d <= limit)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

pub fn draw(frame: &PanelFrame, progress: f64) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::FlightEnvelope);
    let (px, py, pw, ph) = plot_area(frame);

    // Axes and grid
    let grid = frame.dim();
    for step in 0..=6 {
        let mach = step as f64 * 0.4;
        let (gx, _) = to_screen(frame, mach, 0.0);
        scene.faint_line((gx, py), (gx, py + ph), 1.0, grid, 0.5);
        scene.text(
            (gx, py + ph + frame.px(10.0)),
            format!("{mach:.1}"),
            frame.font(9.0),
            Align::Center,
            grid,
        );
    }
    for step in 0..=7 {
        let alt = step as f64 * 10.0;
        let (_, gy) = to_screen(frame, 0.0, alt);
        scene.faint_line((px, gy), (px + pw, gy), 1.0, grid, 0.5);
        scene.text(
            (px - frame.px(6.0), gy),
            format!("{alt:.0}"),
            frame.font(9.0),
            Align::Right,
            grid,
        );
    }
    scene.line((px, py + ph), (px + pw, py + ph), frame.px(1.5), frame.accent);
    scene.line((px, py), (px, py + ph), frame.px(1.5), frame.accent);
    scene.text(
        (px + pw, py + ph + frame.px(22.0)),
        frame.label(Key::Mach),
        frame.font(10.0),
        Align::Right,
        frame.accent,
    );
    scene.text(
        (px + frame.px(4.0), py + frame.px(4.0)),
        format!("{} kft", frame.label(Key::Altitude)),
        frame.font(10.0),
        Align::Left,
        frame.accent,
    );

    let boundary: Vec<Point> = ENVELOPE
        .iter()
        .map(|&(mach, alt)| to_screen(frame, mach, alt))
        .collect();
    let path = reveal_path(&boundary, progress);
    let complete = progress >= 1.0;
    if complete {
        scene.add_command(DrawCommand::Polygon {
            points: boundary.clone(),
            color: frame.accent,
            alpha: 0.2,
        });
    }
    scene.add_command(DrawCommand::Polyline {
        points: path,
        closed: complete,
        thickness: frame.px(2.0) as f32,
        color: frame.accent,
        alpha: 1.0,
    });

    if let Some(i) = frame.selection.filter(|&i| i < ENVELOPE.len()) {
        let (mach, alt) = ENVELOPE[i];
        let p = boundary[i];
        scene.add_command(DrawCommand::Circle {
            center: p,
            radius: frame.px(5.0),
            color: frame.warning,
            alpha: 1.0,
        });
        scene.text(
            (p.0, p.1 - frame.px(12.0)),
            format!("M{mach:.2} / {alt:.0}k ft"),
            frame.font(10.0),
            Align::Center,
            frame.warning,
        );
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_frame;

    #[test]
    fn envelope_is_closed_only_when_fully_revealed() {
        let frame = test_frame(400.0, 300.0);
        let closed = |scene: &Scene| {
            scene.commands().iter().find_map(|c| match c {
                DrawCommand::Polyline { points, closed, .. } if points.len() > 4 => {
                    Some(*closed)
                }
                _ => None,
            })
        };
        assert_eq!(closed(&draw(&frame, 1.0)), Some(true));
        assert_eq!(closed(&draw(&frame, 0.5)), Some(false));
    }

    #[test]
    fn envelope_stays_open_just_before_completion() {
        let frame = test_frame(400.0, 300.0);
        let scene = draw(&frame, 0.97);
        let filled = scene.commands().iter().any(|c| {
            matches!(c, DrawCommand::Polygon { points, .. } if points.len() == ENVELOPE.len())
        });
        assert!(!filled);
        let (points, closed) = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Polyline { points, closed, .. } if points.len() > 4 => {
                    Some((points.clone(), *closed))
                }
                _ => None,
            })
            .expect("boundary path");
        assert!(!closed);
        let (mach, alt) = ENVELOPE[ENVELOPE.len() - 1];
        assert_ne!(points.last(), Some(&to_screen(&frame, mach, alt)));
    }

    #[test]
    fn points_hit_test_to_themselves() {
        let frame = test_frame(400.0, 300.0);
        for (i, &(mach, alt)) in ENVELOPE.iter().enumerate() {
            let p = to_screen(&frame, mach, alt);
            assert_eq!(closest_point(&frame, p), Some(i));
        }
    }
}
