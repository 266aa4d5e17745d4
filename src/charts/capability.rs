// ============================================================================
// CAPABILITY CHART
// ============================================================================
//
// Capability comparison radar chart: the concept against a fourth-generation
// baseline over six axes.

use super::reveal_radii;
use crate::config::Color;
use crate::i18n::Key;
use crate::panels::{chrome, PanelFrame};
use crate::raster::{bearing_to, polar_point, Align, Point};
use crate::scene::{DrawCommand, Scene};

pub const AXES: [Key; 6] = [
    Key::Speed,
    Key::Stealth,
    Key::Range,
    Key::Payload,
    Key::Agility,
    Key::Sensors,
];

/// Normalised scores per axis, in [0, 1].
pub const CONCEPT: [f64; 6] = [0.85, 0.95, 0.80, 0.75, 0.90, 0.95];
pub const BASELINE: [f64; 6] = [0.80, 0.30, 0.70, 0.85, 0.75, 0.60];

fn axis_angle(i: usize) -> f64 {
    i as f64 * 360.0 / AXES.len() as f64
}

fn plot(frame: &PanelFrame) -> (Point, f64) {
    let (_, _, w, h) = frame.content();
    let radius = (w.min(h) / 2.0 - frame.px(30.0)).max(1.0);
    (frame.content_center(), radius)
}

/// Axis nearest in angle to `local`, if the click lies on the chart.
pub fn closest_axis(frame: &PanelFrame, local: Point) -> Option<usize> {
    let (center, radius) = plot(frame);
    let dist = ((local.0 - center.0).powi(2) + (local.1 - center.1).powi(2)).sqrt();
    if dist > radius + frame.px(20.0) {
        return None;
    }
    let step = 360.0 / AXES.len() as f64;
    Some((bearing_to(center, local) / step).round() as usize % AXES.len())
}

fn series(
    scene: &mut Scene,
    center: Point,
    radius: f64,
    values: &[f64],
    progress: f64,
    color: Color,
    fill: f32,
) {
    let targets: Vec<f64> = values.iter().map(|v| v * radius).collect();
    let points: Vec<Point> = reveal_radii(&targets, progress)
        .iter()
        .enumerate()
        .map(|(i, r)| polar_point(center, *r, axis_angle(i)))
        .collect();
    scene.add_command(DrawCommand::Polygon {
        points: points.clone(),
        color,
        alpha: fill,
    });
    scene.add_command(DrawCommand::Polyline {
        points,
        closed: true,
        thickness: 2.0,
        color,
        alpha: 1.0,
    });
}

pub fn draw(frame: &PanelFrame, progress: f64) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::Capability);
    let (center, radius) = plot(frame);

    // Web
    for level in 1..=4 {
        let r = radius * level as f64 / 4.0;
        let web: Vec<Point> = (0..AXES.len())
            .map(|i| polar_point(center, r, axis_angle(i)))
            .collect();
        scene.add_command(DrawCommand::Polyline {
            points: web,
            closed: true,
            thickness: 1.0,
            color: frame.dim(),
            alpha: 0.8,
        });
    }
    for (i, key) in AXES.iter().enumerate() {
        let angle = axis_angle(i);
        let selected = frame.selection == Some(i);
        let color = if selected { frame.warning } else { frame.dim() };
        scene.faint_line(center, polar_point(center, radius, angle), 1.0, color, 0.9);
        scene.text(
            polar_point(center, radius + frame.px(16.0), angle),
            frame.label(*key),
            frame.font(10.0),
            Align::Center,
            if selected { frame.warning } else { frame.accent },
        );
    }

    let baseline_color = frame.background.mix(frame.accent, 0.55).mix(frame.warning, 0.3);
    series(&mut scene, center, radius, &BASELINE, progress, baseline_color, 0.15);
    series(&mut scene, center, radius, &CONCEPT, progress, frame.accent, 0.3);

    if let Some(i) = frame.selection.filter(|&i| i < AXES.len()) {
        let (x, y, _, h) = frame.content();
        scene.text(
            (x + frame.px(8.0), y + h - frame.px(10.0)),
            format!(
                "{}: {:.0} / {:.0}",
                frame.label(AXES[i]),
                CONCEPT[i] * 100.0,
                BASELINE[i] * 100.0
            ),
            frame.font(11.0),
            Align::Left,
            frame.warning,
        );
    }

    // Legend
    let (x, y, w, _) = frame.content();
    let legend_x = x + w - frame.px(90.0);
    for (row, (key, color)) in [(Key::Concept, frame.accent), (Key::Baseline, baseline_color)]
        .into_iter()
        .enumerate()
    {
        let ly = y + frame.px(12.0 + row as f64 * 16.0);
        scene.add_command(DrawCommand::Rect {
            x: legend_x,
            y: ly - frame.px(4.0),
            w: frame.px(8.0),
            h: frame.px(8.0),
            color,
            alpha: 1.0,
        });
        scene.text(
            (legend_x + frame.px(14.0), ly),
            frame.label(key),
            frame.font(10.0),
            Align::Left,
            color,
        );
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_frame;

    #[test]
    fn axis_labels_follow_locale() {
        let frame = PanelFrame {
            locale: crate::i18n::Locale::Tr,
            ..test_frame(360.0, 360.0)
        };
        let scene = draw(&frame, 1.0);
        assert!(scene.texts().any(|t| t == "GİZLİLİK"));
        assert!(scene.texts().any(|t| t == "KONSEPT"));
    }

    #[test]
    fn axes_hit_test_by_angle() {
        let frame = test_frame(360.0, 382.0);
        let (center, radius) = plot(&frame);
        for i in 0..AXES.len() {
            let p = polar_point(center, radius * 0.6, axis_angle(i) + 20.0);
            assert_eq!(closest_axis(&frame, p), Some(i));
        }
    }
}
