// ============================================================================
// RCS POLAR CHART
// ============================================================================
//
// Radar cross-section by aspect angle, plotted on a polar grid.

use super::reveal_radii;
use crate::i18n::Key;
use crate::panels::{chrome, PanelFrame};
use crate::raster::{bearing_to, polar_point, Align, Point};
use crate::scene::{DrawCommand, Scene};

pub const BUCKET_DEG: f64 = 30.0;

/// Illustrative RCS in dBsm per aspect, 0° being head-on.
pub const RCS_DBSM: [f64; 12] = [
    -30.0, -25.0, -15.0, -5.0, -12.0, -20.0, -18.0, -20.0, -12.0, -5.0, -15.0, -25.0,
];

pub const DB_FLOOR: f64 = -40.0;
pub const DB_CEILING: f64 = 0.0;

/// Maps dBsm onto [0, 1] of the plot radius.
pub fn normalized(dbsm: f64) -> f64 {
    ((dbsm - DB_FLOOR) / (DB_CEILING - DB_FLOOR)).clamp(0.0, 1.0)
}

fn plot(frame: &PanelFrame) -> (Point, f64) {
    let (_, _, w, h) = frame.content();
    let radius = (w.min(h) / 2.0 - frame.px(24.0)).max(1.0);
    (frame.content_center(), radius)
}

/// Bucket whose spoke is nearest to `local`, if the click lies on the plot.
pub fn closest_bucket(frame: &PanelFrame, local: Point) -> Option<usize> {
    let (center, radius) = plot(frame);
    let dist = ((local.0 - center.0).powi(2) + (local.1 - center.1).powi(2)).sqrt();
    if dist > radius + frame.px(12.0) {
        return None;
    }
    let bearing = bearing_to(center, local);
    Some((bearing / BUCKET_DEG).round() as usize % RCS_DBSM.len())
}

pub fn draw(frame: &PanelFrame, progress: f64) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::RcsPolar);
    let (center, radius) = plot(frame);

    for db in [-40.0, -30.0, -20.0, -10.0, 0.0] {
        let r = radius * normalized(db);
        if r > 0.0 {
            scene.ring(center, r, frame.px(1.0), frame.dim(), 0.8);
            scene.text(
                (center.0 + frame.px(3.0), center.1 - r - frame.px(6.0)),
                format!("{db:.0}"),
                frame.font(9.0),
                Align::Left,
                frame.dim(),
            );
        }
    }
    for (i, _) in RCS_DBSM.iter().enumerate() {
        let angle = i as f64 * BUCKET_DEG;
        scene.faint_line(center, polar_point(center, radius, angle), 1.0, frame.dim(), 0.7);
        scene.text(
            polar_point(center, radius + frame.px(12.0), angle),
            format!("{angle:.0}°"),
            frame.font(9.0),
            Align::Center,
            frame.dim(),
        );
    }

    let targets: Vec<f64> = RCS_DBSM.iter().map(|&db| radius * normalized(db)).collect();
    let radii = reveal_radii(&targets, progress);
    let outline: Vec<Point> = radii
        .iter()
        .enumerate()
        .map(|(i, r)| polar_point(center, *r, i as f64 * BUCKET_DEG))
        .collect();
    scene.add_command(DrawCommand::Polygon {
        points: outline.clone(),
        color: frame.accent,
        alpha: 0.25,
    });
    scene.add_command(DrawCommand::Polyline {
        points: outline,
        closed: true,
        thickness: frame.px(2.0) as f32,
        color: frame.accent,
        alpha: 1.0,
    });

    if let Some(i) = frame.selection.filter(|&i| i < RCS_DBSM.len()) {
        let angle = i as f64 * BUCKET_DEG;
        let p = polar_point(center, radii[i], angle);
        scene.add_command(DrawCommand::Circle {
            center: p,
            radius: frame.px(5.0),
            color: frame.warning,
            alpha: 1.0,
        });
        let (x, y, _, h) = frame.content();
        scene.text(
            (x + frame.px(8.0), y + h - frame.px(10.0)),
            format!("{angle:03.0}°  {:.0} dBsm", RCS_DBSM[i]),
            frame.font(11.0),
            Align::Left,
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
    fn spokes_map_back_to_their_bucket() {
        let frame = test_frame(360.0, 382.0);
        let (center, radius) = plot(&frame);
        for i in 0..RCS_DBSM.len() {
            let p = polar_point(center, radius * 0.5, i as f64 * BUCKET_DEG + 10.0);
            assert_eq!(closest_bucket(&frame, p), Some(i));
        }
        // 350° rounds back to the head-on bucket
        let p = polar_point(center, radius * 0.5, 350.0);
        assert_eq!(closest_bucket(&frame, p), Some(0));
    }

    #[test]
    fn clicks_off_the_plot_are_ignored() {
        let frame = test_frame(360.0, 382.0);
        assert_eq!(closest_bucket(&frame, (1.0, 30.0)), None);
    }

    #[test]
    fn normalization_clamps() {
        assert_eq!(normalized(-60.0), 0.0);
        assert_eq!(normalized(-20.0), 0.5);
        assert_eq!(normalized(10.0), 1.0);
    }
}
