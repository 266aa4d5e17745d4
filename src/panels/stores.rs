// ============================================================================
// STORES PANEL
// ============================================================================
//
// Stores and engine status: planform with weapon stations, fuel bar and
// twin engine dials.

use super::{chrome, PanelFrame};
use crate::config::Color;
use crate::i18n::Key;
use crate::raster::{Align, Point};
use crate::scene::{DrawCommand, Scene};
use crate::telemetry::TelemetrySample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub id: &'static str,
    pub store: &'static str,
    /// Position on the planform, x across the span and y along the fuselage,
    /// both in [-1, 1] with the nose at y = -1.
    pub position: Point,
    pub internal: bool,
}

pub const STATIONS: [Station; 8] = [
    Station { id: "1", store: "AIM-9X", position: (-0.90, 0.42), internal: false },
    Station { id: "2", store: "GBU-39", position: (-0.55, 0.30), internal: false },
    Station { id: "3", store: "AIM-120C", position: (-0.20, 0.05), internal: true },
    Station { id: "4", store: "AIM-120C", position: (-0.08, 0.25), internal: true },
    Station { id: "5", store: "AIM-120C", position: (0.08, 0.25), internal: true },
    Station { id: "6", store: "AIM-120C", position: (0.20, 0.05), internal: true },
    Station { id: "7", store: "GBU-39", position: (0.55, 0.30), internal: false },
    Station { id: "8", store: "AIM-9X", position: (0.90, 0.42), internal: false },
];

const PLANFORM: [Point; 13] = [
    (0.0, -1.0),
    (0.12, -0.55),
    (0.16, -0.05),
    (1.0, 0.50),
    (1.0, 0.62),
    (0.20, 0.62),
    (0.42, 0.95),
    (0.10, 0.95),
    (-0.10, 0.95),
    (-0.42, 0.95),
    (-0.20, 0.62),
    (-1.0, 0.62),
    (-1.0, 0.50),
];

pub const LOW_FUEL: f64 = 20.0;
pub const RPM_LIMIT: f64 = 102.0;
pub const EGT_LIMIT: f64 = 880.0;
const HIT_RADIUS: f64 = 18.0;

/// Centre and half extents of the planform inside the panel.
fn planform_box(frame: &PanelFrame) -> (Point, f64, f64) {
    let (x, y, w, h) = frame.content();
    let area_w = w * 0.62;
    let half = (area_w.min(h) / 2.0 - frame.px(16.0)).max(1.0);
    ((x + area_w / 2.0, y + h / 2.0), half, half)
}

pub fn station_point(frame: &PanelFrame, station: &Station) -> Point {
    let (center, half_span, half_length) = planform_box(frame);
    (
        center.0 + station.position.0 * half_span,
        center.1 + station.position.1 * half_length,
    )
}

/// Index of the station nearest to `local` (panel pixel coordinates), if
/// it lies within the hit radius.
pub fn closest_station(frame: &PanelFrame, local: Point) -> Option<usize> {
    let limit = frame.px(HIT_RADIUS);
    STATIONS
        .iter()
        .enumerate()
        .map(|(i, station)| {
            let p = station_point(frame, station);
            (i, ((p.0 - local.0).powi(2) + (p.1 - local.1).powi(2)).sqrt())
        })
        .filter(|&(_, dist)| dist <= limit)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

pub fn draw(frame: &PanelFrame, sample: &TelemetrySample) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::Stores);

    let (center, half_span, half_length) = planform_box(frame);
    let outline: Vec<Point> = PLANFORM
        .iter()
        .map(|p| (center.0 + p.0 * half_span, center.1 + p.1 * half_length))
        .collect();
    scene.add_command(DrawCommand::Polygon {
        points: outline.clone(),
        color: frame.accent,
        alpha: 0.12,
    });
    scene.add_command(DrawCommand::Polyline {
        points: outline,
        closed: true,
        thickness: frame.px(1.5) as f32,
        color: frame.accent,
        alpha: 1.0,
    });

    for (i, station) in STATIONS.iter().enumerate() {
        let p = station_point(frame, station);
        let selected = frame.selection == Some(i);
        let size = frame.px(if selected { 7.0 } else { 5.0 });
        if station.internal {
            scene.add_command(DrawCommand::Rect {
                x: p.0 - size,
                y: p.1 - size,
                w: size * 2.0,
                h: size * 2.0,
                color: frame.accent,
                alpha: 0.9,
            });
        } else {
            scene.add_command(DrawCommand::Circle {
                center: p,
                radius: size,
                color: frame.accent,
                alpha: 0.9,
            });
        }
        if selected {
            scene.ring(p, size + frame.px(5.0), frame.px(2.0), frame.warning, 1.0);
        }
        scene.text(
            (p.0, p.1 + size + frame.px(8.0)),
            station.id,
            frame.font(9.0),
            Align::Center,
            frame.dim(),
        );
    }

    let (x, y, w, h) = frame.content();
    if let Some(station) = frame.selection.and_then(|i| STATIONS.get(i)) {
        scene.text(
            (x + frame.px(8.0), y + h - frame.px(10.0)),
            format!("{} {} {}", frame.label(Key::Selected), station.id, station.store),
            frame.font(11.0),
            Align::Left,
            frame.warning,
        );
    }

    // Fuel bar
    let fuel_color = if sample.fuel < LOW_FUEL { frame.warning } else { frame.accent };
    let bar_x = x + w * 0.66;
    let bar_w = frame.px(16.0);
    let bar_top = y + frame.px(20.0);
    let bar_h = (h - frame.px(48.0)).max(0.0);
    scene.add_command(DrawCommand::Rect {
        x: bar_x,
        y: bar_top,
        w: bar_w,
        h: bar_h,
        color: frame.dim(),
        alpha: 0.4,
    });
    let filled = bar_h * (sample.fuel / 100.0).clamp(0.0, 1.0);
    scene.add_command(DrawCommand::Gradient {
        x: bar_x,
        y: bar_top + bar_h - filled,
        w: bar_w,
        h: filled,
        top: fuel_color,
        bottom: fuel_color.scale(0.45),
    });
    scene.text(
        (bar_x + bar_w / 2.0, bar_top - frame.px(10.0)),
        frame.label(Key::Fuel),
        frame.font(10.0),
        Align::Center,
        fuel_color,
    );
    scene.text(
        (bar_x + bar_w / 2.0, bar_top + bar_h + frame.px(12.0)),
        format!("{:.0}%", sample.fuel),
        frame.font(11.0),
        Align::Center,
        fuel_color,
    );

    // Engine dials
    let dial_x = x + w * 0.86;
    let dial_r = (w * 0.1).min(h * 0.18).max(frame.px(8.0));
    let engines = [
        ("L", sample.rpm_left, sample.egt_left, y + h * 0.3),
        ("R", sample.rpm_right, sample.egt_right, y + h * 0.72),
    ];
    for (side, rpm, egt, dial_y) in engines {
        let limit = rpm > RPM_LIMIT || egt > EGT_LIMIT;
        let color = if limit { frame.warning } else { frame.accent };
        add_engine_dial(&mut scene, frame, (dial_x, dial_y), dial_r, rpm, color);
        scene.text(
            (dial_x, dial_y - frame.px(2.0)),
            format!("{} {side}", frame.label(Key::Engine)),
            frame.font(9.0),
            Align::Center,
            color,
        );
        scene.text(
            (dial_x, dial_y + dial_r * 0.55),
            format!("{rpm:.0}%"),
            frame.font(10.0),
            Align::Center,
            color,
        );
        scene.text(
            (dial_x, dial_y + dial_r + frame.px(10.0)),
            format!("{} {egt:.0}", frame.label(Key::Egt)),
            frame.font(9.0),
            Align::Center,
            color,
        );
    }

    scene
}

/// RPM dial covering 0–110 % over a 270° arc open at the bottom.
fn add_engine_dial(scene: &mut Scene, frame: &PanelFrame, center: Point, radius: f64, rpm: f64, color: Color) {
    let start_angle = std::f64::consts::PI * 0.75;
    let arc_span = std::f64::consts::PI * 1.5;
    scene.add_command(DrawCommand::Arc {
        center,
        radius,
        thickness: frame.px(2.0),
        start_angle,
        arc_span,
        color,
    });
    let pos = (rpm / 110.0).clamp(0.0, 1.0);
    let angle = start_angle + arc_span * pos;
    let tip = (
        center.0 + angle.cos() * radius * 0.9,
        center.1 + angle.sin() * radius * 0.9,
    );
    scene.add_command(DrawCommand::Needle {
        from: center,
        to: tip,
        thickness: frame.px(3.0) as f32,
        color,
    });
    scene.add_command(DrawCommand::Circle {
        center,
        radius: frame.px(2.5),
        color,
        alpha: 1.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_frame;

    #[test]
    fn clicking_on_a_station_selects_it() {
        let frame = test_frame(400.0, 300.0);
        for (i, station) in STATIONS.iter().enumerate() {
            let p = station_point(&frame, station);
            assert_eq!(closest_station(&frame, (p.0 + 2.0, p.1 - 1.0)), Some(i));
        }
    }

    #[test]
    fn clicking_empty_space_selects_nothing() {
        let frame = test_frame(400.0, 300.0);
        assert_eq!(closest_station(&frame, (395.0, 40.0)), None);
    }

    #[test]
    fn low_fuel_turns_warning() {
        let frame = test_frame(400.0, 300.0);
        let sample = TelemetrySample {
            fuel: 12.0,
            ..TelemetrySample::default()
        };
        let scene = draw(&frame, &sample);
        let gradient_top = scene.commands().iter().find_map(|c| match c {
            DrawCommand::Gradient { top, .. } if *top != frame.background => Some(*top),
            _ => None,
        });
        assert_eq!(gradient_top, Some(frame.warning));
    }

    #[test]
    fn selection_is_labelled() {
        let frame = PanelFrame {
            selection: Some(2),
            ..test_frame(400.0, 300.0)
        };
        let scene = draw(&frame, &TelemetrySample::default());
        assert!(scene.texts().any(|t| t == "SELECTED 3 AIM-120C"));
    }
}
