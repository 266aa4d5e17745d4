// ============================================================================
// MOVING MAP PANEL
// ============================================================================
//
// North-up moving map: scrolling lat/lon grid, range rings, ownship symbol
// and the active waypoint.

use super::{chrome, PanelFrame};
use crate::i18n::Key;
use crate::raster::{polar_point, rotate, Align};
use crate::scene::{DrawCommand, Scene};
use crate::telemetry::TelemetrySample;

/// Distance from ownship to the edge of the map, in nautical miles.
pub const MAP_RANGE_NM: f64 = 40.0;
const GRID_STEP_DEG: f64 = 0.1;
const RANGE_RINGS_NM: [f64; 3] = [10.0, 20.0, 40.0];

pub fn draw(frame: &PanelFrame, sample: &TelemetrySample) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::MovingMap);

    let (x, y, w, h) = frame.content();
    let center = frame.content_center();
    let px_per_nm = w.min(h) / 2.0 / MAP_RANGE_NM;

    scene.add_command(DrawCommand::Gradient {
        x,
        y,
        w,
        h,
        top: frame.background,
        bottom: frame.background.mix(frame.accent, 0.08),
    });

    // Grid lines scroll with the fractional part of the position
    let lat_px = 60.0 * px_per_nm;
    let lon_px = 60.0 * sample.latitude.to_radians().cos() * px_per_nm;
    let grid = frame.dim();
    let base_lat = (sample.latitude / GRID_STEP_DEG).floor() * GRID_STEP_DEG;
    let lat_lines = (h / 2.0 / (GRID_STEP_DEG * lat_px)).ceil() as i64 + 1;
    for k in -lat_lines..=lat_lines {
        let line_lat = base_lat + k as f64 * GRID_STEP_DEG;
        let ly = center.1 - (line_lat - sample.latitude) * lat_px;
        if ly >= y && ly <= y + h {
            scene.faint_line((x, ly), (x + w, ly), 1.0, grid, 0.6);
        }
    }
    let base_lon = (sample.longitude / GRID_STEP_DEG).floor() * GRID_STEP_DEG;
    let lon_lines = (w / 2.0 / (GRID_STEP_DEG * lon_px)).ceil() as i64 + 1;
    for k in -lon_lines..=lon_lines {
        let line_lon = base_lon + k as f64 * GRID_STEP_DEG;
        let lx = center.0 + (line_lon - sample.longitude) * lon_px;
        if lx >= x && lx <= x + w {
            scene.faint_line((lx, y), (lx, y + h), 1.0, grid, 0.6);
        }
    }

    for ring in RANGE_RINGS_NM {
        let radius = ring * px_per_nm;
        scene.ring(center, radius, frame.px(1.0), frame.accent, 0.35);
        scene.text(
            polar_point(center, radius - frame.px(8.0), 45.0),
            format!("{ring:.0}"),
            frame.font(10.0),
            Align::Center,
            frame.dim(),
        );
    }

    // Track line and waypoint
    let track_end = polar_point(center, MAP_RANGE_NM * px_per_nm, sample.heading);
    scene.faint_line(center, track_end, frame.px(1.0), frame.accent, 0.5);

    let wpt_nm = sample.waypoint_distance.min(MAP_RANGE_NM);
    let waypoint = polar_point(center, wpt_nm * px_per_nm, sample.course);
    scene.line(center, waypoint, frame.px(1.5), frame.accent);
    let d = frame.px(6.0);
    scene.add_command(DrawCommand::Polygon {
        points: vec![
            (waypoint.0, waypoint.1 - d),
            (waypoint.0 + d, waypoint.1),
            (waypoint.0, waypoint.1 + d),
            (waypoint.0 - d, waypoint.1),
        ],
        color: frame.accent,
        alpha: 1.0,
    });

    // Ownship
    let s = frame.scale;
    let ownship = [(0.0, -10.0), (7.0, 8.0), (0.0, 4.0), (-7.0, 8.0)]
        .iter()
        .map(|&(px, py)| {
            let (rx, ry) = rotate((px * s, py * s), sample.heading);
            (center.0 + rx, center.1 + ry)
        })
        .collect();
    scene.add_command(DrawCommand::Polygon {
        points: ownship,
        color: frame.accent,
        alpha: 1.0,
    });

    // Readouts
    let small = frame.font(11.0);
    scene.text(
        (x + frame.px(8.0), y + h - frame.px(24.0)),
        format_coordinate(sample.latitude, 'N', 'S'),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (x + frame.px(8.0), y + h - frame.px(10.0)),
        format_coordinate(sample.longitude, 'E', 'W'),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (x + w - frame.px(8.0), y + frame.px(12.0)),
        format!(
            "{} {:.1} NM  {} {:03.0}",
            frame.label(Key::Waypoint),
            sample.waypoint_distance,
            frame.label(Key::Course),
            sample.course
        ),
        small,
        Align::Right,
        frame.accent,
    );

    scene
}

/// Degrees and decimal minutes, e.g. `N39°55.80'`.
pub fn format_coordinate(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value >= 0.0 { positive } else { negative };
    let abs = value.abs();
    let mut degrees = abs.trunc();
    let mut minutes = ((abs - degrees) * 60.0 * 100.0).round() / 100.0;
    if minutes >= 60.0 {
        degrees += 1.0;
        minutes -= 60.0;
    }
    format!("{hemisphere}{degrees:.0}°{minutes:05.2}'")
}
