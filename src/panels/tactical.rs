// ============================================================================
// TACTICAL SITUATION PANEL
// ============================================================================
//
// Tactical situation display: heading-up radar scope with a rotating sweep
// and the tracked target.

use super::{chrome, PanelFrame};
use crate::i18n::Key;
use crate::raster::{polar_point, Align, Point};
use crate::scene::{DrawCommand, Scene};
use crate::telemetry::{wrap_degrees, TelemetrySample};

pub const SCOPE_RANGE_NM: f64 = 80.0;
/// Targets closer than this are drawn in the warning colour.
pub const THREAT_RANGE_NM: f64 = 20.0;
const TRAIL_STEPS: usize = 12;
const TRAIL_SPAN_DEG: f64 = 36.0;
/// Horizon displacement per degree of pitch, as a fraction of the ball radius.
const PITCH_GAIN: f64 = 0.04;

/// Sweep angle at `time_s`. The only time-dependent term on this panel.
pub fn sweep_angle(time_s: f64, rate_deg_per_s: f64) -> f64 {
    wrap_degrees(time_s * rate_deg_per_s)
}

/// Triangle on the scope edge pointing inward at the radar antenna azimuth.
pub fn antenna_marker(center: Point, radius: f64, azimuth: f64, size: f64) -> Vec<Point> {
    vec![
        polar_point(center, radius - size, azimuth),
        polar_point(center, radius + size * 0.4, azimuth - 4.0),
        polar_point(center, radius + size * 0.4, azimuth + 4.0),
    ]
}

/// Ends of the artificial horizon inside a ball of `radius`. Positive pitch
/// lowers the line and positive roll banks it anticlockwise.
pub fn horizon(center: Point, radius: f64, pitch: f64, roll: f64) -> (Point, Point) {
    let offset = (pitch * PITCH_GAIN * radius).clamp(-radius * 0.8, radius * 0.8);
    let mid = polar_point(center, offset, 180.0 - roll);
    (
        polar_point(mid, radius, 270.0 - roll),
        polar_point(mid, radius, 90.0 - roll),
    )
}

pub fn draw(frame: &PanelFrame, sample: &TelemetrySample) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::TacticalSituation);

    let center = frame.content_center();
    let (_, _, w, h) = frame.content();
    let radius = (w.min(h) / 2.0 - frame.px(14.0)).max(1.0);

    for i in 1..=4 {
        let r = radius * i as f64 / 4.0;
        scene.ring(center, r, frame.px(1.0), frame.accent, 0.3);
        scene.text(
            polar_point(center, r, 180.0 + 8.0),
            format!("{:.0}", SCOPE_RANGE_NM * i as f64 / 4.0),
            frame.font(9.0),
            Align::Left,
            frame.dim(),
        );
    }
    for azimuth in (0..360).step_by(30) {
        let azimuth = azimuth as f64;
        scene.faint_line(
            polar_point(center, radius * 0.95, azimuth),
            polar_point(center, radius, azimuth),
            frame.px(1.0),
            frame.accent,
            0.6,
        );
    }

    // Sweep and fading trail
    let sweep = sweep_angle(frame.time_s, frame.sweep_rate_deg_per_s);
    for step in (1..=TRAIL_STEPS).rev() {
        let lag = TRAIL_SPAN_DEG * step as f64 / TRAIL_STEPS as f64;
        let alpha = 0.35 * (1.0 - step as f32 / (TRAIL_STEPS as f32 + 1.0));
        scene.faint_line(
            center,
            polar_point(center, radius, sweep - lag),
            frame.px(2.0),
            frame.accent,
            alpha,
        );
    }
    scene.line(center, polar_point(center, radius, sweep), frame.px(2.0), frame.accent);

    // Target, heading-up
    let relative = wrap_degrees(sample.target_bearing - sample.heading);
    let range = sample.target_range.min(SCOPE_RANGE_NM);
    let blip = polar_point(center, radius * range / SCOPE_RANGE_NM, relative);
    let threat = sample.target_range < THREAT_RANGE_NM;
    let blip_color = if threat { frame.warning } else { frame.accent };
    scene.add_command(DrawCommand::Circle {
        center: blip,
        radius: frame.px(5.0),
        color: blip_color,
        alpha: 1.0,
    });
    scene.ring(blip, frame.px(9.0), frame.px(1.0), blip_color, 0.7);

    // Ownship marker
    let s = frame.px(6.0);
    scene.add_command(DrawCommand::Polygon {
        points: vec![
            (center.0, center.1 - s),
            (center.0 + s * 0.7, center.1 + s),
            (center.0 - s * 0.7, center.1 + s),
        ],
        color: frame.accent,
        alpha: 1.0,
    });

    // Antenna position
    scene.add_command(DrawCommand::Polygon {
        points: antenna_marker(center, radius, sample.radar_azimuth, frame.px(7.0)),
        color: frame.accent,
        alpha: 0.9,
    });

    let (x, y, w, h) = frame.content();

    // Attitude ball
    let ball = (x + w - frame.px(28.0), y + frame.px(30.0));
    let ball_r = frame.px(18.0);
    scene.ring(ball, ball_r, frame.px(1.0), frame.accent, 0.8);
    let (left, right) = horizon(ball, ball_r, sample.pitch, sample.roll);
    scene.line(left, right, frame.px(2.0), frame.accent);
    scene.line(
        (ball.0 - ball_r * 0.4, ball.1),
        (ball.0 + ball_r * 0.4, ball.1),
        frame.px(1.5),
        frame.warning,
    );

    let small = frame.font(11.0);
    scene.text(
        (x + frame.px(8.0), y + h - frame.px(24.0)),
        format!(
            "{} {:.1}  {} {:.1}",
            frame.label(Key::GLoad),
            sample.g_load,
            frame.label(Key::AngleOfAttack),
            sample.aoa
        ),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (x + frame.px(8.0), y + h - frame.px(10.0)),
        format!(
            "{} {:+.1}  {} {:+.1}",
            frame.label(Key::Pitch),
            sample.pitch,
            frame.label(Key::Roll),
            sample.roll
        ),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (x + frame.px(8.0), y + frame.px(26.0)),
        format!("{} {:03.0}", frame.label(Key::Azimuth), sample.radar_azimuth),
        small,
        Align::Left,
        frame.dim(),
    );
    scene.text(
        (x + frame.px(8.0), y + frame.px(12.0)),
        format!("{} {:03.0}", frame.label(Key::Heading), sample.heading),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (x + w - frame.px(8.0), y + h - frame.px(24.0)),
        format!("{} {} {:03.0}", frame.label(Key::Target), frame.label(Key::Bearing), sample.target_bearing),
        small,
        Align::Right,
        blip_color,
    );
    scene.text(
        (x + w - frame.px(8.0), y + h - frame.px(10.0)),
        format!("{} {:.1} NM", frame.label(Key::Range), sample.target_range),
        small,
        Align::Right,
        blip_color,
    );

    scene
}
