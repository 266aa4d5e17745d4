// ============================================================================
// HORIZONTAL SITUATION INDICATOR
// ============================================================================
//
// Horizontal situation indicator: compass rose rotated under a fixed lubber
// line, course pointer and bearing pointer to the target.

use super::{chrome, PanelFrame};
use crate::i18n::Key;
use crate::raster::{polar_point, Align};
use crate::scene::{DrawCommand, Scene};
use crate::telemetry::{wrap_degrees, TelemetrySample};

/// Rose label for a bearing that is a multiple of 30°.
pub fn rose_label(bearing: u32) -> String {
    match bearing % 360 {
        0 => "N".to_string(),
        90 => "E".to_string(),
        180 => "S".to_string(),
        270 => "W".to_string(),
        other => (other / 10).to_string(),
    }
}

/// Screen angle at which `bearing` appears when flying `heading`.
pub fn screen_angle(bearing: f64, heading: f64) -> f64 {
    wrap_degrees(bearing - heading)
}

pub fn draw(frame: &PanelFrame, sample: &TelemetrySample) -> Scene {
    let mut scene = Scene::new();
    chrome(&mut scene, frame, Key::Hsi);

    let center = frame.content_center();
    let (_, y, w, h) = frame.content();
    let radius = (w.min(h) / 2.0 - frame.px(18.0)).max(1.0);

    scene.ring(center, radius, frame.px(2.0), frame.accent, 0.8);

    for bearing in (0..360).step_by(5) {
        let angle = screen_angle(bearing as f64, sample.heading);
        let length = if bearing % 10 == 0 { 14.0 } else { 7.0 };
        scene.line(
            polar_point(center, radius - frame.px(length), angle),
            polar_point(center, radius, angle),
            frame.px(if bearing % 30 == 0 { 2.0 } else { 1.0 }),
            frame.accent,
        );
        if bearing % 30 == 0 {
            scene.text(
                polar_point(center, radius - frame.px(26.0), angle),
                rose_label(bearing),
                frame.font(if bearing % 90 == 0 { 14.0 } else { 11.0 }),
                Align::Center,
                frame.accent,
            );
        }
    }

    // Course pointer
    let course = screen_angle(sample.course, sample.heading);
    scene.add_command(DrawCommand::Needle {
        from: polar_point(center, radius * 0.7, course + 180.0),
        to: polar_point(center, radius * 0.8, course),
        thickness: frame.px(4.0) as f32,
        color: frame.accent,
    });

    // Bearing pointer to target
    let bearing = screen_angle(sample.target_bearing, sample.heading);
    let tip = polar_point(center, radius * 0.9, bearing);
    scene.faint_line(
        polar_point(center, radius * 0.9, bearing + 180.0),
        tip,
        frame.px(1.5),
        frame.warning,
        0.9,
    );
    scene.add_command(DrawCommand::Circle {
        center: tip,
        radius: frame.px(4.0),
        color: frame.warning,
        alpha: 1.0,
    });

    // Lubber line and ownship
    scene.line(
        (center.0, center.1 - radius - frame.px(4.0)),
        (center.0, center.1 - radius + frame.px(16.0)),
        frame.px(3.0),
        frame.warning,
    );
    let s = frame.scale;
    scene.line(
        (center.0, center.1 - 12.0 * s),
        (center.0, center.1 + 12.0 * s),
        frame.px(2.0),
        frame.accent,
    );
    scene.line(
        (center.0 - 10.0 * s, center.1 - 2.0 * s),
        (center.0 + 10.0 * s, center.1 - 2.0 * s),
        frame.px(2.0),
        frame.accent,
    );
    scene.line(
        (center.0 - 5.0 * s, center.1 + 10.0 * s),
        (center.0 + 5.0 * s, center.1 + 10.0 * s),
        frame.px(2.0),
        frame.accent,
    );

    // Heading readout box
    let box_w = frame.px(48.0);
    let box_h = frame.px(18.0);
    let box_y = y + frame.px(2.0);
    scene.add_command(DrawCommand::Rect {
        x: center.0 - box_w / 2.0,
        y: box_y,
        w: box_w,
        h: box_h,
        color: frame.background,
        alpha: 1.0,
    });
    scene.add_command(DrawCommand::Polyline {
        points: vec![
            (center.0 - box_w / 2.0, box_y),
            (center.0 + box_w / 2.0, box_y),
            (center.0 + box_w / 2.0, box_y + box_h),
            (center.0 - box_w / 2.0, box_y + box_h),
        ],
        closed: true,
        thickness: 1.0,
        color: frame.accent,
        alpha: 1.0,
    });
    scene.text(
        (center.0, box_y + box_h / 2.0),
        format!("{:03.0}", heading_readout(sample.heading)),
        frame.font(13.0),
        Align::Center,
        frame.accent,
    );

    let small = frame.font(11.0);
    scene.text(
        (frame.px(8.0), y + h - frame.px(10.0)),
        format!("{} {:03.0}", frame.label(Key::Course), sample.course),
        small,
        Align::Left,
        frame.accent,
    );
    scene.text(
        (w - frame.px(8.0), y + h - frame.px(10.0)),
        format!("{} {:03.0}", frame.label(Key::Bearing), sample.target_bearing),
        small,
        Align::Right,
        frame.warning,
    );

    // Air data columns either side of the heading box
    let (left, right) = air_data(frame, sample);
    for (row, (l, r)) in left.into_iter().zip(right).enumerate() {
        let line_y = y + frame.px(12.0 + 14.0 * row as f64);
        scene.text((frame.px(8.0), line_y), l, small, Align::Left, frame.accent);
        scene.text((w - frame.px(8.0), line_y), r, small, Align::Right, frame.accent);
    }

    scene
}

/// Speed and Mach on the left, altitude and vertical speed on the right.
pub fn air_data(frame: &PanelFrame, sample: &TelemetrySample) -> ([String; 2], [String; 2]) {
    (
        [
            format!("{} {:.0}", frame.label(Key::Speed), sample.airspeed),
            format!("{} {:.2}", frame.label(Key::Mach), sample.mach),
        ],
        [
            format!("{} {:.0}", frame.label(Key::Altitude), sample.altitude),
            format!("{} {:+.0}", frame.label(Key::VerticalSpeed), sample.vertical_speed),
        ],
    )
}

/// Rounded heading for display; 359.6 reads as 000, never 360.
pub fn heading_readout(heading: f64) -> f64 {
    let rounded = heading.round();
    if rounded >= 360.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_frame;

    #[test]
    fn labels_cardinal_points() {
        assert_eq!(rose_label(0), "N");
        assert_eq!(rose_label(90), "E");
        assert_eq!(rose_label(30), "3");
        assert_eq!(rose_label(330), "33");
    }

    #[test]
    fn rose_rotates_against_heading() {
        assert_eq!(screen_angle(274.0, 274.0), 0.0);
        assert_eq!(screen_angle(0.0, 270.0), 90.0);
    }

    #[test]
    fn readout_never_shows_360() {
        assert_eq!(heading_readout(359.6), 0.0);
        assert_eq!(heading_readout(273.6), 274.0);
    }

    #[test]
    fn heading_box_text_follows_sample() {
        let frame = test_frame(300.0, 300.0);
        let sample = TelemetrySample {
            heading: 5.2,
            ..TelemetrySample::default()
        };
        let scene = draw(&frame, &sample);
        assert!(scene.texts().any(|t| t == "005"));
    }

    #[test]
    fn air_data_follows_sample() {
        let frame = test_frame(300.0, 300.0);
        let sample = TelemetrySample::default();
        let climbing = TelemetrySample {
            altitude: 36_250.0,
            vertical_speed: 1_500.0,
            mach: 1.35,
            ..sample.clone()
        };
        let before = draw(&frame, &sample);
        assert!(before.texts().any(|t| t == "ALT 35000"));
        assert!(before.texts().any(|t| t == "SPD 480"));
        assert!(before.texts().any(|t| t == "MACH 1.20"));
        let after = draw(&frame, &climbing);
        assert!(after.texts().any(|t| t == "ALT 36250"));
        assert!(after.texts().any(|t| t == "VS +1500"));
        assert!(after.texts().any(|t| t == "MACH 1.35"));
        assert!(!after.texts().any(|t| t == "ALT 35000"));
    }
}
