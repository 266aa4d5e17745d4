// ============================================================================
// PANEL RENDERING
// ============================================================================

use cockpit::panels::{self, PanelFrame, PANELS};
use cockpit::raster::Surface;
use cockpit::telemetry::TelemetrySample;
use cockpit::{Color, Locale};

fn frame(width: f64, height: f64, time_s: f64) -> PanelFrame {
    PanelFrame {
        width,
        height,
        scale: 1.0,
        accent: Color::new(0x00, 0xe5, 0xff),
        warning: Color::new(0xff, 0x3b, 0x30),
        background: Color::new(0x05, 0x08, 0x0d),
        locale: Locale::Tr,
        time_s,
        sweep_rate_deg_per_s: 90.0,
        selection: None,
    }
}

fn render(index: usize, frame: &PanelFrame, sample: &TelemetrySample) -> Surface {
    let mut surface = Surface::new(frame.width as usize, frame.height as usize);
    assert!(panels::paint(&PANELS[index], &mut surface, frame, sample, None));
    surface
}

#[test]
fn frozen_time_renders_are_pixel_identical() {
    let sample = TelemetrySample::default();
    let frame = frame(320.0, 400.0, 2.5);
    for index in 0..PANELS.len() {
        let first = render(index, &frame, &sample);
        let second = render(index, &frame, &sample);
        assert!(
            first == second,
            "panel {index} differs between identical renders"
        );
    }
}

#[test]
fn only_the_sweep_depends_on_time() {
    let sample = TelemetrySample::default();
    let early = frame(320.0, 400.0, 0.0);
    let late = frame(320.0, 400.0, 1.0);
    // Tactical situation display carries the radar sweep.
    assert!(render(1, &early, &sample) != render(1, &late, &sample));
    for index in [0, 2, 3] {
        assert!(render(index, &early, &sample) == render(index, &late, &sample));
    }
}

#[test]
fn panels_react_to_the_sample() {
    let frame = frame(320.0, 400.0, 0.0);
    let sample = TelemetrySample::default();
    let turned = TelemetrySample {
        heading: 90.0,
        ..sample.clone()
    };
    assert!(render(2, &frame, &sample) != render(2, &frame, &turned));
}

#[test]
fn attitude_and_antenna_move_the_tactical_display() {
    let frame = frame(320.0, 400.0, 0.0);
    let sample = TelemetrySample::default();
    let banked = TelemetrySample {
        roll: 40.0,
        ..sample.clone()
    };
    let scanned = TelemetrySample {
        radar_azimuth: 200.0,
        ..sample.clone()
    };
    let level = render(1, &frame, &sample);
    assert!(level != render(1, &frame, &banked));
    assert!(level != render(1, &frame, &scanned));
}

#[test]
fn missing_context_is_a_noop() {
    let frame = frame(0.0, 0.0, 0.0);
    let mut surface = Surface::new(0, 0);
    for descriptor in &PANELS {
        assert!(!panels::paint(
            descriptor,
            &mut surface,
            &frame,
            &TelemetrySample::default(),
            None
        ));
    }
}
