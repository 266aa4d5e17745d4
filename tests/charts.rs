// ============================================================================
// CHART REVEAL
// ============================================================================

use cockpit::charts::rcs_polar::{self, RCS_DBSM};
use cockpit::charts::{reveal_radii, ChartKind};
use cockpit::panels::PanelFrame;
use cockpit::scene::DrawCommand;
use cockpit::tween::{Easing, ProgressTween, TweenState};
use cockpit::{Color, Locale};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn frame(width: f64, height: f64) -> PanelFrame {
    PanelFrame {
        width,
        height,
        scale: 1.0,
        accent: Color::new(0x00, 0xe5, 0xff),
        warning: Color::new(0xff, 0x3b, 0x30),
        background: Color::new(0x05, 0x08, 0x0d),
        locale: Locale::En,
        time_s: 0.0,
        sweep_rate_deg_per_s: 90.0,
        selection: None,
    }
}

#[test]
fn half_progress_reveals_exactly_half_of_twelve_points() {
    let targets: Vec<f64> = (1..=12).map(|i| i as f64 * 10.0).collect();
    let radii = reveal_radii(&targets, 0.5);
    let full: Vec<usize> = radii
        .iter()
        .zip(&targets)
        .enumerate()
        .filter(|(_, (r, t))| r == t)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(full, vec![0, 1, 2, 3, 4, 5]);
    assert!(radii[6..].iter().all(|r| *r == 0.0));
}

#[test]
fn rcs_outline_at_half_progress_collapses_later_buckets() {
    assert_eq!(RCS_DBSM.len(), 12);
    let frame = frame(360.0, 382.0);
    let center = frame.content_center();
    let scene = rcs_polar::draw(&frame, 0.5);
    let outline = scene
        .commands()
        .iter()
        .find_map(|command| match command {
            DrawCommand::Polygon { points, .. } if points.len() == RCS_DBSM.len() => {
                Some(points.clone())
            }
            _ => None,
        })
        .expect("outline polygon");
    for (i, p) in outline.iter().enumerate() {
        let dist = ((p.0 - center.0).powi(2) + (p.1 - center.1).powi(2)).sqrt();
        if i < 6 {
            assert!(dist > 1.0, "bucket {i} should be revealed");
        } else {
            assert!(dist < 1e-9, "bucket {i} should still be collapsed");
        }
    }
}

#[test]
fn tween_is_monotonic_and_never_replays() {
    let start = Instant::now();
    let mut tween = ProgressTween::new(Duration::from_millis(1000), Easing::EaseOutCubic);
    assert!(tween.trigger(start));

    let mut previous = tween.value();
    for ms in (0..=1200).step_by(50) {
        tween.advance(start + Duration::from_millis(ms));
        let value = tween.value();
        assert!((0.0..=1.0).contains(&value));
        assert!(value >= previous);
        previous = value;
    }
    assert_eq!(tween.state(), TweenState::Done);
    assert_eq!(tween.value(), 1.0);

    assert!(!tween.trigger(start + Duration::from_secs(5)));
    assert!(!tween.advance(start + Duration::from_secs(6)));
    assert_eq!(tween.value(), 1.0);
}

#[test]
fn every_chart_draws_at_both_ends_of_the_reveal() {
    let frame = frame(400.0, 300.0);
    for kind in ChartKind::ALL {
        for progress in [0.0, 1.0] {
            let scene = kind.draw(&frame, progress);
            assert_eq!(
                scene.commands().first(),
                Some(&DrawCommand::Clear(frame.background))
            );
            assert!(scene.texts().any(|t| t == frame.label(kind.title())));
        }
    }
}
