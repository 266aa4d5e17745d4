// ============================================================================
// CHARTS
// ============================================================================
//
// Charts are painted only when their progress scalar moves or the user
// changes the highlighted element; they share PanelFrame with the live
// panels for size, colours and locale.

pub mod capability;
pub mod flight_envelope;
pub mod rcs_polar;

use crate::i18n::Key;
use crate::panels::PanelFrame;
use crate::raster::{Point, Surface};
use crate::scene::{Scene, Typeface};

/// Scale applied to vertex `index` of `count` at `progress`.
///
/// With `k = floor(count * progress)`, vertices `0..k` are at full scale,
/// vertex `k` grows with the fractional remainder and later ones are still
/// collapsed at the origin.
pub fn reveal_scale(index: usize, count: usize, progress: f64) -> f64 {
    let scaled = count as f64 * progress.clamp(0.0, 1.0);
    let full = scaled.floor() as usize;
    if index < full {
        1.0
    } else if index == full {
        scaled - full as f64
    } else {
        0.0
    }
}

pub fn reveal_radii(targets: &[f64], progress: f64) -> Vec<f64> {
    targets
        .iter()
        .enumerate()
        .map(|(i, r)| r * reveal_scale(i, targets.len(), progress))
        .collect()
}

/// Prefix of `points` drawn so far: the first `floor(n * progress)` vertices
/// plus an interpolated tip heading for the next one.
pub fn reveal_path(points: &[Point], progress: f64) -> Vec<Point> {
    let scaled = points.len() as f64 * progress.clamp(0.0, 1.0);
    let full = (scaled.floor() as usize).min(points.len());
    let mut path: Vec<Point> = points[..full].to_vec();
    if full > 0 && full < points.len() {
        let frac = scaled - full as f64;
        let (a, b) = (points[full - 1], points[full]);
        if frac > 0.0 {
            path.push((a.0 + (b.0 - a.0) * frac, a.1 + (b.1 - a.1) * frac));
        }
    }
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    FlightEnvelope,
    RcsPolar,
    Capability,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::FlightEnvelope,
        ChartKind::RcsPolar,
        ChartKind::Capability,
    ];

    pub fn title(self) -> Key {
        match self {
            ChartKind::FlightEnvelope => Key::FlightEnvelope,
            ChartKind::RcsPolar => Key::RcsPolar,
            ChartKind::Capability => Key::Capability,
        }
    }

    pub fn draw(self, frame: &PanelFrame, progress: f64) -> Scene {
        match self {
            ChartKind::FlightEnvelope => flight_envelope::draw(frame, progress),
            ChartKind::RcsPolar => rcs_polar::draw(frame, progress),
            ChartKind::Capability => capability::draw(frame, progress),
        }
    }

    /// Element under `local` (chart pixel coordinates), if any.
    pub fn hit_test(self, frame: &PanelFrame, local: Point) -> Option<usize> {
        match self {
            ChartKind::FlightEnvelope => flight_envelope::closest_point(frame, local),
            ChartKind::RcsPolar => rcs_polar::closest_bucket(frame, local),
            ChartKind::Capability => capability::closest_axis(frame, local),
        }
    }
}

/// Paints a chart into `surface`; `false` when there is no drawing context.
pub fn paint(
    kind: ChartKind,
    surface: &mut Surface,
    frame: &PanelFrame,
    progress: f64,
    typeface: Option<&Typeface>,
) -> bool {
    let Some(mut canvas) = surface.canvas() else {
        return false;
    };
    kind.draw(frame, progress).render(&mut canvas, typeface);
    true
}
