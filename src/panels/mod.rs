// ============================================================================
// COCKPIT PANELS
// ============================================================================
//
// Each panel is a plain draw function that turns the current telemetry
// sample into a Scene; the host replays that scene onto the panel's
// surface every frame.

pub mod hsi;
pub mod moving_map;
pub mod stores;
pub mod tactical;

use crate::config::Color;
use crate::i18n::{self, Key, Locale};
use crate::raster::{Align, Point, Surface};
use crate::scene::{DrawCommand, Scene, Typeface};
use crate::telemetry::TelemetrySample;

/// Height of the title strip in logical pixels.
pub const TITLE_STRIP: f64 = 22.0;

/// Everything a panel needs besides the telemetry sample
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    /// Backing-buffer size in physical pixels.
    pub width: f64,
    pub height: f64,
    /// Device pixel ratio; logical sizes are multiplied by it.
    pub scale: f64,
    pub accent: Color,
    pub warning: Color,
    pub background: Color,
    pub locale: Locale,
    /// Seconds since the display started. Only cosmetic animation reads it.
    pub time_s: f64,
    pub sweep_rate_deg_per_s: f64,
    /// Panel-specific selection (the Stores panel's weapon station).
    pub selection: Option<usize>,
}

impl PanelFrame {
    pub fn px(&self, logical: f64) -> f64 {
        logical * self.scale
    }

    pub fn font(&self, logical: f32) -> f32 {
        logical * self.scale as f32
    }

    pub fn label(&self, key: Key) -> &'static str {
        i18n::text(self.locale, key)
    }

    /// Drawing area below the title strip: (x, y, w, h).
    pub fn content(&self) -> (f64, f64, f64, f64) {
        let top = self.px(TITLE_STRIP);
        (0.0, top, self.width, (self.height - top).max(0.0))
    }

    pub fn content_center(&self) -> Point {
        let (x, y, w, h) = self.content();
        (x + w / 2.0, y + h / 2.0)
    }

    pub fn dim(&self) -> Color {
        self.background.mix(self.accent, 0.35)
    }
}

pub type DrawFn = fn(&PanelFrame, &TelemetrySample) -> Scene;

#[derive(Debug, Clone, Copy)]
pub struct PanelDescriptor {
    pub label: Key,
    pub draw: DrawFn,
    pub index: usize,
}

pub const PANELS: [PanelDescriptor; 4] = [
    PanelDescriptor {
        label: Key::MovingMap,
        draw: moving_map::draw,
        index: 0,
    },
    PanelDescriptor {
        label: Key::TacticalSituation,
        draw: tactical::draw,
        index: 1,
    },
    PanelDescriptor {
        label: Key::Hsi,
        draw: hsi::draw,
        index: 2,
    },
    PanelDescriptor {
        label: Key::Stores,
        draw: stores::draw,
        index: 3,
    },
];

pub const STORES_PANEL: usize = 3;

/// Clear, border and title strip shared by every panel.
pub fn chrome(scene: &mut Scene, frame: &PanelFrame, title: Key) {
    scene.add_command(DrawCommand::Clear(frame.background));
    let strip = frame.px(TITLE_STRIP);
    scene.add_command(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        w: frame.width,
        h: strip,
        color: frame.accent,
        alpha: 0.15,
    });
    scene.add_command(DrawCommand::Polyline {
        points: vec![
            (0.5, 0.5),
            (frame.width - 0.5, 0.5),
            (frame.width - 0.5, frame.height - 0.5),
            (0.5, frame.height - 0.5),
        ],
        closed: true,
        thickness: 1.0,
        color: frame.dim(),
        alpha: 1.0,
    });
    scene.text(
        (frame.px(8.0), strip / 2.0),
        frame.label(title),
        frame.font(12.0),
        Align::Left,
        frame.accent,
    );
}

/// Paints one panel into `surface`. Returns `false` when the surface has no
/// drawing context and the frame was skipped.
pub fn paint(
    descriptor: &PanelDescriptor,
    surface: &mut Surface,
    frame: &PanelFrame,
    sample: &TelemetrySample,
    typeface: Option<&Typeface>,
) -> bool {
    let Some(mut canvas) = surface.canvas() else {
        return false;
    };
    let scene = (descriptor.draw)(frame, sample);
    scene.render(&mut canvas, typeface);
    true
}

#[cfg(test)]
pub(crate) fn test_frame(width: f64, height: f64) -> PanelFrame {
    PanelFrame {
        width,
        height,
        scale: 1.0,
        accent: Color::new(0x00, 0xe5, 0xff),
        warning: Color::new(0xff, 0x3b, 0x30),
        background: Color::new(0x05, 0x08, 0x0d),
        locale: Locale::En,
        time_s: 1.25,
        sweep_rate_deg_per_s: 90.0,
        selection: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_indexed_in_order() {
        for (i, descriptor) in PANELS.iter().enumerate() {
            assert_eq!(descriptor.index, i);
        }
        assert_eq!(PANELS[STORES_PANEL].label, Key::Stores);
    }

    #[test]
    fn every_panel_starts_with_clear_and_title() {
        let frame = test_frame(320.0, 240.0);
        let sample = TelemetrySample::default();
        for descriptor in &PANELS {
            let scene = (descriptor.draw)(&frame, &sample);
            assert_eq!(
                scene.commands().first(),
                Some(&DrawCommand::Clear(frame.background))
            );
            assert!(scene.texts().any(|t| t == frame.label(descriptor.label)));
        }
    }

    #[test]
    fn paint_skips_empty_surface() {
        let frame = test_frame(0.0, 0.0);
        let mut surface = Surface::new(0, 0);
        let painted = paint(&PANELS[0], &mut surface, &frame, &TelemetrySample::default(), None);
        assert!(!painted);
    }
}
