// ============================================================================
// DISPLAY STATE
// ============================================================================

use crate::charts::{self, ChartKind};
use crate::config::DisplayConfig;
use crate::i18n::Locale;
use crate::layout::{Hit, Page, PanelGrid, Rect};
use crate::panels::{self, stores, PanelFrame, PANELS, STORES_PANEL, TITLE_STRIP};
use crate::raster::{Canvas, Point, Surface};
use crate::scene::Typeface;
use crate::telemetry::{TelemetryGenerator, TelemetrySample, Ticker};
use crate::tween::{Easing, ProgressTween};
use std::time::Instant;

/// Cached surface of one chart plus the inputs it was last painted with.
#[derive(Debug)]
struct ChartSlot {
    kind: ChartKind,
    tween: ProgressTween,
    selection: Option<usize>,
    surface: Surface,
    dirty: bool,
}

/// Everything that changes while the display runs: telemetry, layout,
/// selections, animation progress and the per-element surfaces.
#[derive(Debug)]
pub struct DisplayState {
    config: DisplayConfig,
    generator: TelemetryGenerator,
    ticker: Ticker,
    started: Instant,
    time_s: f64,
    locale: Locale,
    scale: f64,
    grid: PanelGrid,
    page: Page,
    station: Option<usize>,
    panel_surfaces: Vec<Surface>,
    charts: Vec<ChartSlot>,
}

impl DisplayState {
    pub fn new(config: DisplayConfig, now: Instant) -> Self {
        let generator = TelemetryGenerator::new(config.seed);
        let ticker = Ticker::new(config.telemetry_interval(), now);
        let charts = ChartKind::ALL
            .into_iter()
            .map(|kind| ChartSlot {
                kind,
                tween: ProgressTween::new(config.reveal_duration(), Easing::EaseOutCubic),
                selection: None,
                surface: Surface::new(0, 0),
                dirty: true,
            })
            .collect();
        Self {
            locale: config.locale,
            generator,
            ticker,
            started: now,
            time_s: 0.0,
            scale: 1.0,
            grid: PanelGrid::default(),
            page: Page::new(0.0, 0.0, 1.0),
            station: None,
            panel_surfaces: (0..PANELS.len()).map(|_| Surface::new(0, 0)).collect(),
            charts,
            config,
        }
    }

    pub fn sample(&self) -> &TelemetrySample {
        self.generator.sample()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn station(&self) -> Option<usize> {
        self.station
    }

    pub fn chart_progress(&self, kind: ChartKind) -> f64 {
        self.slot(kind).map_or(0.0, |slot| slot.tween.value())
    }

    pub fn chart_selection(&self, kind: ChartKind) -> Option<usize> {
        self.slot(kind).and_then(|slot| slot.selection)
    }

    fn slot(&self, kind: ChartKind) -> Option<&ChartSlot> {
        self.charts.iter().find(|slot| slot.kind == kind)
    }

    /// Adopts a new viewport size in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32, scale: f64) {
        self.scale = scale;
        self.page.resize(width as f64, height as f64, scale);
        for slot in &mut self.charts {
            slot.dirty = true;
        }
    }

    pub fn toggle_locale(&mut self) {
        self.locale = self.locale.toggled();
        log::info!("Locale switched to {}", self.locale.code());
        for slot in &mut self.charts {
            slot.dirty = true;
        }
    }

    /// Collapses an expanded panel; `false` when none was expanded.
    pub fn collapse_panels(&mut self) -> bool {
        let expanded = self.grid.expanded().is_some();
        self.grid.collapse();
        expanded
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.page.scroll_by(delta);
    }

    /// Advances telemetry, starts reveals for charts that scrolled into view
    /// and steps running reveals.
    pub fn update(&mut self, now: Instant) {
        self.time_s = now.duration_since(self.started).as_secs_f64();
        if self.ticker.poll(now) {
            self.generator.tick();
        }
        for (kind, rect) in self.page.chart_rects() {
            let visible = self.page.is_visible(&rect);
            let Some(slot) = self.charts.iter_mut().find(|slot| slot.kind == kind) else {
                continue;
            };
            if visible && slot.tween.trigger(now) {
                log::debug!("Revealing {kind:?}");
            }
            if slot.tween.advance(now) {
                slot.dirty = true;
            }
        }
    }

    /// Routes a click at `pointer` (viewport pixels).
    pub fn click(&mut self, pointer: Point) {
        match self.page.hit(&self.grid, pointer) {
            Some(Hit::Panel { index, local }) => {
                if local.1 < TITLE_STRIP * self.scale {
                    self.grid.toggle(index);
                    log::debug!("Panel {index} expanded: {:?}", self.grid.expanded());
                } else if index == STORES_PANEL {
                    let rect = self.panel_rect(index);
                    let frame = self.panel_frame(rect.w, rect.h, self.station);
                    self.station = stores::closest_station(&frame, local);
                }
            }
            Some(Hit::Chart { kind, local }) => {
                let rect = self
                    .page
                    .chart_rects()
                    .into_iter()
                    .find(|(k, _)| *k == kind)
                    .map(|(_, rect)| rect);
                let Some(rect) = rect else { return };
                let frame = self.panel_frame(rect.w, rect.h, None);
                let selection = kind.hit_test(&frame, local);
                if let Some(slot) = self.charts.iter_mut().find(|slot| slot.kind == kind) {
                    if slot.selection != selection {
                        slot.selection = selection;
                        slot.dirty = true;
                    }
                }
            }
            None => {}
        }
    }

    fn panel_rect(&self, index: usize) -> Rect {
        self.grid
            .layout(self.page.cockpit_area())
            .into_iter()
            .find(|(i, _)| *i == index)
            .map_or(Rect::new(0.0, 0.0, 0.0, 0.0), |(_, rect)| rect)
    }

    fn panel_frame(&self, width: f64, height: f64, selection: Option<usize>) -> PanelFrame {
        PanelFrame {
            width: width.floor(),
            height: height.floor(),
            scale: self.scale,
            accent: self.config.accent_color,
            warning: self.config.warning_color,
            background: self.config.background_color,
            locale: self.locale,
            time_s: self.time_s,
            sweep_rate_deg_per_s: self.config.sweep_rate_deg_per_s,
            selection,
        }
    }

    /// Paints the visible page into an RGBA `frame` of `width` x `height`.
    ///
    /// Panels are repainted every call; a chart is only repainted when its
    /// progress, selection, locale or size changed since the last paint.
    pub fn render(&mut self, frame: &mut [u8], width: usize, height: usize, typeface: Option<&Typeface>) {
        match Canvas::new(frame, width, height) {
            Some(mut canvas) => canvas.clear(self.config.background_color),
            None => return,
        }

        for (index, rect) in self.grid.layout(self.page.cockpit_area()) {
            if !self.page.is_visible(&rect) {
                continue;
            }
            let selection = (index == STORES_PANEL).then_some(self.station).flatten();
            let panel_frame = self.panel_frame(rect.w, rect.h, selection);
            let sample = self.generator.sample();
            let surface = &mut self.panel_surfaces[index];
            surface.resize(panel_frame.width as usize, panel_frame.height as usize);
            if panels::paint(&PANELS[index], surface, &panel_frame, sample, typeface) {
                let view = self.page.to_viewport(&rect);
                surface.blit_into(frame, width, view.x as i64, view.y as i64);
            }
        }

        for (kind, rect) in self.page.chart_rects() {
            if !self.page.is_visible(&rect) {
                continue;
            }
            let Some(i) = self.charts.iter().position(|slot| slot.kind == kind) else {
                continue;
            };
            let chart_frame = self.panel_frame(rect.w, rect.h, self.charts[i].selection);
            let slot = &mut self.charts[i];
            let (w, h) = (chart_frame.width as usize, chart_frame.height as usize);
            if slot.surface.width() != w || slot.surface.height() != h {
                slot.surface.resize(w, h);
                slot.dirty = true;
            }
            if slot.dirty
                && charts::paint(kind, &mut slot.surface, &chart_frame, slot.tween.value(), typeface)
            {
                slot.dirty = false;
            }
            let view = self.page.to_viewport(&rect);
            slot.surface.blit_into(frame, width, view.x as i64, view.y as i64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn state(now: Instant) -> DisplayState {
        let config = DisplayConfig::builder().seed(7).build();
        let mut state = DisplayState::new(config, now);
        state.resize(800, 400, 1.0);
        state
    }

    #[test]
    fn title_strip_click_toggles_expansion() {
        let mut state = state(Instant::now());
        state.click((450.0, 5.0));
        assert_eq!(state.grid().expanded(), Some(2));
        state.click((10.0, 5.0));
        assert_eq!(state.grid().expanded(), None);
    }

    #[test]
    fn charts_reveal_only_after_scrolling_into_view() {
        let now = Instant::now();
        let mut state = state(now);
        state.update(now + Duration::from_millis(100));
        assert_eq!(state.chart_progress(ChartKind::RcsPolar), 0.0);

        let max = state.page().max_scroll();
        state.scroll_by(max);
        let start = now + Duration::from_millis(200);
        state.update(start);
        state.update(start + Duration::from_secs(10));
        assert_eq!(state.chart_progress(ChartKind::RcsPolar), 1.0);
    }

    #[test]
    fn repeated_renders_are_identical() {
        let mut state = state(Instant::now());
        let mut first = vec![0u8; 800 * 400 * 4];
        let mut second = vec![0u8; 800 * 400 * 4];
        state.render(&mut first, 800, 400, None);
        state.render(&mut second, 800, 400, None);
        assert!(first == second);
        assert!(first.chunks_exact(4).all(|px| px[3] == 0xff));
    }

    #[test]
    fn stores_click_selects_and_clears_station() {
        let mut state = state(Instant::now());
        let rect = state.panel_rect(STORES_PANEL);
        let frame = state.panel_frame(rect.w, rect.h, None);
        let target = stores::station_point(&frame, &stores::STATIONS[0]);
        state.click((rect.x + target.0, rect.y + target.1));
        assert_eq!(state.station(), Some(0));
        state.click((rect.x + 2.0, rect.y + rect.h - 2.0));
        assert_eq!(state.station(), None);
    }

    #[test]
    fn render_into_empty_frame_is_noop() {
        let mut state = state(Instant::now());
        let mut frame = Vec::new();
        state.render(&mut frame, 0, 0, None);
        assert!(frame.is_empty());
    }
}
