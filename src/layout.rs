// ============================================================================
// PAGE LAYOUT
// ============================================================================
//
// Page geometry: the four-panel grid, the chart row below it, scrolling and
// pointer-to-local coordinate mapping. All values are physical pixels.

use crate::charts::ChartKind;
use crate::panels::PANELS;
use crate::raster::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.0 >= self.x && p.0 < self.x + self.w && p.1 >= self.y && p.1 < self.y + self.h
    }

    /// Maps `p` into this rectangle's local space, or `None` if it falls
    /// outside.
    pub fn to_local(&self, p: Point) -> Option<Point> {
        self.contains(p).then(|| (p.0 - self.x, p.1 - self.y))
    }

    pub fn intersects_band(&self, top: f64, bottom: f64) -> bool {
        self.y < bottom && self.y + self.h > top
    }
}

/// Backing-buffer size for a logical size at the given device pixel ratio.
pub fn backing_size(logical_w: f64, logical_h: f64, scale: f64) -> (u32, u32) {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    (
        (logical_w * scale).round().max(0.0) as u32,
        (logical_h * scale).round().max(0.0) as u32,
    )
}

/// Collapsed/expanded state of the cockpit grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelGrid {
    expanded: Option<usize>,
}

impl PanelGrid {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Expands `index`, or collapses it back when it already is.
    pub fn toggle(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Rectangles of the visible panels inside `area`.
    pub fn layout(&self, area: Rect) -> Vec<(usize, Rect)> {
        match self.expanded {
            Some(index) => vec![(index, area)],
            None => {
                let w = area.w / PANELS.len() as f64;
                (0..PANELS.len())
                    .map(|i| (i, Rect::new(area.x + w * i as f64, area.y, w, area.h)))
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Panel { index: usize, local: Point },
    Chart { kind: ChartKind, local: Point },
}

/// Vertical page made of the cockpit section (one viewport tall) followed by
/// the chart row, scrolled inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub viewport_w: f64,
    pub viewport_h: f64,
    scroll: f64,
    gap: f64,
}

impl Page {
    pub fn new(viewport_w: f64, viewport_h: f64, scale: f64) -> Self {
        Self {
            viewport_w,
            viewport_h,
            scroll: 0.0,
            gap: 24.0 * scale,
        }
    }

    pub fn resize(&mut self, viewport_w: f64, viewport_h: f64, scale: f64) {
        self.viewport_w = viewport_w;
        self.viewport_h = viewport_h;
        self.gap = 24.0 * scale;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll = (self.scroll + delta).clamp(0.0, self.max_scroll());
    }

    pub fn cockpit_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_w, self.viewport_h)
    }

    pub fn chart_row(&self) -> Rect {
        let top = self.viewport_h + self.gap;
        let h = (self.viewport_w / ChartKind::ALL.len() as f64).min(self.viewport_h);
        Rect::new(0.0, top, self.viewport_w, h)
    }

    pub fn chart_rects(&self) -> [(ChartKind, Rect); 3] {
        let row = self.chart_row();
        let w = row.w / ChartKind::ALL.len() as f64;
        let mut i = 0;
        ChartKind::ALL.map(|kind| {
            let rect = Rect::new(row.x + w * i as f64, row.y, w, row.h);
            i += 1;
            (kind, rect)
        })
    }

    pub fn height(&self) -> f64 {
        let row = self.chart_row();
        row.y + row.h
    }

    pub fn max_scroll(&self) -> f64 {
        (self.height() - self.viewport_h).max(0.0)
    }

    /// Whether any part of a page rectangle is inside the viewport.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.intersects_band(self.scroll, self.scroll + self.viewport_h)
    }

    /// Page rectangle in viewport coordinates.
    pub fn to_viewport(&self, rect: &Rect) -> Rect {
        Rect::new(rect.x, rect.y - self.scroll, rect.w, rect.h)
    }

    /// Resolves a pointer position (viewport pixels) to the panel or chart
    /// under it, with coordinates local to that element.
    pub fn hit(&self, grid: &PanelGrid, pointer: Point) -> Option<Hit> {
        let on_page = (pointer.0, pointer.1 + self.scroll);
        for (index, rect) in grid.layout(self.cockpit_area()) {
            if let Some(local) = rect.to_local(on_page) {
                return Some(Hit::Panel { index, local });
            }
        }
        self.chart_rects()
            .into_iter()
            .find_map(|(kind, rect)| rect.to_local(on_page).map(|local| Hit::Chart { kind, local }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapsed_grid_splits_into_quarters() {
        let grid = PanelGrid::default();
        let rects = grid.layout(Rect::new(0.0, 0.0, 800.0, 400.0));
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[2], (2, Rect::new(400.0, 0.0, 200.0, 400.0)));
    }

    #[test]
    fn expanded_panel_takes_the_full_width() {
        let mut grid = PanelGrid::default();
        grid.toggle(1);
        assert_eq!(
            grid.layout(Rect::new(0.0, 0.0, 800.0, 400.0)),
            vec![(1, Rect::new(0.0, 0.0, 800.0, 400.0))]
        );
        grid.toggle(1);
        assert_eq!(grid.expanded(), None);
    }

    #[test]
    fn backing_size_follows_device_pixel_ratio() {
        assert_eq!(backing_size(640.0, 400.0, 2.0), (1280, 800));
        assert_eq!(backing_size(640.0, 400.0, 1.25), (800, 500));
        assert_eq!(backing_size(640.0, 400.0, f64::NAN), (640, 400));
    }

    #[test]
    fn charts_start_below_the_fold() {
        let mut page = Page::new(900.0, 600.0, 1.0);
        let (_, first) = page.chart_rects()[0];
        assert!(!page.is_visible(&first));
        page.scroll_by(30.0);
        assert!(page.is_visible(&first));
        page.scroll_by(1e6);
        assert_eq!(page.scroll(), page.max_scroll());
    }

    #[test]
    fn hit_maps_pointer_into_local_space() {
        let mut page = Page::new(900.0, 400.0, 1.0);
        let grid = PanelGrid::default();
        assert_eq!(
            page.hit(&grid, (250.0, 30.0)),
            Some(Hit::Panel {
                index: 1,
                local: (25.0, 30.0)
            })
        );
        page.scroll_by(page.max_scroll());
        let (kind, rect) = page.chart_rects()[1];
        let view = page.to_viewport(&rect);
        assert_eq!(
            page.hit(&grid, (view.x + 10.0, view.y + 20.0)),
            Some(Hit::Chart {
                kind,
                local: (10.0, 20.0)
            })
        );
    }
}
