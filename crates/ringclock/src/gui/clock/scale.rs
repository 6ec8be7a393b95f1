use super::geometry::Point;
use super::{HORIZONTAL_MARGIN, INNER_MARGIN, MIN_CANVAS_SIDE, VERTICAL_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Side of the square the ring assembly is fitted into. Never below
    /// `MIN_CANVAS_SIDE`, whatever the viewport reports.
    pub fn canvas_side(&self) -> f64 {
        let by_height = (self.height - VERTICAL_MARGIN).max(MIN_CANVAS_SIDE);
        let by_width = (self.width - HORIZONTAL_MARGIN).max(MIN_CANVAS_SIDE);
        by_height.min(by_width)
    }

    pub fn midpoint(&self) -> Point {
        let half = |v: f64| if v.is_finite() { v.max(0.0) / 2.0 } else { 0.0 };
        Point::new(half(self.width), half(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    pub viewport: Viewport,
    pub side: f64,
    pub scale: f64,
    pub center: Point,
}

impl ScaleContext {
    pub fn compute(viewport: Viewport, design_max_outer: f64) -> Self {
        let side = viewport.canvas_side();
        let scale = (side / 2.0 - INNER_MARGIN) / design_max_outer.max(1.0);

        Self {
            viewport,
            side,
            scale,
            center: viewport.midpoint(),
        }
    }
}
