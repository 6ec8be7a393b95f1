use super::geometry::Point;
use super::rings::{Orientation, Ring, RingKind};
use super::scale::ScaleContext;
use super::{
    HIGHLIGHT_CORNER_RADIUS, HIGHLIGHT_GLOW, HIGHLIGHT_MIN_HEIGHT, HIGHLIGHT_PADDING_X,
    HIGHLIGHT_PADDING_Y, MIN_FONT_SIZE,
};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSlot {
    pub label: String,
    /// Offset from the active slot; 0 is the active slot, at 3 o'clock.
    pub angle: f64,
    pub position: Point,
    /// Rotation applied to the glyphs around `position`.
    pub rotation: f64,
    pub highlighted: bool,
}

/// Box drawn behind the active label, in design units already scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub padding_x: f64,
    pub padding_y: f64,
    pub min_height: f64,
    pub corner_radius: f64,
    pub glow: f64,
}

impl HighlightStyle {
    pub fn scaled(scale: f64) -> Self {
        Self {
            padding_x: HIGHLIGHT_PADDING_X * scale,
            padding_y: HIGHLIGHT_PADDING_Y * scale,
            min_height: HIGHLIGHT_MIN_HEIGHT * scale,
            corner_radius: HIGHLIGHT_CORNER_RADIUS * scale,
            glow: HIGHLIGHT_GLOW * scale,
        }
    }

    /// Box size for a label of measured `text_width` at `font_size`.
    pub fn box_size(&self, text_width: f64, font_size: f64) -> (f64, f64) {
        (
            text_width + self.padding_x * 2.0,
            self.min_height.max(font_size + self.padding_y * 2.0),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub kind: RingKind,
    pub center: Point,
    pub outline_radius: f64,
    pub label_radius: f64,
    pub font_size: f64,
    pub highlight: HighlightStyle,
    pub slots: Vec<LabelSlot>,
}

impl RingLayout {
    /// Lays out `ring` so the label at `current` sits at angle 0. When there
    /// is no current label the table starts at angle 0 and nothing is
    /// highlighted.
    pub fn compute(ring: &Ring, current: Option<usize>, scale: &ScaleContext) -> Self {
        let count = ring.labels.len().max(1);
        let angle_step = 2.0 * PI / count as f64;
        let anchor = current.unwrap_or(0) as f64;
        let label_radius = ring.base_radius * scale.scale;

        let slots = ring
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let angle = (i as f64 - anchor) * angle_step;
                let rotation = match ring.orientation() {
                    Orientation::Outward => angle,
                    Orientation::Upright => 0.0,
                };
                LabelSlot {
                    label: label.clone(),
                    angle,
                    position: scale.center.polar_offset(label_radius, angle),
                    rotation,
                    highlighted: current == Some(i),
                }
            })
            .collect();

        Self {
            kind: ring.kind,
            center: scale.center,
            outline_radius: ring.outer_base_radius() * scale.scale,
            label_radius,
            font_size: (ring.base_font_size * scale.scale).max(MIN_FONT_SIZE),
            highlight: HighlightStyle::scaled(scale.scale),
            slots,
        }
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &LabelSlot> {
        self.slots.iter().filter(|s| s.highlighted)
    }
}
