use super::interaction::Tooltip;
use super::layout::{LabelSlot, RingLayout};
use super::markers::GoalMarker;
use super::state::RenderState;
use super::{FONT_FAMILY, MARKER_GLOW_RADIUS, MARKER_RADIUS, RING_LINE_WIDTH, TOOLTIP_FONT_FAMILY};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

const GLOW_STEPS: u32 = 4;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

struct RingRenderer<'a> {
    layout: &'a RingLayout,
    colors: &'a ThemeColors,
}

impl<'a> RingRenderer<'a> {
    fn new(layout: &'a RingLayout, colors: &'a ThemeColors) -> Self {
        Self { layout, colors }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_outline(cr)?;

        cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(self.layout.font_size);
        for slot in &self.layout.slots {
            self.draw_slot(cr, slot)?;
        }
        Ok(())
    }

    fn draw_outline(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.layout.center;
        set_color(cr, self.colors.ring);
        cr.set_line_width(RING_LINE_WIDTH);
        cr.new_path();
        cr.arc(center.x, center.y, self.layout.outline_radius, 0.0, 2.0 * PI);
        cr.stroke()
    }

    fn draw_slot(&self, cr: &Context, slot: &LabelSlot) -> Result<(), cairo::Error> {
        let ext = cr.text_extents(&slot.label)?;

        cr.save()?;
        cr.translate(slot.position.x, slot.position.y);
        cr.rotate(slot.rotation);

        if slot.highlighted {
            self.draw_highlight(cr, ext.x_advance())?;
            set_color(cr, self.colors.active_text);
        } else {
            set_color(cr, self.colors.inactive_text);
        }

        // centre the ink box on the slot
        cr.new_path();
        cr.move_to(
            -(ext.x_bearing() + ext.width() / 2.0),
            -(ext.y_bearing() + ext.height() / 2.0),
        );
        cr.show_text(&slot.label)?;
        cr.restore()
    }

    fn draw_highlight(&self, cr: &Context, text_width: f64) -> Result<(), cairo::Error> {
        let style = &self.layout.highlight;
        let (w, h) = style.box_size(text_width, self.layout.font_size);

        // cairo has no shadows, so the glow is a stack of widening boxes
        let glow = self.colors.glow;
        for i in (1..=GLOW_STEPS).rev() {
            let grow = style.glow * f64::from(i) / f64::from(GLOW_STEPS);
            let alpha = glow.alpha / f64::from(GLOW_STEPS + 1);
            set_color(cr, Srgba::new(glow.red, glow.green, glow.blue, alpha));
            rounded_rect(
                cr,
                -(w + grow) / 2.0,
                -(h + grow) / 2.0,
                w + grow,
                h + grow,
                style.corner_radius + grow / 2.0,
            );
            cr.fill()?;
        }

        set_color(cr, self.colors.active_box);
        rounded_rect(cr, -w / 2.0, -h / 2.0, w, h, style.corner_radius);
        cr.fill()
    }
}

fn draw_markers(
    cr: &Context,
    markers: &[GoalMarker],
    scale: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for marker in markers {
        let p = marker.position;

        set_color(cr, colors.marker_glow);
        cr.new_path();
        cr.arc(p.x, p.y, MARKER_GLOW_RADIUS * scale, 0.0, 2.0 * PI);
        cr.fill()?;

        set_color(cr, colors.marker);
        cr.arc(p.x, p.y, MARKER_RADIUS * scale, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    Ok(())
}

fn draw_tooltip(
    cr: &Context,
    tooltip: &Tooltip,
    scale: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.select_font_face(
        TOOLTIP_FONT_FAMILY,
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    cr.set_font_size(tooltip.font_size);
    let ext = cr.text_extents(&tooltip.text)?;

    let (x, y, w, h) = tooltip.frame(ext.x_advance(), scale);
    cr.new_path();
    rounded_rect(cr, x, y, w, h, tooltip.corner_radius);
    set_color(cr, colors.tooltip_bg);
    cr.fill_preserve()?;
    set_color(cr, colors.tooltip_border);
    cr.set_line_width(1.0);
    cr.stroke()?;

    set_color(cr, colors.tooltip_text);
    cr.move_to(tooltip.anchor.x, tooltip.anchor.y - tooltip.padding / 2.0);
    cr.show_text(&tooltip.text)?;
    cr.restore()
}

fn clear(cr: &Context) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_operator(cairo::Operator::Clear);
    cr.paint()?;
    cr.restore()
}

/// Paints the last computed frame: rings innermost first, then goal markers,
/// then the tooltip of the hovered marker.
pub fn draw(cr: &Context, state: &RenderState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    clear(cr)?;

    let Some(frame) = &state.frame else {
        return Ok(());
    };

    for layout in &frame.rings {
        RingRenderer::new(layout, colors).draw(cr)?;
    }

    draw_markers(cr, &state.markers, state.scale.scale, colors)?;

    if let Some(tooltip) = &frame.tooltip {
        draw_tooltip(cr, tooltip, state.scale.scale, colors)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::clock::driver::{Animator, FixedClock};
    use crate::gui::clock::rings::RingSet;
    use crate::gui::clock::scale::Viewport;
    use chrono::NaiveDate;
    use goalbook::Goal;

    fn render(state: &RenderState, size: i32) -> Vec<u8> {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, state, &ThemeColors::pastel()).unwrap();
        }
        surface.flush();
        let data = surface.data().unwrap();
        data.to_vec()
    }

    fn painted_pixels(pixels: &[u8]) -> usize {
        pixels
            .chunks(4)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count()
    }

    #[test]
    fn test_nothing_painted_before_first_tick() {
        let mut state = RenderState::new(RingSet::default(), None);
        state.resize(Viewport::new(300.0, 300.0));
        assert_eq!(painted_pixels(&render(&state, 300)), 0);
    }

    #[test]
    fn test_frame_paints_rings_markers_and_tooltip() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let animator = Animator::new(FixedClock::new(now));
        let mut state = RenderState::new(RingSet::default(), None);
        state.resize(Viewport::new(300.0, 300.0));
        state.set_goals(vec![Goal::new(1, "A", "2024-01-05")]);
        animator.step(&mut state);
        let plain = render(&state, 300);
        assert!(painted_pixels(&plain) > 0);

        let target = state.markers[0].position;
        state.pointer_moved(target);
        animator.step(&mut state);
        assert_ne!(render(&state, 300), plain);
    }
}
