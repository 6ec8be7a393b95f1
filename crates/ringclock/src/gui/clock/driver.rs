use super::interaction::Tooltip;
use super::layout::RingLayout;
use super::scale::Viewport;
use super::state::RenderState;
use super::view;
use crate::gui::theme::ThemeColors;
use chrono::{Datelike, Local, NaiveDateTime, TimeDelta};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// What one tick computed: the time it shows and everything needed to paint
/// it. Markers live on the state since pointer handling reads them too.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub now: NaiveDateTime,
    pub rings: Vec<RingLayout>,
    pub tooltip: Option<Tooltip>,
}

pub struct Animator<C: Clock = SystemClock> {
    clock: C,
}

impl Default for Animator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Animator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs one tick against `state`: reads the clock, lays out every ring,
    /// rebuilds the marker layer and the tooltip.
    pub fn step(&self, state: &mut RenderState) {
        let now = self.clock.now();
        state.rings.sync_year(now.year());

        let rings = state
            .rings
            .rings()
            .iter()
            .map(|ring| {
                RingLayout::compute(ring, state.rings.current_index(ring.kind, &now), &state.scale)
            })
            .collect();

        state.rebuild_markers();
        let tooltip = state.tooltip();
        state.frame = Some(Frame {
            now,
            rings,
            tooltip,
        });
    }
}

/// Keeps the animation going until cancelled. Dropping the handle leaves the
/// loop running for the lifetime of the widget.
pub struct TickHandle {
    area: gtk::DrawingArea,
    id: Option<gtk::TickCallbackId>,
}

impl TickHandle {
    pub fn is_running(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            id.remove();
            log::debug!("Clock animation stopped");
        }
    }

    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }
}

/// Drives `area` from the display's frame clock. Every refresh steps the
/// animator and repaints; a resize is applied inside the same draw call, so
/// the scale is never stale when painting.
pub fn run<C: Clock + 'static>(
    state: Rc<RefCell<RenderState>>,
    area: &gtk::DrawingArea,
    animator: Animator<C>,
) -> TickHandle {
    area.set_draw_func(move |area, cr, width, height| {
        let mut state = state.borrow_mut();
        state.resize(Viewport::new(f64::from(width), f64::from(height)));
        animator.step(&mut state);

        let colors = ThemeColors::from_context(&area.style_context());
        if let Err(e) = view::draw(cr, &state, &colors) {
            log::error!("Drawing error: {}", e);
        }
    });

    let id = area.add_tick_callback(|area, _| {
        area.queue_draw();
        glib::ControlFlow::Continue
    });

    TickHandle {
        area: area.clone(),
        id: Some(id),
    }
}
