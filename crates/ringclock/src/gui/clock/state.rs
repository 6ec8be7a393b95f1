use super::driver::Frame;
use super::geometry::Point;
use super::interaction::{self, Affordance, NavigationTarget, PointerAction, Tooltip};
use super::markers::{self, GoalMarker};
use super::rings::{RingKind, RingSet, YearWindow};
use super::scale::{ScaleContext, Viewport};
use goalbook::Goal;
use std::rc::Rc;
use url::Url;

/// Everything the tick and the pointer handlers share. Lives on the GTK main
/// thread behind an `Rc<RefCell<_>>`.
pub struct RenderState {
    pub rings: RingSet,
    pub scale: ScaleContext,
    pub goals: Vec<Rc<Goal>>,
    pub markers: Vec<GoalMarker>,
    pub hovered: Option<GoalMarker>,
    pub frame: Option<Frame>,
    /// Goals board address; clicks lead nowhere without one.
    pub board: Option<Url>,
}

impl RenderState {
    pub fn new(rings: RingSet, board: Option<Url>) -> Self {
        let scale = ScaleContext::compute(Viewport::default(), rings.design_max_outer());
        Self {
            rings,
            scale,
            goals: Vec::new(),
            markers: Vec::new(),
            hovered: None,
            frame: None,
            board,
        }
    }

    /// Recomputes scale and centre for a new viewport. Returns whether
    /// anything changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if self.scale.viewport == viewport {
            return false;
        }
        self.scale = ScaleContext::compute(viewport, self.rings.design_max_outer());
        self.rebuild_markers();
        true
    }

    /// Installs the session's goal snapshot. It is not refreshed afterwards.
    pub fn set_goals(&mut self, goals: Vec<Goal>) {
        log::info!("Loaded {} goals", goals.len());
        self.goals = goals.into_iter().map(Rc::new).collect();
        self.hovered = None;
        self.rebuild_markers();
    }

    pub fn set_year_window(&mut self, years: YearWindow) {
        if self.rings.years() != years {
            self.rings = RingSet::new(years);
        }
    }

    pub fn day_ring_radius(&self) -> f64 {
        self.rings.ring(RingKind::Day).base_radius * self.scale.scale
    }

    /// Lays the markers out again for the current scale. A hovered marker is
    /// swapped for its rebuilt counterpart so the tooltip follows it.
    pub fn rebuild_markers(&mut self) {
        self.markers =
            markers::build_markers(&self.goals, self.scale.center, self.day_ring_radius());
        self.hovered = self.hovered.take().and_then(|old| {
            self.markers
                .iter()
                .find(|m| Rc::ptr_eq(&m.goal, &old.goal))
                .cloned()
        });
    }

    pub fn pointer_moved(&mut self, pointer: Point) -> PointerAction {
        let hit = interaction::find_hit(&self.markers, pointer, self.scale.scale).cloned();
        let changed = self.hovered != hit;
        self.hovered = hit;
        PointerAction::new(changed, self.affordance())
    }

    pub fn pointer_left(&mut self) -> PointerAction {
        let changed = self.hovered.take().is_some();
        PointerAction::new(changed, Affordance::Default)
    }

    /// Hit-tests the click position. Returns the hover update it caused and
    /// where to go, if anywhere.
    pub fn clicked(&mut self, pointer: Point) -> (PointerAction, Option<NavigationTarget>) {
        let action = self.pointer_moved(pointer);
        let target = self
            .hovered
            .as_ref()
            .zip(self.board.as_ref())
            .and_then(|(m, board)| NavigationTarget::for_goal(board, &m.goal));
        (action, target)
    }

    pub fn affordance(&self) -> Affordance {
        if self.hovered.is_some() {
            Affordance::Pointer
        } else {
            Affordance::Default
        }
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.hovered
            .as_ref()
            .map(|m| Tooltip::for_marker(m, self.scale.scale))
    }
}
