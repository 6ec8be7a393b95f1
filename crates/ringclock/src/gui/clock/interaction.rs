use super::geometry::Point;
use super::markers::GoalMarker;
use super::{
    HIT_RADIUS, TOOLTIP_CORNER_RADIUS, TOOLTIP_FONT_SIZE, TOOLTIP_OFFSET, TOOLTIP_PADDING,
};
use goalbook::Goal;
use std::fmt;
use url::Url;

pub const DEFAULT_BOARD_PATH: &str = "goals/goals.html";

/// Hit radius around a marker. Never shrinks below the unscaled radius so
/// markers stay clickable on small windows.
pub fn hit_radius(scale: f64) -> f64 {
    HIT_RADIUS * scale.max(1.0)
}

/// First marker, in layer order, whose centre is within the hit radius.
pub fn find_hit(markers: &[GoalMarker], pointer: Point, scale: f64) -> Option<&GoalMarker> {
    let radius = hit_radius(scale);
    markers
        .iter()
        .find(|m| m.position.distance(pointer) < radius)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    #[default]
    Default,
    Pointer,
}

impl Affordance {
    /// Cursor name for the widget; `None` restores the inherited cursor.
    pub fn cursor_name(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Pointer => Some("pointer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerAction {
    pub should_redraw: bool,
    pub affordance: Affordance,
}

impl PointerAction {
    pub fn new(should_redraw: bool, affordance: Affordance) -> Self {
        Self {
            should_redraw,
            affordance,
        }
    }
}

/// Where a click on a marker leads: the goals board, scrolled to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    url: Url,
}

impl NavigationTarget {
    pub fn new(board: Url, fragment: &str) -> Self {
        let mut url = board;
        url.set_fragment(Some(fragment));
        Self { url }
    }

    pub fn for_goal(board: &Url, goal: &Goal) -> Option<Self> {
        goal.fragment()
            .map(|fragment| Self::new(board.clone(), &fragment))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Left end of the text baseline.
    pub anchor: Point,
    pub font_size: f64,
    pub padding: f64,
    pub corner_radius: f64,
}

impl Tooltip {
    pub fn for_marker(marker: &GoalMarker, scale: f64) -> Self {
        Self {
            text: marker.goal.display_title().to_string(),
            anchor: Point::new(
                marker.position.x + TOOLTIP_OFFSET * scale,
                marker.position.y - TOOLTIP_OFFSET * scale,
            ),
            font_size: TOOLTIP_FONT_SIZE * scale.max(1.0),
            padding: TOOLTIP_PADDING * scale,
            corner_radius: TOOLTIP_CORNER_RADIUS * scale,
        }
    }

    /// Background box `(x, y, width, height)` for text of measured width.
    pub fn frame(&self, text_width: f64, scale: f64) -> (f64, f64, f64, f64) {
        let width = text_width + self.padding * 2.0;
        let height = TOOLTIP_FONT_SIZE * scale + self.padding;
        (
            self.anchor.x - self.padding,
            self.anchor.y - height,
            width,
            height,
        )
    }
}
