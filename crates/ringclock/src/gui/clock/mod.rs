use std::f64::consts::PI;

pub mod driver;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod markers;
pub mod rings;
pub mod scale;
pub mod state;
pub mod view;

pub use driver::{Animator, Clock, FixedClock, Frame, SystemClock, TickHandle};
pub use geometry::Point;
pub use interaction::{Affordance, NavigationTarget, PointerAction};
pub use markers::GoalMarker;
pub use rings::{Ring, RingKind, RingSet, YearWindow};
pub use scale::{ScaleContext, Viewport};
pub use state::RenderState;
pub use view::draw;

pub const MIN_CANVAS_SIDE: f64 = 200.0;
pub const VERTICAL_MARGIN: f64 = 60.0;
pub const HORIZONTAL_MARGIN: f64 = 40.0;
pub const INNER_MARGIN: f64 = 12.0; // gap between outermost ring and canvas edge

pub const MIN_FONT_SIZE: f64 = 10.0;
pub const RING_LINE_WIDTH: f64 = 1.5; // not scaled
pub const FONT_FAMILY: &str = "monospace";

pub const HIGHLIGHT_PADDING_X: f64 = 8.0;
pub const HIGHLIGHT_PADDING_Y: f64 = 6.0;
pub const HIGHLIGHT_MIN_HEIGHT: f64 = 18.0;
pub const HIGHLIGHT_CORNER_RADIUS: f64 = 6.0;
pub const HIGHLIGHT_GLOW: f64 = 12.0;

pub const DAY_SLOTS: f64 = 31.0;
pub const START_OFFSET: f64 = -PI / 2.0; // day 0 at 12 o'clock
pub const MARKER_GLOW_RADIUS: f64 = 8.0;
pub const MARKER_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 10.0;

pub const TOOLTIP_FONT_SIZE: f64 = 12.0;
pub const TOOLTIP_FONT_FAMILY: &str = "Sans";
pub const TOOLTIP_PADDING: f64 = 6.0;
pub const TOOLTIP_OFFSET: f64 = 10.0;
pub const TOOLTIP_CORNER_RADIUS: f64 = 6.0;
