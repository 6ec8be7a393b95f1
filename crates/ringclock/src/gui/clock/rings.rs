use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use strum::{Display, EnumIter, IntoEnumIterator};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAY_COUNT: usize = 31;
pub const HOUR_COUNT: usize = 24;
pub const MINUTE_COUNT: usize = 60;
pub const SECOND_COUNT: usize = 60;
pub const YEAR_WINDOW_LEN: usize = 21;
pub const DEFAULT_FIRST_YEAR: i32 = 2020;

/// Sunday-first, matching the label order of the weekday ring.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// `month0` is zero-based (January = 0).
pub fn month_abbrev(month0: u32) -> &'static str {
    MONTH_ABBREVS[month0 as usize % MONTH_ABBREVS.len()]
}

pub fn two_digit(n: u32) -> String {
    format!("{n:02}")
}

/// The run of consecutive years shown on the outermost ring. The first year
/// is kept inside the calendar range chrono can represent, so the window's
/// arithmetic never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    first: i32,
}

impl Default for YearWindow {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_YEAR)
    }
}

impl YearWindow {
    pub fn new(first: i32) -> Self {
        let min = NaiveDate::MIN.year();
        let max = NaiveDate::MAX.year() - (YEAR_WINDOW_LEN as i32 - 1);
        Self {
            first: first.clamp(min, max),
        }
    }

    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.first + YEAR_WINDOW_LEN as i32 - 1
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last()).contains(&year)
    }

    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.contains(year).then(|| (year - self.first) as usize)
    }

    /// Keeps the window when it already holds `year`, otherwise recentres
    /// it on `year`.
    pub fn containing(self, year: i32) -> Self {
        if self.contains(year) {
            self
        } else {
            Self::new(year.saturating_sub(YEAR_WINDOW_LEN as i32 / 2))
        }
    }

    pub fn labels(&self) -> Vec<String> {
        (self.first..=self.last()).map(|y| y.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Glyphs turn with their slot so they read along the radius.
    Outward,
    Upright,
}

/// The seven rings, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RingKind {
    Weekday,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Year,
}

impl RingKind {
    /// `(radius, font size, padding)` in design units.
    pub fn design(self) -> (f64, f64, f64) {
        match self {
            Self::Weekday => (80.0, 18.0, 50.0),
            Self::Month => (150.0, 16.0, 20.0),
            Self::Day => (190.0, 16.0, 16.0),
            Self::Hour => (225.0, 14.0, 16.0),
            Self::Minute => (260.0, 14.0, 16.0),
            Self::Second => (295.0, 12.0, 16.0),
            Self::Year => (338.0, 14.0, 18.0),
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Self::Weekday | Self::Month => Orientation::Outward,
            _ => Orientation::Upright,
        }
    }

    fn labels(self, years: YearWindow) -> Vec<String> {
        match self {
            Self::Weekday => WEEKDAY_NAMES.iter().map(|s| s.to_string()).collect(),
            Self::Month => MONTH_ABBREVS.iter().map(|s| s.to_string()).collect(),
            Self::Day => (1..=DAY_COUNT as u32).map(two_digit).collect(),
            Self::Hour => (0..HOUR_COUNT as u32).map(two_digit).collect(),
            Self::Minute => (0..MINUTE_COUNT as u32).map(two_digit).collect(),
            Self::Second => (0..SECOND_COUNT as u32).map(two_digit).collect(),
            Self::Year => years.labels(),
        }
    }

    /// Index of the live clock's value in this ring's label table. Only the
    /// year ring can miss, when `now` falls outside the window.
    pub fn current_index(self, now: &NaiveDateTime, years: YearWindow) -> Option<usize> {
        let index = match self {
            Self::Weekday => now.weekday().num_days_from_sunday(),
            Self::Month => now.month0(),
            Self::Day => now.day0(),
            Self::Hour => now.hour(),
            Self::Minute => now.minute(),
            Self::Second => now.second(),
            Self::Year => return years.index_of(now.year()),
        };
        Some(index as usize)
    }
}

#[derive(Debug, Clone)]
pub struct Ring {
    pub kind: RingKind,
    pub labels: Vec<String>,
    pub base_radius: f64,
    pub base_font_size: f64,
    pub base_padding: f64,
}

impl Ring {
    pub fn new(kind: RingKind, years: YearWindow) -> Self {
        let (base_radius, base_font_size, base_padding) = kind.design();
        Self {
            kind,
            labels: kind.labels(years),
            base_radius,
            base_font_size,
            base_padding,
        }
    }

    pub fn outer_base_radius(&self) -> f64 {
        self.base_radius + self.base_padding
    }

    pub fn orientation(&self) -> Orientation {
        self.kind.orientation()
    }
}

#[derive(Debug, Clone)]
pub struct RingSet {
    rings: Vec<Ring>,
    years: YearWindow,
}

impl Default for RingSet {
    fn default() -> Self {
        Self::new(YearWindow::default())
    }
}

impl RingSet {
    pub fn new(years: YearWindow) -> Self {
        Self {
            rings: RingKind::iter().map(|kind| Ring::new(kind, years)).collect(),
            years,
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring(&self, kind: RingKind) -> &Ring {
        &self.rings[kind as usize]
    }

    pub fn years(&self) -> YearWindow {
        self.years
    }

    pub fn design_max_outer(&self) -> f64 {
        self.rings
            .iter()
            .map(Ring::outer_base_radius)
            .fold(0.0, f64::max)
    }

    /// Slides the year window so it holds `year`. Returns whether the labels
    /// changed.
    pub fn sync_year(&mut self, year: i32) -> bool {
        let years = self.years.containing(year);
        if years == self.years {
            return false;
        }
        log::info!(
            "Year {} outside {}..={}, showing {}..={}",
            year,
            self.years.first(),
            self.years.last(),
            years.first(),
            years.last()
        );
        self.years = years;
        self.rings[RingKind::Year as usize] = Ring::new(RingKind::Year, years);
        true
    }

    pub fn current_index(&self, kind: RingKind, now: &NaiveDateTime) -> Option<usize> {
        kind.current_index(now, self.years)
    }

    pub fn current_value(&self, kind: RingKind, now: &NaiveDateTime) -> Option<&str> {
        self.current_index(kind, now)
            .and_then(|i| self.ring(kind).labels.get(i))
            .map(String::as_str)
    }
}
