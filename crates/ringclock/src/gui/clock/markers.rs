use super::geometry::Point;
use super::{DAY_SLOTS, START_OFFSET};
use goalbook::Goal;
use std::f64::consts::PI;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalMarker {
    pub goal: Rc<Goal>,
    pub position: Point,
    pub day: u32,
}

/// Angle of a day of the month on the day ring. Every month is spread over
/// 31 slots, so late days of short months sit slightly early.
pub fn day_angle(day: u32) -> f64 {
    (f64::from(day) / DAY_SLOTS) * 2.0 * PI + START_OFFSET
}

/// Places one marker per goal with a usable date. Goals without one are left
/// out without complaint.
pub fn build_markers(goals: &[Rc<Goal>], center: Point, radius: f64) -> Vec<GoalMarker> {
    goals
        .iter()
        .filter_map(|goal| {
            let Some(day) = goal.day_of_month() else {
                log::trace!("No marker for goal {:?}: date {:?}", goal.id, goal.date);
                return None;
            };
            Some(GoalMarker {
                goal: Rc::clone(goal),
                position: center.polar_offset(radius, day_angle(day)),
                day,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(list: Vec<Goal>) -> Vec<Rc<Goal>> {
        list.into_iter().map(Rc::new).collect()
    }

    fn parse(json: &str) -> Vec<Rc<Goal>> {
        goals(goalbook::store::parse_goals(json).unwrap())
    }

    #[test]
    fn test_two_goals_two_markers() {
        let center = Point::new(400.0, 300.0);
        let radius = 190.0;
        let goals = goals(vec![
            Goal::new(1, "A", "2024-01-05"),
            Goal::new(2, "B", "2024-01-31"),
        ]);

        let markers = build_markers(&goals, center, radius);
        assert_eq!(markers.len(), 2);

        let expected_a = (5.0 / 31.0) * 2.0 * PI - PI / 2.0;
        let expected_b = (31.0 / 31.0) * 2.0 * PI - PI / 2.0;
        assert!((day_angle(5) - expected_a).abs() < 1e-12);
        assert!((day_angle(31) - expected_b).abs() < 1e-12);

        let a = &markers[0];
        assert_eq!(a.goal.display_title(), "A");
        assert!((a.position.x - (center.x + radius * expected_a.cos())).abs() < 1e-9);
        assert!((a.position.y - (center.y + radius * expected_a.sin())).abs() < 1e-9);

        // day 31 completes the turn and lands at 12 o'clock
        let b = &markers[1];
        assert!((b.position.x - center.x).abs() < 1e-9);
        assert!((b.position.y - (center.y - radius)).abs() < 1e-9);
    }

    #[test]
    fn test_undated_goals_are_skipped() {
        let goals = parse(
            r#"[
                {"id": 1, "title": "null", "date": null},
                {"id": 2, "title": "empty", "date": ""},
                {"id": 3, "title": "junk", "date": "someday"},
                {"id": 4, "title": "missing"},
                {"id": 5, "title": "ok", "date": "2024-03-15"}
            ]"#,
        );

        let markers = build_markers(&goals, Point::default(), 100.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].day, 15);
        assert_eq!(markers[0].goal.display_title(), "ok");
    }

    #[test]
    fn test_numeric_title_still_gets_a_marker() {
        let goals = parse(r#"[{"title": 5, "date": "2024-03-15"}]"#);
        let markers = build_markers(&goals, Point::default(), 100.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].day, 15);
        assert_eq!(markers[0].goal.display_title(), "5");
    }

    #[test]
    fn test_short_months_still_divide_by_31() {
        // Feb 28 and Mar 28 share an angle even though February is shorter.
        let feb = Goal::new(1, "feb", "2023-02-28");
        let mar = Goal::new(2, "mar", "2023-03-28");
        let markers = build_markers(&goals(vec![feb, mar]), Point::default(), 50.0);
        assert_eq!(markers[0].position, markers[1].position);
        assert!((day_angle(28) - (28.0 / 31.0 * 2.0 * PI - PI / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_markers_follow_the_day_ring() {
        let goals = goals(vec![Goal::new(1, "A", "2024-06-10")]);
        let center = Point::new(10.0, 20.0);
        for radius in [20.0, 95.0, 400.0] {
            let markers = build_markers(&goals, center, radius);
            assert!((markers[0].position.distance(center) - radius).abs() < 1e-9);
        }
    }
}
