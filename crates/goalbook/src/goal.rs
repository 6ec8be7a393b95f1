use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

pub const UNTITLED: &str = "(untitled)";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Identifier written by the goals board. Older files carry millisecond
/// timestamps as numbers, hand-edited ones sometimes use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalId {
    Number(Number),
    Text(String),
}

impl GoalId {
    /// The URI fragment addressing this goal on the board, or `None` when the
    /// identifier is empty or zero and so addresses nothing.
    pub fn fragment(&self) -> Option<String> {
        match self {
            Self::Number(n) if n.as_f64().is_some_and(|v| v == 0.0) => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) if s.trim().is_empty() => None,
            Self::Text(s) => Some(s.trim().to_string()),
        }
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for GoalId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct GoalTitle(String);

crate::impl_string_newtype!(GoalTitle);

/// A goal as the board stores it. Every field is optional and read leniently:
/// a value of the wrong JSON type degrades to its text form (or to nothing),
/// so one odd field never costs the whole record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Goal {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<GoalId>,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: Option<GoalTitle>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub description: Option<String>,
    /// Board layout keys (`top`, `left`, `width`, `height`) and anything else
    /// the board wrote, kept so that saving does not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Goal {
    /// Builds a dated goal the way the board creates one. Used by the
    /// `goalbook add` command and handy for callers assembling goal lists.
    pub fn new(id: i64, title: &str, date: &str) -> Self {
        Self {
            id: Some(GoalId::from(id)),
            title: Some(GoalTitle::from(title)),
            date: Some(date.to_string()),
            ..Self::default()
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_ref()
            .map(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_goal_date)
    }

    pub fn day_of_month(&self) -> Option<u32> {
        self.parsed_date().map(|d| d.day())
    }

    pub fn fragment(&self) -> Option<String> {
        self.id.as_ref().and_then(GoalId::fragment)
    }
}

/// Text form of a scalar JSON value. Arrays and objects have none.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_title<'de, D>(deserializer: D) -> Result<Option<GoalTitle>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.map(GoalTitle::from))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<GoalId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(GoalId::Number(n)),
        Value::String(s) => Some(GoalId::Text(s)),
        _ => None,
    })
}

/// Parses the date formats the goals board and hand-edited files produce.
pub fn parse_goal_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_date() {
        let date = parse_goal_date("2024-03-15").unwrap();
        assert_eq!(date.day(), 15);
        assert_eq!(date.month(), 3);
    }

    #[test]
    fn test_parse_alternative_formats() {
        let cases = vec![
            ("2024-03-15T08:30:00Z", 15),
            ("2024-03-15T08:30:00+02:00", 15),
            ("2024-03-15T08:30", 15),
            ("2024-03-15T08:30:12.500", 15),
            ("2024/03/15", 15),
            ("  2024-12-01  ", 1),
        ];

        for (raw, day) in cases {
            assert_eq!(parse_goal_date(raw).map(|d| d.day()), Some(day), "{raw}");
        }
    }

    #[test]
    fn test_reject_missing_or_bad_dates() {
        for raw in ["", "   ", "tomorrow", "2024-02-30", "15/03/2024", "2024-13-01"] {
            assert_eq!(parse_goal_date(raw), None, "{raw}");
        }

        let goal: Goal = serde_json::from_str(r#"{"id": 1, "title": "A", "date": null}"#).unwrap();
        assert_eq!(goal.day_of_month(), None);

        let goal: Goal = serde_json::from_str(r#"{"id": 1, "title": "A"}"#).unwrap();
        assert_eq!(goal.day_of_month(), None);
    }

    #[test]
    fn test_goal_id_fragment() {
        let goal: Goal = serde_json::from_str(r#"{"id": 1718000000000}"#).unwrap();
        assert_eq!(goal.fragment().as_deref(), Some("1718000000000"));

        let goal: Goal = serde_json::from_str(r#"{"id": "seven"}"#).unwrap();
        assert_eq!(goal.fragment().as_deref(), Some("seven"));

        for json in [r#"{"id": 0}"#, r#"{"id": ""}"#, r#"{}"#] {
            let goal: Goal = serde_json::from_str(json).unwrap();
            assert_eq!(goal.fragment(), None, "{json}");
        }
    }

    #[test]
    fn test_display_title_placeholder() {
        assert_eq!(Goal::new(1, "Run", "2024-01-01").display_title(), "Run");
        assert_eq!(Goal::new(1, "  ", "2024-01-01").display_title(), UNTITLED);
        assert_eq!(Goal::default().display_title(), UNTITLED);
    }

    #[test]
    fn test_new_goal_is_a_board_record() {
        let goal = Goal::new(1718000000000, "Run", "2024-06-10");
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["id"], Value::from(1718000000000_i64));
        assert_eq!(value["title"], Value::from("Run"));
        assert_eq!(value["date"], Value::from("2024-06-10"));
        assert!(value.get("description").is_none());
        assert_eq!(serde_json::from_value::<Goal>(value).unwrap(), goal);
    }

    #[test]
    fn test_mistyped_fields_keep_the_record() {
        let goal: Goal = serde_json::from_str(
            r#"{"id": true, "title": 5, "date": "2024-03-15", "description": ["x"]}"#,
        )
        .unwrap();
        assert_eq!(goal.display_title(), "5");
        assert_eq!(goal.day_of_month(), Some(15));
        assert_eq!(goal.description, None);
        assert_eq!(goal.fragment(), None);

        let goal: Goal = serde_json::from_str(r#"{"title": false, "date": 20240315}"#).unwrap();
        assert_eq!(goal.display_title(), "false");
        assert_eq!(goal.date.as_deref(), Some("20240315"));
        assert_eq!(goal.day_of_month(), None);
    }

    #[test]
    fn test_board_layout_keys_survive() {
        let json = r#"{"id":5,"title":"B","description":"d","date":"2024-01-31","top":"40px","left":"12px"}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.extra.get("top"), Some(&Value::from("40px")));

        let back: Value = serde_json::to_value(&goal).unwrap();
        assert_eq!(back["left"], Value::from("12px"));
        assert_eq!(back["description"], Value::from("d"));
    }
}
