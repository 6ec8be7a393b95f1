use crate::goal::Goal;
use fs_err as fs;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "ringclock";
const GOALS_FILE: &str = "goals.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed goals file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Goals file does not hold a JSON array")]
    NotAnArray,
}

/// Source of goal records. Implementations never fail loudly: a read that
/// goes wrong is reported on the log and yields no goals.
pub trait GoalProvider: Send + Sync {
    fn read_goals(&self) -> Vec<Goal>;
}

/// The file bridge used by the desktop shell: one JSON array of goal objects.
#[derive(Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        let xdg = xdg::BaseDirectories::new();
        xdg.get_data_home()
            .map(|dir| dir.join(APP_DIR).join(GOALS_FILE))
            .unwrap_or_else(|| PathBuf::from(GOALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, seeding it with an empty array first if it does not
    /// exist yet.
    pub fn try_read(&self) -> Result<Vec<Goal>, StoreError> {
        let _guard = self.lock.lock();

        if !self.path.exists() {
            self.write_raw("[]")?;
        }

        let data = fs::read_to_string(&self.path)?;
        parse_goals(&data)
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let data = serde_json::to_string_pretty(goals)?;
        self.write_raw(&data)
    }

    fn write_raw(&self, data: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl GoalProvider for JsonFileProvider {
    fn read_goals(&self) -> Vec<Goal> {
        self.try_read().unwrap_or_else(|e| {
            log::error!("Error reading goals from {}: {}", self.path.display(), e);
            Vec::new()
        })
    }
}

/// Parses a goals array. Elements that are not goal objects are dropped so
/// one bad entry does not hide the rest.
pub fn parse_goals(data: &str) -> Result<Vec<Goal>, StoreError> {
    let Value::Array(items) = serde_json::from_str::<Value>(data)? else {
        return Err(StoreError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Goal>(item) {
            Ok(goal) => Some(goal),
            Err(e) => {
                log::debug!("Skipping malformed goal entry: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("goals.json");
        let provider = JsonFileProvider::new(&path);

        assert!(provider.try_read().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFileProvider::new(dir.path().join("goals.json"));
        let goals = vec![
            Goal::new(1, "A", "2024-01-05"),
            Goal::new(2, "B", "2024-01-31"),
        ];

        provider.save_goals(&goals).unwrap();
        assert_eq!(provider.read_goals(), goals);

        let raw = std::fs::read_to_string(provider.path()).unwrap();
        assert!(raw.contains("\n  {"), "expected two-space indentation: {raw}");
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goals.json");
        std::fs::write(&path, "{not json").unwrap();

        let provider = JsonFileProvider::new(&path);
        assert!(matches!(provider.try_read(), Err(StoreError::Json(_))));
        assert!(provider.read_goals().is_empty());
    }

    #[test]
    fn test_non_array_is_rejected() {
        assert!(matches!(
            parse_goals(r#"{"goals": []}"#),
            Err(StoreError::NotAnArray)
        ));
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let goals = parse_goals(r#"[{"id": 1, "title": "A"}, 42, "x", null]"#).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].display_title(), "A");
    }

    #[test]
    fn test_odd_field_types_do_not_drop_goals() {
        let goals = parse_goals(
            r#"[{"id":1,"title":5,"date":"2024-03-15"},{"id":2,"title":"B","date":"2024-03-16","description":3}]"#,
        )
        .unwrap();
        let days: Vec<_> = goals.iter().map(Goal::day_of_month).collect();
        assert_eq!(days, vec![Some(15), Some(16)]);
        assert_eq!(goals[0].display_title(), "5");
        assert_eq!(goals[1].description.as_deref(), Some("3"));
    }
}
