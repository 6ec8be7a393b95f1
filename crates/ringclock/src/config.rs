use crate::gui::clock::interaction::DEFAULT_BOARD_PATH;
use crate::gui::clock::rings::DEFAULT_FIRST_YEAR;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DesktopLayer {
    #[default]
    #[strum(serialize = "normal", serialize = "window", serialize = "none")]
    Normal,
    #[strum(serialize = "background", serialize = "bg")]
    Background,
    #[strum(serialize = "bottom")]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Goals file; the shared data location when unset.
    pub goals_file: Option<PathBuf>,
    /// Goals board page a marker click opens, with the goal id as fragment.
    /// Relative paths are resolved against the goals file's directory.
    pub board_path: String,
    /// Program (plus arguments) that opens the board. `{target}` is replaced
    /// by the address, otherwise the address is appended.
    pub open_command: String,
    /// First year on the year ring.
    pub first_year: i32,
    pub layer: DesktopLayer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goals_file: None,
            board_path: DEFAULT_BOARD_PATH.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            first_year: DEFAULT_FIRST_YEAR,
            layer: DesktopLayer::Normal,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "ringclock", "ringclock")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RINGCLOCK"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_deserialization() {
        let cases = vec![
            ("\"normal\"", DesktopLayer::Normal),
            ("\"Window\"", DesktopLayer::Normal),
            ("\"background\"", DesktopLayer::Background),
            ("\"BG\"", DesktopLayer::Background),
            ("\"bottom\"", DesktopLayer::Bottom),
        ];

        for (json, expected) in cases {
            let deserialized: DesktopLayer = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<DesktopLayer>("\"overlay\"").is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                "board_path = \"board.html\"\nlayer = \"background\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();

        assert_eq!(cfg.board_path, "board.html");
        assert_eq!(cfg.layer, DesktopLayer::Background);
        assert_eq!(cfg.open_command, DEFAULT_OPEN_COMMAND);
        assert_eq!(cfg.first_year, DEFAULT_FIRST_YEAR);
        assert_eq!(cfg.goals_file, None);
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();
        assert_eq!(cfg, Config::default());
    }
}
