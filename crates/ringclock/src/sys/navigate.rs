use crate::gui::clock::NavigationTarget;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use url::Url;

const TARGET_PLACEHOLDER: &str = "{target}";

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("Open command is empty")]
    EmptyCommand,
    #[error("Cannot parse open command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("Cannot turn board path {} into a URI", .0.display())]
    BoardPath(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Address of the goals board. A `board_path` that already is a URI is used
/// as is; a filesystem path is taken relative to the directory holding the
/// goals file, where the board keeps its page.
pub fn resolve_board(board_path: &str, goals_file: &Path) -> Result<Url, NavigateError> {
    if let Ok(url) = Url::parse(board_path) {
        return Ok(url);
    }

    let path = Path::new(board_path);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let base = goals_file.parent().unwrap_or(Path::new(""));
        std::path::absolute(base.join(path))?
    };

    Url::from_file_path(&path).map_err(|()| NavigateError::BoardPath(path))
}

/// Like [`resolve_board`], logging the failure instead of returning it.
pub fn locate_board(board_path: &str, goals_file: &Path) -> Option<Url> {
    resolve_board(board_path, goals_file)
        .inspect_err(|e| log::error!("Goal markers will not open the board: {}", e))
        .ok()
}

/// Hands navigation targets to an external opener (a browser, `xdg-open`,
/// the goals board itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    command: String,
}

impl Navigator {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Program and arguments for opening `target`.
    pub fn command_line(&self, target: &NavigationTarget) -> Result<Vec<String>, NavigateError> {
        let mut words = shell_words::split(&self.command)?;
        if words.is_empty() {
            return Err(NavigateError::EmptyCommand);
        }

        let address = target.to_string();
        if words.iter().any(|w| w.contains(TARGET_PLACEHOLDER)) {
            for word in &mut words {
                *word = word.replace(TARGET_PLACEHOLDER, &address);
            }
        } else {
            words.push(address);
        }
        Ok(words)
    }

    /// Starts the opener and waits for it on a separate thread, logging a
    /// failed exit. The handle yields the exit status once the opener quits.
    pub fn open(
        &self,
        target: &NavigationTarget,
    ) -> Result<JoinHandle<Option<ExitStatus>>, NavigateError> {
        let words = self.command_line(target)?;
        log::info!("Opening {}", target);
        let child = Command::new(&words[0])
            .args(&words[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let program = words[0].clone();
        Ok(thread::spawn(move || reap(child, &program)))
    }
}

fn reap(child: Child, program: &str) -> Option<ExitStatus> {
    match child.wait_with_output() {
        Ok(output) => {
            if !output.status.success() {
                log::warn!(
                    "{} exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Some(output.status)
        }
        Err(e) => {
            log::error!("Failed to wait for {}: {}", program, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> NavigationTarget {
        NavigationTarget::new(Url::parse("file:///srv/ringclock/goals/goals.html").unwrap(), "7")
    }

    #[test]
    fn test_address_is_appended() {
        let nav = Navigator::new("xdg-open");
        assert_eq!(
            nav.command_line(&target()).unwrap(),
            vec!["xdg-open", "file:///srv/ringclock/goals/goals.html#7"]
        );
    }

    #[test]
    fn test_placeholder_is_substituted() {
        let nav = Navigator::new("firefox --new-tab '{target}'");
        assert_eq!(
            nav.command_line(&target()).unwrap(),
            vec!["firefox", "--new-tab", "file:///srv/ringclock/goals/goals.html#7"]
        );
    }

    #[test]
    fn test_bad_commands() {
        assert!(matches!(
            Navigator::new("   ").command_line(&target()),
            Err(NavigateError::EmptyCommand)
        ));
        assert!(matches!(
            Navigator::new("open 'unterminated").command_line(&target()),
            Err(NavigateError::Parse(_))
        ));
    }

    #[test]
    fn test_board_resolves_next_to_goals_file() {
        let url = resolve_board("goals/goals.html", Path::new("/srv/ringclock/goals.json")).unwrap();
        assert_eq!(url.as_str(), "file:///srv/ringclock/goals/goals.html");

        let nav = NavigationTarget::new(url, "1718000000000");
        assert_eq!(
            nav.to_string(),
            "file:///srv/ringclock/goals/goals.html#1718000000000"
        );
    }

    #[test]
    fn test_board_absolute_path_and_uri() {
        let goals = Path::new("/srv/ringclock/goals.json");
        assert_eq!(
            resolve_board("/opt/board/index.html", goals).unwrap().as_str(),
            "file:///opt/board/index.html"
        );
        assert_eq!(
            resolve_board("https://example.org/board", goals).unwrap().as_str(),
            "https://example.org/board"
        );
    }

    #[test]
    fn test_relative_goals_file_still_gives_absolute_uri() {
        let url = resolve_board("goals/goals.html", Path::new("goals.json")).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().starts_with('/'));
        assert!(url.path().ends_with("/goals/goals.html"));
    }

    #[test]
    fn test_opener_is_reaped_with_its_status() {
        let handle = Navigator::new("sh -c 'exit 3'").open(&target()).unwrap();
        let status = handle.join().unwrap().unwrap();
        assert_eq!(status.code(), Some(3));

        let handle = Navigator::new("true").open(&target()).unwrap();
        assert!(handle.join().unwrap().unwrap().success());
    }
}
