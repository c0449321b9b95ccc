//! Navigation context shared by every pane's tree model.

use super::Operand;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle to the session's navigation context.
pub type SharedNav = Arc<Mutex<NavContext>>;

/// Cross-pane navigation state.
///
/// One instance exists per session. A copy made in one pane is pasted from
/// any other pane because all tree models hold the same `SharedNav`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavContext {
    /// File-system root shown by "go to root"
    pub root: PathBuf,
    /// User home directory
    pub home: Option<PathBuf>,
    /// Root of the project enclosing the start directory
    pub project: Option<PathBuf>,
    /// Trash directory
    pub trash: Option<PathBuf>,
    clipboard: Vec<Operand>,
}

impl NavContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            home: None,
            project: None,
            trash: None,
            clipboard: Vec::new(),
        }
    }

    /// Context for the current user, with the project detected from `start`.
    pub fn detect(start: &Path) -> Self {
        let home = dirs::home_dir();
        let trash = trash_dir();
        let project = detect_project(start);
        log::info!(
            "Navigation context: home={:?} trash={:?} project={:?}",
            home,
            trash,
            project
        );
        Self {
            root: PathBuf::from("/"),
            home,
            project,
            trash,
            clipboard: Vec::new(),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_trash(mut self, trash: impl Into<PathBuf>) -> Self {
        self.trash = Some(trash.into());
        self
    }

    /// Wrap into the handle shared by all panes.
    pub fn shared(self) -> SharedNav {
        Arc::new(Mutex::new(self))
    }

    /// Operands marked by the last copy.
    pub fn clipboard(&self) -> &[Operand] {
        &self.clipboard
    }

    /// Replace the clipboard with `operands`.
    pub fn set_clipboard(&mut self, operands: Vec<Operand>) {
        log::debug!("Clipboard now holds {} objects", operands.len());
        self.clipboard = operands;
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }
}

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry.
pub fn detect_project(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

#[cfg(target_os = "macos")]
fn trash_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".Trash"))
}

/// XDG trash: `$XDG_DATA_HOME/Trash/files`.
#[cfg(not(target_os = "macos"))]
fn trash_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("Trash").join("files"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detect_uses_platform_trash() {
        let nav = NavContext::detect(Path::new("/"));
        assert_eq!(nav.trash, trash_dir());
        if let Some(trash) = &nav.trash {
            assert!(trash.ends_with("Trash/files") || trash.ends_with(".Trash"));
        }
    }

    #[test]
    fn test_clipboard_is_shared() {
        let nav = NavContext::new("/").shared();
        let other = Arc::clone(&nav);
        nav.lock()
            .set_clipboard(vec![Operand::file("/work/a.txt")]);
        assert_eq!(other.lock().clipboard().len(), 1);
        other.lock().clear_clipboard();
        assert!(nav.lock().clipboard().is_empty());
    }

    #[test]
    fn test_detect_project() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("proj");
        let nested = project.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(project.join(".git")).unwrap();

        assert_eq!(detect_project(&nested), Some(project.clone()));
        assert_eq!(detect_project(&project), Some(project));
    }

    #[test]
    fn test_detect_finds_enclosing_project() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let nav = NavContext::detect(tmp.path());
        assert_eq!(nav.root, PathBuf::from("/"));
        assert_eq!(nav.project.as_deref(), Some(tmp.path()));
        assert!(nav.clipboard().is_empty());
    }

    #[test]
    fn test_builders() {
        let nav = NavContext::new("/")
            .with_home("/home/u")
            .with_project("/home/u/p")
            .with_trash("/home/u/.Trash");
        assert_eq!(nav.home.as_deref(), Some(Path::new("/home/u")));
        assert_eq!(nav.project.as_deref(), Some(Path::new("/home/u/p")));
        assert_eq!(nav.trash.as_deref(), Some(Path::new("/home/u/.Trash")));
    }
}
