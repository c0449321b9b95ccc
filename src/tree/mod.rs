//! Tree-model contract
//!
//! The tree model (directory traversal, selection, trash and clipboard
//! bookkeeping, on-disk mutation) lives outside this crate. This module
//! defines what a pane expects from it and what it offers in return:
//!
//! - `TreeModel`: one instance per pane, one method per command
//! - `TreeIo`: cursor access, file opening and interactive requests the
//!   model may issue while it runs
//! - `Outcome` / `Reply`: explicit results instead of callbacks, so a
//!   cancelled prompt is a value and not an error
//! - `NavContext`: state shared by every pane's model

mod nav;

pub use nav::{NavContext, SharedNav, detect_project};

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Classification of a tree entry, used in prompt phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    File,
    Directory,
    Other,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperandKind::File => "file",
            OperandKind::Directory => "directory",
            OperandKind::Other => "object",
        })
    }
}

/// A tree entry targeted by a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operand {
    pub kind: OperandKind,
    /// Display name (last path component)
    pub name: String,
    pub path: PathBuf,
    /// Location before the entry was moved to the trash
    pub original_path: Option<PathBuf>,
}

impl Operand {
    pub fn new(kind: OperandKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            kind,
            name,
            path,
            original_path: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(OperandKind::File, path)
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(OperandKind::Directory, path)
    }

    /// Mark this operand as a trashed entry that came from `original`.
    pub fn trashed_from(mut self, original: impl Into<PathBuf>) -> Self {
        self.original_path = Some(original.into());
        self
    }

    /// Path shown when asking to restore: the pre-trash location if known.
    pub fn restore_path(&self) -> &Path {
        self.original_path.as_deref().unwrap_or(&self.path)
    }
}

/// The user's answer to an interactive request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Answered(T),
    Cancelled,
}

impl<T> Reply<T> {
    pub fn answered(self) -> Option<T> {
        match self {
            Reply::Answered(value) => Some(value),
            Reply::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Reply::Cancelled)
    }
}

/// Result of one tree-model command.
///
/// Failures travel in the `Err` arm of the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran; the pane shows these lines next.
    Completed(Vec<String>),
    /// The command ran without changing what the pane shows.
    Unchanged,
    /// The user aborted a prompt; nothing was changed.
    Cancelled,
}

/// Destructive operations that must be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Remove,
    Restore,
    RemovePermanently,
}

/// What a running tree-model command may ask of its pane.
pub trait TreeIo {
    /// Zero-based row under the cursor in the pane.
    fn cursor(&self) -> Result<usize>;
    fn set_cursor(&self, row: usize) -> Result<()>;
    /// Show `path` in the content area.
    fn open_file(&self, path: &Path) -> Result<()>;
    /// Ask for a directory and make it the host's working directory.
    ///
    /// Answers with the resolved working directory.
    fn request_directory(&self) -> Result<Reply<PathBuf>>;
    /// Ask for the names of new entries of `kind`.
    fn request_names(&self, kind: OperandKind) -> Result<Reply<Vec<String>>>;
    /// Ask for new names for `targets`, one per target in order.
    fn request_rename(&self, targets: &[Operand]) -> Result<Reply<Vec<String>>>;
    /// Ask where to move `targets`.
    fn request_destination(&self, targets: &[Operand]) -> Result<Reply<PathBuf>>;
    /// Ask to confirm `action` on `targets`; "no" is a cancellation.
    fn confirm(&self, action: Confirmation, targets: &[Operand]) -> Result<Reply<()>>;
    /// Put `text` in the host's yank register.
    fn yank(&self, text: &str) -> Result<()>;
}

/// A file tree rooted at a working directory.
///
/// Every command receives the pane's `TreeIo`. Returning
/// `Outcome::Cancelled` promises the model state is exactly as it was
/// before the call.
pub trait TreeModel {
    /// Initial listing.
    fn open(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn cd(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn root(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn home(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn trash(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn project(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    /// Go to the parent of the current root.
    fn up(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    /// Descend into the directory under the cursor or open the file there.
    fn down(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn select(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn reverse_selected(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn toggle(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn toggle_recursive(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn create_dir(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn create_file(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn rename(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn move_to(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn open_externally(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn open_dir_externally(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn remove(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn restore(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn remove_permanently(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    /// Mark the targets in the shared clipboard.
    fn copy(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    /// Operands currently in the shared clipboard.
    fn copied_list(&self) -> Result<Vec<Operand>>;
    fn paste(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
    fn yank(&mut self, io: &dyn TreeIo) -> Result<Outcome>;
}

/// Creates the tree model for a new pane.
pub trait TreeFactory {
    fn create(&self, root: &Path, nav: SharedNav) -> Result<Box<dyn TreeModel>>;
}

impl<F> TreeFactory for F
where
    F: Fn(&Path, SharedNav) -> Result<Box<dyn TreeModel>>,
{
    fn create(&self, root: &Path, nav: SharedNav) -> Result<Box<dyn TreeModel>> {
        self(root, nav)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_name_from_path() {
        let op = Operand::file("/work/a.txt");
        assert_eq!(op.name, "a.txt");
        assert_eq!(op.kind.to_string(), "file");
        assert_eq!(Operand::new(OperandKind::Other, "/").name, "/");
    }

    #[test]
    fn test_restore_path_prefers_original() {
        let op = Operand::file("/trash/a.txt");
        assert_eq!(op.restore_path(), Path::new("/trash/a.txt"));
        let op = op.trashed_from("/work/a.txt");
        assert_eq!(op.restore_path(), Path::new("/work/a.txt"));
    }

    #[test]
    fn test_reply() {
        assert_eq!(Reply::Answered(3).answered(), Some(3));
        assert!(Reply::<()>::Cancelled.is_cancelled());
    }
}
