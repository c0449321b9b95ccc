//! Host editor primitives
//!
//! The session layer never talks to the editor directly; everything goes
//! through two traits:
//!
//! - `Surfaces`: windows, their content buffers, options, cursor, working
//!   directory and variables
//! - `Interaction`: prompts, confirmations, messages and the yank register
//!
//! `Host` is the union of both and is what panes hold (as `Arc<dyn Host>`).
//! `memory::MemoryHost` is a complete in-memory implementation.

pub mod memory;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Opaque host window handle.
///
/// Handles are only used transiently within one command; panes locate their
/// windows by buffer name every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Opaque host buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win{}", self.0)
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf{}", self.0)
    }
}

/// Side of the layout a new window is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Completion offered while the user types into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    None,
    Dir,
}

/// Window-local display options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub fold_column: u32,
    pub fold_enable: bool,
    pub list: bool,
    pub spell: bool,
    pub win_fix_width: bool,
    pub wrap: bool,
}

impl WindowOptions {
    /// Options applied to every pane window.
    pub fn pane() -> Self {
        Self {
            fold_column: 0,
            fold_enable: false,
            list: false,
            spell: false,
            win_fix_width: true,
            wrap: false,
        }
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            fold_column: 0,
            fold_enable: true,
            list: false,
            spell: false,
            win_fix_width: false,
            wrap: true,
        }
    }
}

/// What happens to a buffer when its last window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufHidden {
    Keep,
    Hide,
    Wipe,
}

/// How a buffer relates to the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufType {
    File,
    NoFile,
}

/// Buffer-local options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferOptions {
    pub buf_hidden: BufHidden,
    pub buf_listed: bool,
    pub buf_type: BufType,
    pub read_only: bool,
    pub swap_file: bool,
    pub modifiable: bool,
    pub modified: bool,
}

impl BufferOptions {
    /// Options applied to every pane buffer: scratch, unlisted and read-only
    /// at rest (`modifiable == false`).
    pub fn pane() -> Self {
        Self {
            buf_hidden: BufHidden::Hide,
            buf_listed: false,
            buf_type: BufType::NoFile,
            read_only: false,
            swap_file: false,
            modifiable: false,
            modified: false,
        }
    }
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            buf_hidden: BufHidden::Keep,
            buf_listed: true,
            buf_type: BufType::File,
            read_only: false,
            swap_file: true,
            modifiable: true,
            modified: false,
        }
    }
}

/// A failed host call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Window, buffer and cursor primitives of the host editor.
pub trait Surfaces {
    /// All windows in layout order.
    fn windows(&self) -> HostResult<Vec<WindowId>>;
    /// All buffers, including hidden ones.
    fn buffers(&self) -> HostResult<Vec<BufferId>>;
    fn window_buffer(&self, window: WindowId) -> HostResult<BufferId>;
    fn buffer_name(&self, buffer: BufferId) -> HostResult<String>;
    fn file_type(&self, buffer: BufferId) -> HostResult<String>;
    fn set_file_type(&self, buffer: BufferId, file_type: &str) -> HostResult<()>;

    /// Split a new full-height window on `side` showing a buffer named `name`.
    fn create_window(&self, side: Side, name: &str) -> HostResult<WindowId>;
    fn focus_window(&self, window: WindowId) -> HostResult<()>;
    fn set_window_width(&self, window: WindowId, width: usize) -> HostResult<()>;
    fn set_window_options(&self, window: WindowId, options: &WindowOptions) -> HostResult<()>;
    /// Edit `path` in an existing window.
    fn open_path(&self, window: WindowId, path: &Path) -> HostResult<()>;
    fn close_window(&self, window: WindowId) -> HostResult<()>;

    fn buffer_options(&self, buffer: BufferId) -> HostResult<BufferOptions>;
    fn set_buffer_options(&self, buffer: BufferId, options: &BufferOptions) -> HostResult<()>;
    fn buffer_lines(&self, buffer: BufferId) -> HostResult<Vec<String>>;
    fn set_buffer_lines(&self, buffer: BufferId, lines: &[String]) -> HostResult<()>;
    /// Whether `buffer` is shown in the focused window.
    fn is_focused(&self, buffer: BufferId) -> HostResult<bool>;

    /// Zero-based cursor row of the focused window.
    fn cursor_row(&self) -> HostResult<usize>;
    fn set_cursor_row(&self, row: usize) -> HostResult<()>;

    /// Raw value of a global variable, `None` if unset.
    fn variable(&self, name: &str) -> HostResult<Option<String>>;
    fn current_dir(&self) -> HostResult<PathBuf>;
    fn set_current_dir(&self, dir: &Path) -> HostResult<()>;
    /// Directory of the focused buffer's file, or the current directory.
    fn nearest_directory(&self) -> HostResult<PathBuf>;
}

/// Interactive primitives of the host editor.
///
/// `None` from a prompt means the user aborted it.
pub trait Interaction {
    fn input_string(
        &self,
        label: &str,
        default: &str,
        completion: Completion,
    ) -> HostResult<Option<String>>;
    fn input_strings(
        &self,
        label: &str,
        defaults: &[String],
        completion: Completion,
    ) -> HostResult<Option<Vec<String>>>;
    /// Yes/no question; `false` covers both "no" and an aborted prompt.
    fn input_bool(&self, label: &str) -> HostResult<bool>;
    fn print(&self, message: &str) -> HostResult<()>;
    fn set_yank_register(&self, text: &str) -> HostResult<()>;
}

/// Everything a pane needs from the host.
pub trait Host: Surfaces + Interaction {}

impl<T: Surfaces + Interaction + ?Sized> Host for T {}
