//! Pane: one docked file-tree view
//!
//! A `Pane` ties together:
//! - a `SurfaceBinding` (the host window and its scratch buffer)
//! - a `TreeModel` rooted at the directory the pane was opened in
//! - the command dispatcher (see `commands.rs`), which hands the tree
//!   model a `PaneIo` and renders whatever it returns

mod commands;
mod io;
pub mod prompts;

use crate::config::Config;
use crate::error::Result;
use crate::host::{Host, Side};
use crate::surface::SurfaceBinding;
use crate::tree::{Outcome, SharedNav, TreeFactory, TreeModel};
use io::PaneIo;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A docked file-tree view.
pub struct Pane {
    host: Arc<dyn Host>,
    binding: SurfaceBinding,
    tree: Box<dyn TreeModel>,
    /// Position in the session at creation time
    index: usize,
    /// Directory the tree model was rooted at
    working_directory: PathBuf,
}

impl Pane {
    /// Open pane number `index`.
    ///
    /// Configuration is `base` overlaid with the host's `finder_*` variables.
    /// The buffer is named `<cwd>/<buffer_name>-<index>`. On error the host
    /// may be left with a half-configured window; the caller drops the pane.
    pub fn open(
        host: Arc<dyn Host>,
        index: usize,
        nav: SharedNav,
        trees: &dyn TreeFactory,
        base: &Config,
    ) -> Result<Self> {
        let cwd = host.nearest_directory()?;
        let config = base
            .clone()
            .with_variables(|key| host.variable(key).ok().flatten());
        let name = cwd
            .join(format!("{}-{}", config.buffer_name, index))
            .to_string_lossy()
            .into_owned();

        let tree = trees.create(&cwd, nav)?;
        let binding =
            SurfaceBinding::create(Arc::clone(&host), name, config.width, config.file_type)?;

        let mut pane = Self {
            host,
            binding,
            tree,
            index,
            working_directory: cwd,
        };
        let io = PaneIo {
            host: pane.host.as_ref(),
            binding: &pane.binding,
        };
        if let Outcome::Completed(lines) = pane.tree.open(&io)? {
            pane.binding.write(&lines)?;
        }
        log::info!(
            "Opened pane {} at {:?} ({})",
            pane.index,
            pane.working_directory,
            pane.binding.name()
        );
        Ok(pane)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Buffer name identifying this pane's surface.
    pub fn name(&self) -> &str {
        self.binding.name()
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn binding(&self) -> &SurfaceBinding {
        &self.binding
    }

    /// Replace the pane content.
    pub fn render(&self, lines: &[String]) -> Result<()> {
        self.binding.write(lines)
    }

    pub fn cursor(&self) -> Result<usize> {
        self.binding.cursor()
    }

    pub fn set_cursor(&self, row: usize) -> Result<()> {
        self.binding.set_cursor(row)
    }

    /// Show `path` in the content area (see `route_file`).
    pub fn open_file(&self, path: &Path) -> Result<()> {
        route_file(self.host.as_ref(), &self.binding, path)
    }

    /// Whether no host window shows this pane any more.
    ///
    /// Checked against the host every time. A failed lookup counts as open
    /// so a transient host error never orphans a live pane.
    pub fn closed(&self) -> bool {
        match self.binding.locate() {
            Ok(windows) => windows.is_empty(),
            Err(e) => {
                log::warn!("Window lookup for '{}' failed: {}", self.name(), e);
                false
            }
        }
    }

    /// Whether the pane buffer is in the focused window.
    pub fn is_focused(&self) -> bool {
        self.binding.focused_buffer().is_ok()
    }

    /// Close every window showing this pane.
    pub fn close(&self) -> Result<()> {
        log::info!("Closing pane {} ({})", self.index, self.name());
        self.binding.close()
    }
}

impl fmt::Debug for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pane")
            .field("index", &self.index)
            .field("working_directory", &self.working_directory)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// Show `path` next to the pane.
///
/// The first window whose buffer is not a pane buffer (file type differs
/// from the pane's) is reused. If every window is a pane, a new window is
/// split on the right; the split resizes existing windows, so every window
/// of this pane gets its configured width back.
pub(crate) fn route_file(host: &dyn Host, binding: &SurfaceBinding, path: &Path) -> Result<()> {
    for w in host.windows()? {
        let b = host.window_buffer(w)?;
        let file_type = host.file_type(b)?;
        if file_type != binding.file_type() {
            crate::debug_info!("PANE", "Opening {:?} in existing window {}", path, w);
            host.open_path(w, path)?;
            host.focus_window(w)?;
            return Ok(());
        }
    }

    let w = host.create_window(Side::Right, &path.to_string_lossy())?;
    crate::debug_info!("PANE", "Opening {:?} in new window {}", path, w);
    binding.reset_width()?;
    host.focus_window(w)?;
    Ok(())
}
