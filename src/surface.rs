//! Surface binding: one pane's host window(s) and content buffer.
//!
//! A binding only remembers the buffer *name*. Every operation looks the
//! window or buffer up again, because the user may close, split or
//! duplicate the window behind our back.

use crate::error::{FinderError, Result};
use crate::host::{BufferId, BufferOptions, Host, HostResult, Side, WindowId, WindowOptions};
use std::sync::Arc;

/// Binding between a pane and its host surface.
pub struct SurfaceBinding {
    host: Arc<dyn Host>,
    /// Buffer name; immutable for the binding's lifetime
    name: String,
    file_type: String,
    width: usize,
}

impl SurfaceBinding {
    /// Split a left-docked window for the pane buffer `name` and configure it.
    pub fn create(
        host: Arc<dyn Host>,
        name: impl Into<String>,
        width: usize,
        file_type: impl Into<String>,
    ) -> Result<Self> {
        let binding = Self {
            host,
            name: name.into(),
            file_type: file_type.into(),
            width,
        };
        binding.configure().map_err(|source| FinderError::HostSurface {
            name: binding.name.clone(),
            source,
        })?;
        crate::debug_info!("SURFACE", "Created pane window for '{}'", binding.name);
        Ok(binding)
    }

    fn configure(&self) -> HostResult<()> {
        let w = self.host.create_window(Side::Left, &self.name)?;
        self.host.focus_window(w)?;
        self.host.set_window_options(w, &WindowOptions::pane())?;
        self.host.set_window_width(w, self.width)?;

        let b = self.host.window_buffer(w)?;
        self.host.set_buffer_options(b, &BufferOptions::pane())?;
        self.host.set_file_type(b, &self.file_type)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// All windows currently showing the pane buffer.
    ///
    /// An empty result means the pane has been closed.
    pub fn locate(&self) -> HostResult<Vec<WindowId>> {
        let mut found = Vec::new();
        for w in self.host.windows()? {
            let b = self.host.window_buffer(w)?;
            let Ok(name) = self.host.buffer_name(b) else {
                continue;
            };
            if name == self.name {
                found.push(w);
            }
        }
        Ok(found)
    }

    /// The pane buffer, whether or not it is focused.
    fn content_buffer(&self) -> Result<BufferId> {
        for b in self.host.buffers()? {
            match self.host.buffer_name(b) {
                Ok(name) if name == self.name => return Ok(b),
                _ => continue,
            }
        }
        Err(FinderError::BufferNotFound)
    }

    /// The pane buffer, only if it is shown in the focused window.
    pub fn focused_buffer(&self) -> Result<BufferId> {
        for b in self.host.buffers()? {
            let Ok(name) = self.host.buffer_name(b) else {
                continue;
            };
            if name != self.name {
                continue;
            }
            if self.host.is_focused(b)? {
                return Ok(b);
            }
        }
        Err(FinderError::BufferNotFound)
    }

    /// Replace the whole buffer content with `lines`.
    ///
    /// The buffer is non-modifiable at rest; the flag is lifted for the write
    /// and restored afterwards even if the write fails.
    pub fn write(&self, lines: &[String]) -> Result<()> {
        let b = self.content_buffer()?;
        let render_err = |source| FinderError::Render {
            name: self.name.clone(),
            source,
        };

        let options = self.host.buffer_options(b).map_err(render_err)?;
        if options.modifiable {
            return self.host.set_buffer_lines(b, lines).map_err(render_err);
        }

        let writable = BufferOptions {
            modifiable: true,
            ..options.clone()
        };
        self.host.set_buffer_options(b, &writable).map_err(render_err)?;
        let written = self.host.set_buffer_lines(b, lines);
        let restored = self.host.set_buffer_options(b, &options);
        written.map_err(render_err)?;
        restored.map_err(render_err)
    }

    /// Cursor row in the focused pane window.
    pub fn cursor(&self) -> Result<usize> {
        self.focused_buffer()?;
        Ok(self.host.cursor_row()?)
    }

    pub fn set_cursor(&self, row: usize) -> Result<()> {
        self.focused_buffer()?;
        Ok(self.host.set_cursor_row(row)?)
    }

    /// Re-apply the configured width to every pane window.
    pub fn reset_width(&self) -> Result<()> {
        for w in self.locate()? {
            self.host.set_window_width(w, self.width)?;
        }
        Ok(())
    }

    /// Close every window showing the pane buffer.
    pub fn close(&self) -> Result<()> {
        let surface_err = |source| FinderError::HostSurface {
            name: self.name.clone(),
            source,
        };
        for w in self.locate().map_err(surface_err)? {
            self.host.close_window(w).map_err(surface_err)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SurfaceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceBinding")
            .field("name", &self.name)
            .field("file_type", &self.file_type)
            .field("width", &self.width)
            .finish()
    }
}
