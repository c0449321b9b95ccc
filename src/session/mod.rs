//! Session registry
//!
//! The `Session` owns every pane opened in this host process, in creation
//! order, plus the navigation context all their tree models share. It is
//! created once by the embedding host and passed by `&mut` into every
//! command entry point.
//!
//! The pane a command applies to is resolved on each call: the first pane
//! that is still shown and whose buffer sits in the focused window. When
//! there is none, pane commands are silent no-ops.

use crate::config::Config;
use crate::error::{FinderError, Result};
use crate::host::Host;
use crate::pane::Pane;
use crate::tree::{Outcome, SharedNav, TreeFactory};
use finder_keybindings::{Command, KeybindingRegistry};
use std::sync::Arc;

/// All panes of one host process.
pub struct Session {
    host: Arc<dyn Host>,
    config: Config,
    trees: Box<dyn TreeFactory>,
    nav: SharedNav,
    keys: KeybindingRegistry,
    panes: Vec<Pane>,
}

impl Session {
    /// Create an empty session.
    ///
    /// `nav` is handed to every pane's tree model; `trees` builds those
    /// models.
    pub fn new(
        host: Arc<dyn Host>,
        config: Config,
        trees: impl TreeFactory + 'static,
        nav: SharedNav,
    ) -> Self {
        let keys = if config.default_keymaps {
            KeybindingRegistry::with_defaults(config.file_type.clone())
        } else {
            KeybindingRegistry::new(config.file_type.clone())
        };
        Self {
            host,
            config,
            trees: Box::new(trees),
            nav,
            keys,
            panes: Vec::new(),
        }
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Navigation context shared by every pane.
    pub fn nav(&self) -> &SharedNav {
        &self.nav
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether every registered pane has lost its window.
    ///
    /// Vacuously true for an empty session.
    pub fn all_closed(&self) -> bool {
        self.panes.iter().all(Pane::closed)
    }

    /// Index of the pane commands currently apply to.
    pub fn current_index(&self) -> Option<usize> {
        self.panes
            .iter()
            .position(|pane| !pane.closed() && pane.is_focused())
    }

    pub fn current(&self) -> Option<&Pane> {
        self.current_index().map(|i| &self.panes[i])
    }

    /// Lowest pane index not used by a registered pane.
    fn free_index(&self) -> usize {
        (0..=self.panes.len())
            .find(|i| self.panes.iter().all(|p| p.index() != *i))
            .unwrap_or(self.panes.len())
    }

    /// Open a new pane at the end of the registry.
    ///
    /// The pane takes the lowest free index, so buffer names never clash
    /// between registered panes. A pane that fails to open is dropped and
    /// never registered.
    pub fn open_pane(&mut self) -> Result<()> {
        let index = self.free_index();
        let pane = Pane::open(
            Arc::clone(&self.host),
            index,
            Arc::clone(&self.nav),
            self.trees.as_ref(),
            &self.config,
        )
        .inspect_err(|e| log::error!("Failed to open pane {}: {}", index, e))?;
        self.panes.push(pane);
        Ok(())
    }

    /// Close the current pane, if any.
    pub fn close_pane(&mut self) -> Result<()> {
        let Some(i) = self.current_index() else {
            crate::debug_info!("SESSION", "No current pane to close");
            return Ok(());
        };
        self.panes[i].close()?;
        self.panes.remove(i);
        Ok(())
    }

    /// Close every pane in creation order.
    ///
    /// Stops at the first failure; panes closed before it are unregistered,
    /// the rest stay.
    pub fn close_all(&mut self) -> Result<()> {
        while let Some(pane) = self.panes.first() {
            pane.close()?;
            self.panes.remove(0);
        }
        Ok(())
    }

    /// Open a first pane when none is shown, otherwise close them all.
    pub fn toggle(&mut self) -> Result<()> {
        if self.all_closed() {
            // Stale panes lost their windows already; unregister them so
            // the new pane gets index 0.
            self.close_all()?;
            self.open_pane()
        } else {
            self.close_all()
        }
    }

    /// Run `command` against the session.
    ///
    /// Lifecycle commands always run. Pane commands go to the current pane
    /// and are no-ops returning `Outcome::Unchanged` when there is none or
    /// when the pane buffer loses focus during the command.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        log::debug!("Dispatching {}", command);
        match command {
            Command::TogglePane => self.toggle().map(|()| Outcome::Unchanged),
            Command::OpenPane => self.open_pane().map(|()| Outcome::Unchanged),
            Command::ClosePane => self.close_pane().map(|()| Outcome::Unchanged),
            Command::CloseAllPanes => self.close_all().map(|()| Outcome::Unchanged),
            _ => {
                let Some(i) = self.current_index() else {
                    crate::debug_log!("SESSION", "{} ignored: no current pane", command);
                    return Ok(Outcome::Unchanged);
                };
                match self.panes[i].run(command) {
                    Err(FinderError::BufferNotFound) => {
                        crate::debug_log!("SESSION", "{} ignored: pane lost focus", command);
                        Ok(Outcome::Unchanged)
                    }
                    result => result,
                }
            }
        }
    }

    /// Run a command given by its public name (`Rename`, `FinderRename`).
    pub fn dispatch_named(&mut self, name: &str) -> Result<Outcome> {
        let command = Command::from_name(name)
            .ok_or_else(|| FinderError::UnknownCommand(name.to_string()))?;
        self.dispatch(command)
    }

    /// Run the command bound to `keys` in the focused buffer.
    ///
    /// Keys are only bound in buffers carrying the configured file type;
    /// anywhere else, or for an unbound sequence, nothing runs and `None` is
    /// returned.
    pub fn dispatch_keys(&mut self, keys: &str) -> Result<Option<Outcome>> {
        let Some(file_type) = self.focused_file_type()? else {
            return Ok(None);
        };
        let Some(command) = self.keys.lookup(&file_type, keys) else {
            crate::debug_log!("SESSION", "No command bound to {:?} in '{}'", keys, file_type);
            return Ok(None);
        };
        self.dispatch(command).map(Some)
    }

    fn focused_file_type(&self) -> Result<Option<String>> {
        for b in self.host.buffers()? {
            if self.host.is_focused(b)? {
                return Ok(Some(self.host.file_type(b)?));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("panes", &self.panes)
            .finish_non_exhaustive()
    }
}
