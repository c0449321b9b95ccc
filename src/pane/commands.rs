//! Command dispatcher
//!
//! Every pane command has the same shape: hand the tree model a `PaneIo`,
//! then act on the `Outcome` it returns:
//!
//! - `Completed(lines)`: render the lines
//! - `Unchanged`: nothing to do
//! - `Cancelled`: print the command's cancellation notice, render nothing
//!
//! Errors from the tree model or the host propagate unchanged.

use super::io::PaneIo;
use super::{Pane, prompts};
use crate::error::{FinderError, Result};
use crate::tree::{Outcome, TreeIo, TreeModel};
use finder_keybindings::Command;

impl Pane {
    fn execute<F>(&mut self, command: Command, op: F) -> Result<Outcome>
    where
        F: FnOnce(&mut dyn TreeModel, &dyn TreeIo) -> Result<Outcome>,
    {
        crate::debug_log!("DISPATCH", "{} on '{}'", command, self.binding.name());
        let io = PaneIo {
            host: self.host.as_ref(),
            binding: &self.binding,
        };
        let outcome = op(self.tree.as_mut(), &io)?;

        match &outcome {
            Outcome::Completed(lines) => self.binding.write(lines)?,
            Outcome::Unchanged => {}
            Outcome::Cancelled => {
                log::debug!("{} cancelled on '{}'", command, self.binding.name());
                if let Some(notice) = prompts::cancel_notice(command) {
                    self.host.print(notice)?;
                }
            }
        }
        Ok(outcome)
    }

    /// Run a pane command by its table entry.
    ///
    /// Lifecycle commands (open/close/toggle) belong to the session.
    pub fn run(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::GoTo => self.cd(),
            Command::GoToRoot => self.root(),
            Command::GoToHome => self.home(),
            Command::GoToTrash => self.trash(),
            Command::GoToProject => self.project(),
            Command::GoToUpper => self.up(),
            Command::GoToLowerOrOpen => self.down(),
            Command::Select => self.select(),
            Command::ReverseSelected => self.reverse_selected(),
            Command::Toggle => self.toggle(),
            Command::ToggleRecursively => self.toggle_recursive(),
            Command::CreateDir => self.create_dir(),
            Command::CreateFile => self.create_file(),
            Command::Rename => self.rename(),
            Command::Move => self.move_to(),
            Command::OpenExternally => self.open_externally(),
            Command::OpenDirExternally => self.open_dir_externally(),
            Command::Remove => self.remove(),
            Command::Restore => self.restore(),
            Command::RemovePermanently => self.remove_permanently(),
            Command::Copy => self.copy(),
            Command::ShowCopiedList => self.copied_list(),
            Command::Paste => self.paste(),
            Command::Yank => self.yank(),
            Command::TogglePane
            | Command::OpenPane
            | Command::ClosePane
            | Command::CloseAllPanes => Err(FinderError::UnknownCommand(format!(
                "{command} is not a pane command"
            ))),
        }
    }

    /// Prompt for a directory, make it the working directory and show it.
    pub fn cd(&mut self) -> Result<Outcome> {
        self.execute(Command::GoTo, |t, io| t.cd(io))
    }

    pub fn root(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToRoot, |t, io| t.root(io))
    }

    pub fn home(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToHome, |t, io| t.home(io))
    }

    pub fn trash(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToTrash, |t, io| t.trash(io))
    }

    pub fn project(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToProject, |t, io| t.project(io))
    }

    pub fn up(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToUpper, |t, io| t.up(io))
    }

    /// Descend into the directory under the cursor, or open the file there.
    pub fn down(&mut self) -> Result<Outcome> {
        self.execute(Command::GoToLowerOrOpen, |t, io| t.down(io))
    }

    pub fn select(&mut self) -> Result<Outcome> {
        self.execute(Command::Select, |t, io| t.select(io))
    }

    pub fn reverse_selected(&mut self) -> Result<Outcome> {
        self.execute(Command::ReverseSelected, |t, io| t.reverse_selected(io))
    }

    pub fn toggle(&mut self) -> Result<Outcome> {
        self.execute(Command::Toggle, |t, io| t.toggle(io))
    }

    pub fn toggle_recursive(&mut self) -> Result<Outcome> {
        self.execute(Command::ToggleRecursively, |t, io| t.toggle_recursive(io))
    }

    pub fn create_dir(&mut self) -> Result<Outcome> {
        self.execute(Command::CreateDir, |t, io| t.create_dir(io))
    }

    pub fn create_file(&mut self) -> Result<Outcome> {
        self.execute(Command::CreateFile, |t, io| t.create_file(io))
    }

    pub fn rename(&mut self) -> Result<Outcome> {
        self.execute(Command::Rename, |t, io| t.rename(io))
    }

    pub fn move_to(&mut self) -> Result<Outcome> {
        self.execute(Command::Move, |t, io| t.move_to(io))
    }

    pub fn open_externally(&mut self) -> Result<Outcome> {
        self.execute(Command::OpenExternally, |t, io| t.open_externally(io))
    }

    pub fn open_dir_externally(&mut self) -> Result<Outcome> {
        self.execute(Command::OpenDirExternally, |t, io| {
            t.open_dir_externally(io)
        })
    }

    pub fn remove(&mut self) -> Result<Outcome> {
        self.execute(Command::Remove, |t, io| t.remove(io))
    }

    pub fn restore(&mut self) -> Result<Outcome> {
        self.execute(Command::Restore, |t, io| t.restore(io))
    }

    pub fn remove_permanently(&mut self) -> Result<Outcome> {
        self.execute(Command::RemovePermanently, |t, io| {
            t.remove_permanently(io)
        })
    }

    /// Mark the targets for a later paste (in this or any other pane).
    pub fn copy(&mut self) -> Result<Outcome> {
        self.execute(Command::Copy, |t, io| t.copy(io))
    }

    /// Print the paths waiting in the clipboard, one per line.
    pub fn copied_list(&mut self) -> Result<Outcome> {
        let copied = self.tree.copied_list()?;
        let paths: Vec<String> = copied
            .iter()
            .map(|o| o.path.to_string_lossy().into_owned())
            .collect();
        self.host.print(&paths.join("\n"))?;
        Ok(Outcome::Unchanged)
    }

    pub fn paste(&mut self) -> Result<Outcome> {
        self.execute(Command::Paste, |t, io| t.paste(io))
    }

    /// Copy the target paths into the host's yank register.
    pub fn yank(&mut self) -> Result<Outcome> {
        self.execute(Command::Yank, |t, io| t.yank(io))
    }
}
