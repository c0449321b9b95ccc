//! `TreeIo` implementation handed to a pane's tree model.

use super::prompts;
use crate::error::{FinderError, Result};
use crate::host::{Completion, Host};
use crate::surface::SurfaceBinding;
use crate::tree::{Confirmation, Operand, OperandKind, Reply, TreeIo};
use std::path::{Path, PathBuf};

/// Borrowed view of a pane while one of its commands runs.
pub(crate) struct PaneIo<'a> {
    pub(crate) host: &'a dyn Host,
    pub(crate) binding: &'a SurfaceBinding,
}

/// Empty or whitespace-only input counts as an aborted prompt.
fn non_empty(input: Option<String>) -> Option<String> {
    input.filter(|s| !s.trim().is_empty())
}

impl TreeIo for PaneIo<'_> {
    fn cursor(&self) -> Result<usize> {
        self.binding.cursor()
    }

    fn set_cursor(&self, row: usize) -> Result<()> {
        self.binding.set_cursor(row)
    }

    fn open_file(&self, path: &Path) -> Result<()> {
        super::route_file(self.host, self.binding, path)
    }

    fn request_directory(&self) -> Result<Reply<PathBuf>> {
        let input = self
            .host
            .input_string(prompts::CD_LABEL, "", Completion::Dir)?;
        let Some(dir) = non_empty(input) else {
            return Ok(Reply::Cancelled);
        };
        self.host.set_current_dir(Path::new(dir.trim()))?;
        let cwd = self.host.current_dir()?;
        log::debug!("Working directory changed to {:?}", cwd);
        Ok(Reply::Answered(cwd))
    }

    fn request_names(&self, kind: OperandKind) -> Result<Reply<Vec<String>>> {
        let input = self
            .host
            .input_strings(prompts::create_label(kind), &[], Completion::None)?;
        let names: Vec<String> = input
            .unwrap_or_default()
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Ok(Reply::Cancelled);
        }
        Ok(Reply::Answered(names))
    }

    fn request_rename(&self, targets: &[Operand]) -> Result<Reply<Vec<String>>> {
        if let [only] = targets {
            let input = self.host.input_string(
                &prompts::rename_label(only),
                &only.name,
                Completion::None,
            )?;
            return Ok(match non_empty(input) {
                Some(name) => Reply::Answered(vec![name.trim().to_string()]),
                None => Reply::Cancelled,
            });
        }

        let defaults: Vec<String> = targets.iter().map(|o| o.name.clone()).collect();
        let Some(input) =
            self.host
                .input_strings(prompts::RENAME_BATCH_LABEL, &defaults, Completion::None)?
        else {
            return Ok(Reply::Cancelled);
        };
        let names: Vec<String> = input.iter().map(|n| n.trim().to_string()).collect();
        // A batch is renamed whole or not at all.
        if names.is_empty() || names.iter().any(String::is_empty) {
            return Ok(Reply::Cancelled);
        }
        if names.len() != targets.len() {
            return Err(FinderError::tree(format!(
                "Renaming {} objects needs {} names, got {}",
                targets.len(),
                targets.len(),
                names.len()
            )));
        }
        Ok(Reply::Answered(names))
    }

    fn request_destination(&self, targets: &[Operand]) -> Result<Reply<PathBuf>> {
        let input =
            self.host
                .input_string(&prompts::move_label(targets), "", Completion::Dir)?;
        Ok(match non_empty(input) {
            Some(dest) => Reply::Answered(PathBuf::from(dest.trim())),
            None => Reply::Cancelled,
        })
    }

    fn confirm(&self, action: Confirmation, targets: &[Operand]) -> Result<Reply<()>> {
        let label = prompts::confirm_label(action, targets);
        if self.host.input_bool(&label)? {
            Ok(Reply::Answered(()))
        } else {
            Ok(Reply::Cancelled)
        }
    }

    fn yank(&self, text: &str) -> Result<()> {
        Ok(self.host.set_yank_register(text)?)
    }
}
