//! Prompt and notice phrasing.
//!
//! A command aimed at exactly one operand names it with its kind
//! ("the file 'a.txt'"); two or more operands get a generic batch phrase.

use crate::tree::{Confirmation, Operand, OperandKind};
use finder_keybindings::Command;

pub const CD_LABEL: &str = "Enter the destination directory";
pub const RENAME_BATCH_LABEL: &str = "Rename the objects to";

/// Label of the "names to create" prompt.
pub fn create_label(kind: OperandKind) -> &'static str {
    match kind {
        OperandKind::Directory => "Enter the directory names to create",
        OperandKind::File | OperandKind::Other => "Enter the file names to create",
    }
}

fn single(targets: &[Operand]) -> Option<&Operand> {
    match targets {
        [only] => Some(only),
        _ => None,
    }
}

/// Label of the single-entry rename prompt.
pub fn rename_label(target: &Operand) -> String {
    format!("Rename the {} '{}' to", target.kind, target.name)
}

/// Label of the move destination prompt.
pub fn move_label(targets: &[Operand]) -> String {
    match single(targets) {
        Some(o) => format!(
            "Enter the destination to move the {} '{}'",
            o.kind, o.name
        ),
        None => "Enter the destination to move the selected files".to_string(),
    }
}

/// Label of a destructive-action confirmation.
pub fn confirm_label(action: Confirmation, targets: &[Operand]) -> String {
    let verb = match action {
        Confirmation::Remove => "remove",
        Confirmation::Restore => "restore",
        Confirmation::RemovePermanently => "permanently remove",
    };
    match single(targets) {
        Some(o) => {
            let shown = match action {
                Confirmation::Restore => o.restore_path().to_string_lossy().into_owned(),
                Confirmation::Remove | Confirmation::RemovePermanently => o.name.clone(),
            };
            format!("Are you sure you want to {verb} the {} '{shown}'?", o.kind)
        }
        None => format!("Are you sure you want to {verb} the selected objects?"),
    }
}

/// Notice printed when `command` is cancelled, if it has one.
pub fn cancel_notice(command: Command) -> Option<&'static str> {
    match command {
        Command::GoTo => Some("Changing directory has been canceled."),
        Command::CreateDir | Command::CreateFile => Some("Creating has been canceled."),
        Command::Rename => Some("Renaming has been canceled."),
        Command::Move => Some("Moving has been canceled."),
        Command::Remove => Some("Remove has been canceled."),
        Command::Restore => Some("Restore has been canceled."),
        Command::RemovePermanently => Some("Remove permanently has been canceled."),
        _ => None,
    }
}
