//! The finder command table.
//!
//! Every command has a public name (`GoToUpper`), a host function name
//! (`FinderGoToUpper`), a `<Plug>` mapping name (`finder-go-to-upper`) and
//! zero or more default key sequences bound inside pane buffers.

use std::fmt;

/// A user-issued finder command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    TogglePane,
    OpenPane,
    ClosePane,
    CloseAllPanes,
    GoToRoot,
    GoToHome,
    GoToTrash,
    GoToProject,
    GoToUpper,
    GoToLowerOrOpen,
    GoTo,
    Select,
    ReverseSelected,
    Toggle,
    ToggleRecursively,
    CreateDir,
    CreateFile,
    Rename,
    Move,
    OpenExternally,
    OpenDirExternally,
    RemovePermanently,
    Remove,
    Restore,
    ShowCopiedList,
    Copy,
    Paste,
    Yank,
}

impl Command {
    /// All commands in registration order.
    pub const ALL: [Command; 28] = [
        Command::TogglePane,
        Command::OpenPane,
        Command::ClosePane,
        Command::CloseAllPanes,
        Command::GoToRoot,
        Command::GoToHome,
        Command::GoToTrash,
        Command::GoToProject,
        Command::GoToUpper,
        Command::GoToLowerOrOpen,
        Command::GoTo,
        Command::Select,
        Command::ReverseSelected,
        Command::Toggle,
        Command::ToggleRecursively,
        Command::CreateDir,
        Command::CreateFile,
        Command::Rename,
        Command::Move,
        Command::OpenExternally,
        Command::OpenDirExternally,
        Command::RemovePermanently,
        Command::Remove,
        Command::Restore,
        Command::ShowCopiedList,
        Command::Copy,
        Command::Paste,
        Command::Yank,
    ];

    /// Public command name.
    pub fn name(self) -> &'static str {
        match self {
            Command::TogglePane => "TogglePane",
            Command::OpenPane => "OpenPane",
            Command::ClosePane => "ClosePane",
            Command::CloseAllPanes => "CloseAllPanes",
            Command::GoToRoot => "GoToRoot",
            Command::GoToHome => "GoToHome",
            Command::GoToTrash => "GoToTrash",
            Command::GoToProject => "GoToProject",
            Command::GoToUpper => "GoToUpper",
            Command::GoToLowerOrOpen => "GoToLowerOrOpen",
            Command::GoTo => "GoTo",
            Command::Select => "Select",
            Command::ReverseSelected => "ReverseSelected",
            Command::Toggle => "Toggle",
            Command::ToggleRecursively => "ToggleRecursively",
            Command::CreateDir => "CreateDir",
            Command::CreateFile => "CreateFile",
            Command::Rename => "Rename",
            Command::Move => "Move",
            Command::OpenExternally => "OpenExternally",
            Command::OpenDirExternally => "OpenDirExternally",
            Command::RemovePermanently => "RemovePermanently",
            Command::Remove => "Remove",
            Command::Restore => "Restore",
            Command::ShowCopiedList => "ShowCopiedList",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::Yank => "Yank",
        }
    }

    /// Look a command up by its public name or its host function name.
    ///
    /// The bare host command `Finder` toggles the session.
    pub fn from_name(name: &str) -> Option<Command> {
        if name == "Finder" {
            return Some(Command::TogglePane);
        }
        let name = name.strip_prefix("Finder").unwrap_or(name);
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Default key sequences bound in pane buffers.
    pub fn default_keys(self) -> &'static [&'static str] {
        match self {
            Command::TogglePane | Command::OpenPane => &[],
            Command::ClosePane => &["q"],
            Command::CloseAllPanes => &["Q"],
            Command::GoToRoot => &["\\"],
            Command::GoToHome => &["~"],
            Command::GoToTrash => &["$"],
            Command::GoToProject => &["^"],
            Command::GoToUpper => &["h"],
            Command::GoToLowerOrOpen => &["l", "e", "<CR>"],
            Command::GoTo => &[">"],
            Command::Select => &["<Space>"],
            Command::ReverseSelected => &["*"],
            Command::Toggle => &["t"],
            Command::ToggleRecursively => &["T"],
            Command::CreateDir => &["K"],
            Command::CreateFile => &["N"],
            Command::Rename => &["r"],
            Command::Move => &["m"],
            Command::OpenExternally => &["x"],
            Command::OpenDirExternally => &["X"],
            Command::RemovePermanently => &["D"],
            Command::Remove => &["d"],
            Command::Restore => &["R"],
            Command::ShowCopiedList => &["C"],
            Command::Copy => &["c"],
            Command::Paste => &["p"],
            Command::Yank => &["y"],
        }
    }

    /// Host function name (`FinderGoToUpper`).
    pub fn function_name(self) -> String {
        format!("Finder{}", self.name())
    }

    /// `<Plug>` mapping name (`finder-go-to-upper`).
    pub fn plug_name(self) -> String {
        format!("finder-{}", lower_hyphens(self.name()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert `UpperCamelCase` to `lower-hyphen-case`.
pub fn lower_hyphens(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_key_sequence;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
            assert_eq!(Command::from_name(&command.function_name()), Some(command));
        }
        assert_eq!(Command::from_name("Nope"), None);
    }

    #[test]
    fn test_plug_name() {
        assert_eq!(
            Command::GoToLowerOrOpen.plug_name(),
            "finder-go-to-lower-or-open"
        );
        assert_eq!(Command::Yank.plug_name(), "finder-yank");
    }

    #[test]
    fn test_default_keys_are_valid_and_unique() {
        let mut seen = HashSet::new();
        for command in Command::ALL {
            for key in command.default_keys() {
                let seq = parse_key_sequence(key).unwrap();
                assert!(seen.insert(seq), "{key} bound twice");
            }
        }
    }

    #[test]
    fn test_lifecycle_commands_have_no_pane_keys_except_close() {
        assert!(Command::TogglePane.default_keys().is_empty());
        assert!(Command::OpenPane.default_keys().is_empty());
        assert_eq!(Command::ClosePane.default_keys(), &["q"]);
    }
}
