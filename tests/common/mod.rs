//! Shared integration test helpers for finder.
//!
//! Provides an in-memory tree model (`MemoryTree`) backed by a fake file
//! system shared between panes, and a `Fixture` bundling a `MemoryHost`
//! with a `Session`.
//!
//! ```ignore
//! mod common;
//! use common::{fixture, Fixture};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per test file.

#![allow(dead_code)]

use finder::config::Config;
use finder::host::memory::MemoryHost;
use finder::host::{Surfaces, WindowId};
use finder::session::Session;
use finder::tree::{
    Confirmation, NavContext, Operand, OperandKind, Outcome, Reply, SharedNav, TreeFactory,
    TreeIo, TreeModel,
};
use finder::{FinderError, Result};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const WORK: &str = "/work";
pub const HOME: &str = "/home/me";
pub const TRASH: &str = "/trash";

/// Entries of the fake file system plus trash bookkeeping.
#[derive(Debug, Default)]
pub struct FsState {
    pub entries: BTreeMap<PathBuf, OperandKind>,
    /// Trashed path -> path it was removed from
    pub origins: HashMap<PathBuf, PathBuf>,
}

pub type FakeFs = Arc<Mutex<FsState>>;

/// `/work/{a.txt, b.txt, src/main.rs}`, `/home/me/notes.md` and an empty trash.
pub fn sample_fs() -> FakeFs {
    let mut state = FsState::default();
    for (path, kind) in [
        ("/work", OperandKind::Directory),
        ("/work/a.txt", OperandKind::File),
        ("/work/b.txt", OperandKind::File),
        ("/work/src", OperandKind::Directory),
        ("/work/src/main.rs", OperandKind::File),
        ("/home/me", OperandKind::Directory),
        ("/home/me/notes.md", OperandKind::File),
        ("/trash", OperandKind::Directory),
    ] {
        state.entries.insert(PathBuf::from(path), kind);
    }
    Arc::new(Mutex::new(state))
}

pub fn exists(fs: &FakeFs, path: &str) -> bool {
    fs.lock().entries.contains_key(Path::new(path))
}

/// Tree model over `FakeFs`, showing the direct children of its root.
///
/// Row 0 is the root header; row `n` is the `n`th child in path order.
pub struct MemoryTree {
    root: PathBuf,
    fs: FakeFs,
    nav: SharedNav,
    selected: BTreeSet<PathBuf>,
}

impl MemoryTree {
    pub fn new(root: &Path, fs: FakeFs, nav: SharedNav) -> Self {
        Self {
            root: root.to_path_buf(),
            fs,
            nav,
            selected: BTreeSet::new(),
        }
    }

    fn children(&self) -> Vec<Operand> {
        let fs = self.fs.lock();
        fs.entries
            .iter()
            .filter(|(path, _)| path.parent() == Some(self.root.as_path()))
            .map(|(path, kind)| {
                let op = Operand::new(*kind, path);
                match fs.origins.get(path) {
                    Some(origin) => op.trashed_from(origin),
                    None => op,
                }
            })
            .collect()
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}/", self.root.display())];
        for op in self.children() {
            let mark = if self.selected.contains(&op.path) { "*" } else { " " };
            let slash = if op.kind == OperandKind::Directory { "/" } else { "" };
            lines.push(format!("{mark} {}{slash}", op.name));
        }
        lines
    }

    fn render(&self) -> Result<Outcome> {
        Ok(Outcome::Completed(self.lines()))
    }

    fn under_cursor(&self, io: &dyn TreeIo) -> Result<Option<Operand>> {
        let row = io.cursor()?;
        Ok(row.checked_sub(1).and_then(|i| self.children().get(i).cloned()))
    }

    /// Selected entries, or the one under the cursor.
    fn targets(&self, io: &dyn TreeIo) -> Result<Vec<Operand>> {
        if !self.selected.is_empty() {
            return Ok(self
                .children()
                .into_iter()
                .filter(|op| self.selected.contains(&op.path))
                .collect());
        }
        Ok(self.under_cursor(io)?.into_iter().collect())
    }

    fn go(&mut self, dir: Option<PathBuf>, what: &str) -> Result<Outcome> {
        let dir = dir.ok_or_else(|| FinderError::tree(format!("{what} is unknown")))?;
        self.root = dir;
        self.selected.clear();
        self.render()
    }

    fn relocate(&self, from: &Path, to: PathBuf) {
        let mut fs = self.fs.lock();
        let moved: Vec<(PathBuf, OperandKind)> = fs
            .entries
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .map(|(p, k)| (p.clone(), *k))
            .collect();
        for (path, kind) in moved {
            fs.entries.remove(&path);
            let rest = path.strip_prefix(from).unwrap_or(Path::new(""));
            let target = if rest.as_os_str().is_empty() {
                to.clone()
            } else {
                to.join(rest)
            };
            fs.entries.insert(target, kind);
        }
    }

    fn resolve(&self, input: &Path) -> PathBuf {
        if input.is_absolute() {
            input.to_path_buf()
        } else {
            self.root.join(input)
        }
    }

    fn create(&mut self, kind: OperandKind, io: &dyn TreeIo) -> Result<Outcome> {
        let Reply::Answered(names) = io.request_names(kind)? else {
            return Ok(Outcome::Cancelled);
        };
        let mut fs = self.fs.lock();
        for name in names {
            fs.entries.insert(self.root.join(name), kind);
        }
        drop(fs);
        self.render()
    }
}

impl TreeModel for MemoryTree {
    fn open(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        self.render()
    }

    fn cd(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        match io.request_directory()? {
            Reply::Answered(dir) => self.go(Some(dir), "directory"),
            Reply::Cancelled => Ok(Outcome::Cancelled),
        }
    }

    fn root(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let root = self.nav.lock().root.clone();
        self.go(Some(root), "root")
    }

    fn home(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let home = self.nav.lock().home.clone();
        self.go(home, "home directory")
    }

    fn trash(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let trash = self.nav.lock().trash.clone();
        self.go(trash, "trash directory")
    }

    fn project(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let project = self.nav.lock().project.clone();
        self.go(project, "project root")
    }

    fn up(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let parent = self.root.parent().map(Path::to_path_buf);
        self.go(parent, "parent directory")
    }

    fn down(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        match self.under_cursor(io)? {
            Some(op) if op.kind == OperandKind::Directory => self.go(Some(op.path), "directory"),
            Some(op) => {
                io.open_file(&op.path)?;
                Ok(Outcome::Unchanged)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn select(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let Some(op) = self.under_cursor(io)? else {
            return Ok(Outcome::Unchanged);
        };
        if !self.selected.remove(&op.path) {
            self.selected.insert(op.path);
        }
        self.render()
    }

    fn reverse_selected(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let all: BTreeSet<PathBuf> = self.children().into_iter().map(|op| op.path).collect();
        self.selected = all.difference(&self.selected).cloned().collect();
        self.render()
    }

    fn toggle(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        self.render()
    }

    fn toggle_recursive(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        self.render()
    }

    fn create_dir(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        self.create(OperandKind::Directory, io)
    }

    fn create_file(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        self.create(OperandKind::File, io)
    }

    fn rename(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets = self.targets(io)?;
        if targets.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        let Reply::Answered(names) = io.request_rename(&targets)? else {
            return Ok(Outcome::Cancelled);
        };
        for (op, name) in targets.iter().zip(names) {
            self.relocate(&op.path, self.root.join(name));
        }
        self.selected.clear();
        self.render()
    }

    fn move_to(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets = self.targets(io)?;
        if targets.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        let Reply::Answered(dest) = io.request_destination(&targets)? else {
            return Ok(Outcome::Cancelled);
        };
        let dest = self.resolve(&dest);
        for op in &targets {
            self.relocate(&op.path, dest.join(&op.name));
        }
        self.selected.clear();
        self.render()
    }

    fn open_externally(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        Ok(Outcome::Unchanged)
    }

    fn open_dir_externally(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        Ok(Outcome::Unchanged)
    }

    fn remove(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets = self.targets(io)?;
        if targets.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        if io.confirm(Confirmation::Remove, &targets)?.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        let trash = self
            .nav
            .lock()
            .trash
            .clone()
            .ok_or_else(|| FinderError::tree("trash directory is unknown"))?;
        for op in &targets {
            let to = trash.join(&op.name);
            self.relocate(&op.path, to.clone());
            self.fs.lock().origins.insert(to, op.path.clone());
        }
        self.selected.clear();
        self.render()
    }

    fn restore(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets: Vec<Operand> = self
            .targets(io)?
            .into_iter()
            .filter(|op| op.original_path.is_some())
            .collect();
        if targets.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        if io.confirm(Confirmation::Restore, &targets)?.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }
        for op in &targets {
            self.relocate(&op.path, op.restore_path().to_path_buf());
            self.fs.lock().origins.remove(&op.path);
        }
        self.selected.clear();
        self.render()
    }

    fn remove_permanently(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets = self.targets(io)?;
        if targets.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        if io
            .confirm(Confirmation::RemovePermanently, &targets)?
            .is_cancelled()
        {
            return Ok(Outcome::Cancelled);
        }
        let mut fs = self.fs.lock();
        for op in &targets {
            fs.entries.retain(|p, _| !p.starts_with(&op.path));
            fs.origins.remove(&op.path);
        }
        drop(fs);
        self.selected.clear();
        self.render()
    }

    fn copy(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let targets = self.targets(io)?;
        self.nav.lock().set_clipboard(targets);
        self.selected.clear();
        self.render()
    }

    fn copied_list(&self) -> Result<Vec<Operand>> {
        Ok(self.nav.lock().clipboard().to_vec())
    }

    fn paste(&mut self, _io: &dyn TreeIo) -> Result<Outcome> {
        let copied = self.nav.lock().clipboard().to_vec();
        if copied.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        let mut fs = self.fs.lock();
        for op in copied {
            fs.entries.insert(self.root.join(&op.name), op.kind);
        }
        drop(fs);
        self.render()
    }

    fn yank(&mut self, io: &dyn TreeIo) -> Result<Outcome> {
        let paths: Vec<String> = self
            .targets(io)?
            .iter()
            .map(|op| op.path.to_string_lossy().into_owned())
            .collect();
        io.yank(&paths.join("\n"))?;
        Ok(Outcome::Unchanged)
    }
}

/// Builds `MemoryTree`s over one shared `FakeFs`.
pub struct MemoryTreeFactory {
    pub fs: FakeFs,
}

impl TreeFactory for MemoryTreeFactory {
    fn create(&self, root: &Path, nav: SharedNav) -> Result<Box<dyn TreeModel>> {
        Ok(Box::new(MemoryTree::new(root, Arc::clone(&self.fs), nav)))
    }
}

/// A host, a fake file system and a session wired together.
pub struct Fixture {
    pub host: Arc<MemoryHost>,
    pub fs: FakeFs,
    pub session: Session,
}

impl Fixture {
    /// Pane buffer content of pane `index`.
    pub fn pane_lines(&self, index: usize) -> Vec<String> {
        let name = self.session.panes()[index].name().to_string();
        self.host.lines_of(&name).unwrap_or_default()
    }

    /// Windows showing pane `index`.
    pub fn pane_windows(&self, index: usize) -> Vec<WindowId> {
        self.session.panes()[index].binding().locate().unwrap()
    }

    pub fn focus_pane(&self, index: usize) {
        let w = self.pane_windows(index)[0];
        self.host.focus_window(w).unwrap();
    }

    /// Close every window of pane `index` behind the session's back.
    pub fn close_externally(&self, index: usize) {
        for w in self.pane_windows(index) {
            self.host.close_window(w).unwrap();
        }
    }

    pub fn set_cursor(&self, row: usize) {
        let i = self.session.current_index().unwrap();
        self.session.panes()[i].set_cursor(row).unwrap();
    }
}

pub fn nav() -> SharedNav {
    NavContext::new("/home")
        .with_home(HOME)
        .with_project(WORK)
        .with_trash(TRASH)
        .shared()
}

/// Session over a host with one ordinary scratch window and cwd `/work`.
pub fn fixture() -> Fixture {
    fixture_with(MemoryHost::new(WORK))
}

pub fn fixture_with(host: MemoryHost) -> Fixture {
    let host = Arc::new(host);
    let fs = sample_fs();
    let factory = MemoryTreeFactory {
        fs: Arc::clone(&fs),
    };
    let session = Session::new(host.clone(), Config::default(), factory, nav());
    Fixture { host, fs, session }
}

/// Fixture with pane 0 already open.
pub fn opened() -> Fixture {
    let mut f = fixture();
    f.session.open_pane().unwrap();
    f
}
