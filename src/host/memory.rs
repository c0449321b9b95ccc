//! In-memory host
//!
//! `MemoryHost` keeps a window layout, buffers, a focused window and a
//! working directory in memory, and answers prompts from a scripted queue.
//! Splitting a new window re-divides the available columns between the
//! windows without `win_fix_width`; fixed windows keep their width. A window
//! is only fixed once its options are set, so a freshly split pane window
//! still takes its share until its width is applied.

use super::{
    BufType, BufferId, BufferOptions, Completion, HostError, HostResult, Interaction, Side,
    Surfaces, WindowId, WindowOptions,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Total editor width shared by all windows
const COLUMNS: usize = 160;

/// A scripted answer to the next prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Texts(Vec<String>),
    Yes,
    No,
    Cancel,
}

/// A prompt shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub label: String,
    pub defaults: Vec<String>,
    pub completion: Completion,
}

#[derive(Debug, Clone)]
struct Window {
    id: WindowId,
    buffer: BufferId,
    width: usize,
    options: WindowOptions,
    cursor_row: usize,
}

#[derive(Debug, Clone)]
struct Buffer {
    id: BufferId,
    name: String,
    file_type: String,
    lines: Vec<String>,
    options: BufferOptions,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    windows: Vec<Window>,
    buffers: Vec<Buffer>,
    focused: Option<WindowId>,
    cwd: PathBuf,
    variables: HashMap<String, String>,
    answers: VecDeque<Answer>,
    prompts: Vec<PromptRecord>,
    messages: Vec<String>,
    yank: Option<String>,
    width_changes: usize,
    refuse_windows: bool,
    refuse_writes: bool,
    /// Buffer names whose windows refuse to close
    refuse_close: Vec<String>,
    /// Focus queries answered before the focused window loses focus
    focus_queries_left: Option<usize>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn window(&self, id: WindowId) -> HostResult<&Window> {
        self.windows
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| HostError::new(format!("Invalid window id: {id}")))
    }

    fn window_mut(&mut self, id: WindowId) -> HostResult<&mut Window> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| HostError::new(format!("Invalid window id: {id}")))
    }

    fn buffer(&self, id: BufferId) -> HostResult<&Buffer> {
        self.buffers
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| HostError::new(format!("Invalid buffer id: {id}")))
    }

    fn buffer_mut(&mut self, id: BufferId) -> HostResult<&mut Buffer> {
        self.buffers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| HostError::new(format!("Invalid buffer id: {id}")))
    }

    /// Find the buffer called `name`, creating a normal file buffer if needed.
    fn buffer_named(&mut self, name: &str) -> BufferId {
        if let Some(b) = self.buffers.iter().find(|b| b.name == name) {
            return b.id;
        }
        let id = BufferId(self.next_id());
        let file_type = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        self.buffers.push(Buffer {
            id,
            name: name.to_string(),
            file_type,
            lines: Vec::new(),
            options: BufferOptions::default(),
        });
        id
    }

    fn focused_window(&self) -> HostResult<&Window> {
        let id = self
            .focused
            .ok_or_else(|| HostError::new("No window is focused"))?;
        self.window(id)
    }

    fn equalize(&mut self) {
        let fixed: usize = self
            .windows
            .iter()
            .filter(|w| w.options.win_fix_width)
            .map(|w| w.width)
            .sum();
        let free = self
            .windows
            .iter()
            .filter(|w| !w.options.win_fix_width)
            .count();
        if free == 0 {
            return;
        }
        let share = COLUMNS.saturating_sub(fixed).max(free) / free;
        for w in self.windows.iter_mut().filter(|w| !w.options.win_fix_width) {
            w.width = share;
        }
    }

    fn next_answer(&mut self, record: PromptRecord) -> HostResult<Answer> {
        let label = record.label.clone();
        self.prompts.push(record);
        self.answers
            .pop_front()
            .ok_or_else(|| HostError::new(format!("No scripted answer for prompt: {label}")))
    }
}

/// In-memory implementation of `Surfaces` and `Interaction`.
#[derive(Debug)]
pub struct MemoryHost {
    state: Mutex<State>,
}

impl MemoryHost {
    /// Host with a single focused, unnamed scratch window.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let host = Self::without_windows(cwd);
        {
            let mut s = host.state.lock();
            let buffer = s.buffer_named("");
            let id = WindowId(s.next_id());
            s.windows.push(Window {
                id,
                buffer,
                width: COLUMNS,
                options: WindowOptions::default(),
                cursor_row: 0,
            });
            s.focused = Some(id);
        }
        host
    }

    /// Host with no windows at all.
    pub fn without_windows(cwd: impl Into<PathBuf>) -> Self {
        Self {
            state: Mutex::new(State {
                cwd: cwd.into(),
                ..State::default()
            }),
        }
    }

    /// Split an ordinary editor window showing `path`.
    pub fn add_window(&self, side: Side, path: &str) -> WindowId {
        let mut s = self.state.lock();
        let buffer = s.buffer_named(path);
        let id = WindowId(s.next_id());
        let window = Window {
            id,
            buffer,
            width: 0,
            options: WindowOptions::default(),
            cursor_row: 0,
        };
        match side {
            Side::Left => s.windows.insert(0, window),
            Side::Right => s.windows.push(window),
        }
        s.equalize();
        id
    }

    /// Queue the answer for the next prompt.
    pub fn push_answer(&self, answer: Answer) {
        self.state.lock().answers.push_back(answer);
    }

    /// Number of queued answers not consumed yet.
    pub fn pending_answers(&self) -> usize {
        self.state.lock().answers.len()
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> Vec<PromptRecord> {
        self.state.lock().prompts.clone()
    }

    /// Every message printed so far.
    pub fn messages(&self) -> Vec<String> {
        self.state.lock().messages.clone()
    }

    pub fn yank_register(&self) -> Option<String> {
        self.state.lock().yank.clone()
    }

    pub fn set_variable(&self, name: &str, value: &str) {
        self.state
            .lock()
            .variables
            .insert(name.to_string(), value.to_string());
    }

    /// Make every later `create_window` fail.
    pub fn refuse_windows(&self, refuse: bool) {
        self.state.lock().refuse_windows = refuse;
    }

    /// Make every later `set_buffer_lines` fail.
    pub fn refuse_writes(&self, refuse: bool) {
        self.state.lock().refuse_writes = refuse;
    }

    /// Make closing any window that shows the buffer `name` fail.
    pub fn refuse_close(&self, name: &str) {
        self.state.lock().refuse_close.push(name.to_string());
    }

    /// Drop focus from every window once `queries` more `is_focused` calls
    /// have been answered, as when the user switches away mid-command.
    pub fn lose_focus_after(&self, queries: usize) {
        self.state.lock().focus_queries_left = Some(queries);
    }

    /// Content of the buffer called `name`.
    pub fn lines_of(&self, name: &str) -> Option<Vec<String>> {
        let s = self.state.lock();
        s.buffers
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.lines.clone())
    }

    pub fn window_width(&self, window: WindowId) -> Option<usize> {
        self.state.lock().window(window).ok().map(|w| w.width)
    }

    /// Name of the buffer shown in `window`.
    pub fn window_name(&self, window: WindowId) -> Option<String> {
        let s = self.state.lock();
        let w = s.window(window).ok()?;
        s.buffer(w.buffer).ok().map(|b| b.name.clone())
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.state.lock().focused
    }

    pub fn window_count(&self) -> usize {
        self.state.lock().windows.len()
    }

    /// Number of `set_window_width` calls so far.
    pub fn width_changes(&self) -> usize {
        self.state.lock().width_changes
    }
}

impl Surfaces for MemoryHost {
    fn windows(&self) -> HostResult<Vec<WindowId>> {
        Ok(self.state.lock().windows.iter().map(|w| w.id).collect())
    }

    fn buffers(&self) -> HostResult<Vec<BufferId>> {
        Ok(self.state.lock().buffers.iter().map(|b| b.id).collect())
    }

    fn window_buffer(&self, window: WindowId) -> HostResult<BufferId> {
        Ok(self.state.lock().window(window)?.buffer)
    }

    fn buffer_name(&self, buffer: BufferId) -> HostResult<String> {
        Ok(self.state.lock().buffer(buffer)?.name.clone())
    }

    fn file_type(&self, buffer: BufferId) -> HostResult<String> {
        Ok(self.state.lock().buffer(buffer)?.file_type.clone())
    }

    fn set_file_type(&self, buffer: BufferId, file_type: &str) -> HostResult<()> {
        self.state.lock().buffer_mut(buffer)?.file_type = file_type.to_string();
        Ok(())
    }

    fn create_window(&self, side: Side, name: &str) -> HostResult<WindowId> {
        let mut s = self.state.lock();
        if s.refuse_windows {
            return Err(HostError::new("E36: Not enough room"));
        }
        let buffer = s.buffer_named(name);
        let id = WindowId(s.next_id());
        let window = Window {
            id,
            buffer,
            width: 0,
            options: WindowOptions::default(),
            cursor_row: 0,
        };
        match side {
            Side::Left => s.windows.insert(0, window),
            Side::Right => s.windows.push(window),
        }
        s.equalize();
        s.focused = Some(id);
        Ok(id)
    }

    fn focus_window(&self, window: WindowId) -> HostResult<()> {
        let mut s = self.state.lock();
        s.window(window)?;
        s.focused = Some(window);
        Ok(())
    }

    fn set_window_width(&self, window: WindowId, width: usize) -> HostResult<()> {
        let mut s = self.state.lock();
        s.window_mut(window)?.width = width;
        s.width_changes += 1;
        Ok(())
    }

    fn set_window_options(&self, window: WindowId, options: &WindowOptions) -> HostResult<()> {
        self.state.lock().window_mut(window)?.options = options.clone();
        Ok(())
    }

    fn open_path(&self, window: WindowId, path: &Path) -> HostResult<()> {
        let mut s = self.state.lock();
        s.window(window)?;
        let buffer = s.buffer_named(&path.to_string_lossy());
        let w = s.window_mut(window)?;
        w.buffer = buffer;
        w.cursor_row = 0;
        Ok(())
    }

    fn close_window(&self, window: WindowId) -> HostResult<()> {
        let mut s = self.state.lock();
        let buffer = s.window(window)?.buffer;
        let name = &s.buffer(buffer)?.name;
        if s.refuse_close.contains(name) {
            return Err(HostError::new("E444: Cannot close last window"));
        }
        s.windows.retain(|w| w.id != window);
        if s.focused == Some(window) {
            s.focused = s.windows.first().map(|w| w.id);
        }
        Ok(())
    }

    fn buffer_options(&self, buffer: BufferId) -> HostResult<BufferOptions> {
        Ok(self.state.lock().buffer(buffer)?.options.clone())
    }

    fn set_buffer_options(&self, buffer: BufferId, options: &BufferOptions) -> HostResult<()> {
        self.state.lock().buffer_mut(buffer)?.options = options.clone();
        Ok(())
    }

    fn buffer_lines(&self, buffer: BufferId) -> HostResult<Vec<String>> {
        Ok(self.state.lock().buffer(buffer)?.lines.clone())
    }

    fn set_buffer_lines(&self, buffer: BufferId, lines: &[String]) -> HostResult<()> {
        let mut s = self.state.lock();
        if s.refuse_writes {
            return Err(HostError::new("E32: Write refused"));
        }
        let b = s.buffer_mut(buffer)?;
        if !b.options.modifiable {
            return Err(HostError::new(
                "E21: Cannot make changes, 'modifiable' is off",
            ));
        }
        b.lines = lines.to_vec();
        Ok(())
    }

    fn is_focused(&self, buffer: BufferId) -> HostResult<bool> {
        let mut s = self.state.lock();
        match s.focus_queries_left {
            Some(0) => {
                s.focused = None;
                s.focus_queries_left = None;
            }
            Some(n) => s.focus_queries_left = Some(n - 1),
            None => {}
        }
        Ok(s.focused_window().is_ok_and(|w| w.buffer == buffer))
    }

    fn cursor_row(&self) -> HostResult<usize> {
        Ok(self.state.lock().focused_window()?.cursor_row)
    }

    fn set_cursor_row(&self, row: usize) -> HostResult<()> {
        let mut s = self.state.lock();
        let focused = s.focused_window()?.id;
        let buffer = s.window(focused)?.buffer;
        let len = s.buffer(buffer)?.lines.len();
        if row >= len.max(1) {
            return Err(HostError::new(format!(
                "Cursor position outside buffer: row {row}"
            )));
        }
        s.window_mut(focused)?.cursor_row = row;
        Ok(())
    }

    fn variable(&self, name: &str) -> HostResult<Option<String>> {
        Ok(self.state.lock().variables.get(name).cloned())
    }

    fn current_dir(&self) -> HostResult<PathBuf> {
        Ok(self.state.lock().cwd.clone())
    }

    fn set_current_dir(&self, dir: &Path) -> HostResult<()> {
        let mut s = self.state.lock();
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            s.cwd.join(dir)
        };
        s.cwd = dir;
        Ok(())
    }

    fn nearest_directory(&self) -> HostResult<PathBuf> {
        let s = self.state.lock();
        if let Ok(w) = s.focused_window()
            && let Ok(b) = s.buffer(w.buffer)
            && b.options.buf_type == BufType::File
        {
            let path = Path::new(&b.name);
            if path.is_absolute()
                && let Some(parent) = path.parent()
            {
                return Ok(parent.to_path_buf());
            }
        }
        Ok(s.cwd.clone())
    }
}

impl Interaction for MemoryHost {
    fn input_string(
        &self,
        label: &str,
        default: &str,
        completion: Completion,
    ) -> HostResult<Option<String>> {
        let mut s = self.state.lock();
        let record = PromptRecord {
            label: label.to_string(),
            defaults: vec![default.to_string()],
            completion,
        };
        match s.next_answer(record)? {
            Answer::Text(text) => Ok(Some(text)),
            Answer::Cancel => Ok(None),
            other => Err(HostError::new(format!(
                "Scripted answer {other:?} does not fit a string prompt"
            ))),
        }
    }

    fn input_strings(
        &self,
        label: &str,
        defaults: &[String],
        completion: Completion,
    ) -> HostResult<Option<Vec<String>>> {
        let mut s = self.state.lock();
        let record = PromptRecord {
            label: label.to_string(),
            defaults: defaults.to_vec(),
            completion,
        };
        match s.next_answer(record)? {
            Answer::Texts(texts) => Ok(Some(texts)),
            Answer::Text(text) => Ok(Some(vec![text])),
            Answer::Cancel => Ok(None),
            other => Err(HostError::new(format!(
                "Scripted answer {other:?} does not fit a multi-string prompt"
            ))),
        }
    }

    fn input_bool(&self, label: &str) -> HostResult<bool> {
        let mut s = self.state.lock();
        let record = PromptRecord {
            label: label.to_string(),
            defaults: Vec::new(),
            completion: Completion::None,
        };
        match s.next_answer(record)? {
            Answer::Yes => Ok(true),
            Answer::No | Answer::Cancel => Ok(false),
            other => Err(HostError::new(format!(
                "Scripted answer {other:?} does not fit a confirmation"
            ))),
        }
    }

    fn print(&self, message: &str) -> HostResult<()> {
        self.state.lock().messages.push(message.to_string());
        Ok(())
    }

    fn set_yank_register(&self, text: &str) -> HostResult<()> {
        self.state.lock().yank = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_has_focused_scratch_window() {
        let host = MemoryHost::new("/work");
        assert_eq!(host.window_count(), 1);
        let w = host.focused_window().unwrap();
        assert_eq!(host.window_name(w).as_deref(), Some(""));
        assert_eq!(host.window_width(w), Some(COLUMNS));
    }

    #[test]
    fn test_create_window_left_is_first_and_focused() {
        let host = MemoryHost::new("/work");
        let w = host.create_window(Side::Left, "/work/finder-0").unwrap();
        assert_eq!(host.windows().unwrap()[0], w);
        assert_eq!(host.focused_window(), Some(w));
        assert_eq!(host.window_width(w), Some(COLUMNS / 2));
    }

    #[test]
    fn test_split_keeps_fixed_width_windows() {
        let host = MemoryHost::new("/work");
        let pane = host.create_window(Side::Left, "/work/finder-0").unwrap();
        host.set_window_options(pane, &WindowOptions::pane()).unwrap();
        host.set_window_width(pane, 30).unwrap();

        let right = host.create_window(Side::Right, "/work/a.txt").unwrap();
        assert_eq!(host.window_width(pane), Some(30));
        assert_eq!(host.window_width(right), Some((COLUMNS - 30) / 2));
    }

    #[test]
    fn test_refused_window() {
        let host = MemoryHost::new("/work");
        host.refuse_windows(true);
        assert!(host.create_window(Side::Left, "x").is_err());
    }

    #[test]
    fn test_write_requires_modifiable() {
        let host = MemoryHost::new("/work");
        let w = host.create_window(Side::Left, "pane").unwrap();
        let b = host.window_buffer(w).unwrap();
        host.set_buffer_options(b, &BufferOptions::pane()).unwrap();
        assert!(host.set_buffer_lines(b, &["a".to_string()]).is_err());
    }

    #[test]
    fn test_close_moves_focus() {
        let host = MemoryHost::new("/work");
        let first = host.focused_window().unwrap();
        let w = host.create_window(Side::Left, "pane").unwrap();
        host.close_window(w).unwrap();
        assert_eq!(host.focused_window(), Some(first));
        assert!(host.window_buffer(w).is_err());
    }

    #[test]
    fn test_open_path_sets_file_type_from_extension() {
        let host = MemoryHost::new("/work");
        let w = host.focused_window().unwrap();
        host.open_path(w, Path::new("/work/main.rs")).unwrap();
        let b = host.window_buffer(w).unwrap();
        assert_eq!(host.file_type(b).unwrap(), "rs");
        assert_eq!(host.nearest_directory().unwrap(), PathBuf::from("/work"));
    }

    #[test]
    fn test_scripted_answers() {
        let host = MemoryHost::new("/work");
        host.push_answer(Answer::Text("x".to_string()));
        host.push_answer(Answer::Cancel);
        host.push_answer(Answer::Yes);
        assert_eq!(
            host.input_string("a", "", Completion::None).unwrap(),
            Some("x".to_string())
        );
        assert_eq!(host.input_strings("b", &[], Completion::None).unwrap(), None);
        assert!(host.input_bool("c").unwrap());
        assert!(host.input_bool("d").is_err());
        assert_eq!(host.prompts().len(), 4);
    }

    #[test]
    fn test_relative_cd() {
        let host = MemoryHost::new("/work");
        host.set_current_dir(Path::new("src")).unwrap();
        assert_eq!(host.current_dir().unwrap(), PathBuf::from("/work/src"));
    }
}
