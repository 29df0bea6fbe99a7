use crate::io::storage::{Storage, StorageError};
use crate::model::{Counts, Filter, Task, TaskId};

/// Longest accepted task text, counted in characters after trimming.
pub const MAX_TEXT_LEN: usize = 100;

/// Error type for task-text validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task text is empty")]
    Empty,
    #[error("task text is too long (max {MAX_TEXT_LEN} characters)")]
    TooLong,
    #[error("a task with this text already exists")]
    Duplicate,
}

/// Escape markup-significant characters so stored text is always plain
/// content, never interpreted as markup.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared add/edit validation: trim, reject empty, reject over-length,
/// escape markup, reject case-insensitive duplicates. `editing` excludes
/// that task from the duplicate scan so renaming a task to itself works.
fn validate_text(
    raw: &str,
    tasks: &[Task],
    editing: Option<TaskId>,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong);
    }
    let escaped = escape_markup(trimmed);
    let needle = escaped.to_lowercase();
    let duplicate = tasks
        .iter()
        .any(|t| editing != Some(t.id) && t.text.to_lowercase() == needle);
    if duplicate {
        return Err(ValidationError::Duplicate);
    }
    Ok(escaped)
}

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// Owns the authoritative task list and its persistence backend. Every
/// mutation validates first, applies in memory, then persists. A failed
/// persist never rolls the mutation back; the store keeps running in
/// memory and remembers the failure until a later persist succeeds.
pub struct TaskStore<S: Storage> {
    tasks: Vec<Task>,
    storage: S,
    last_error: Option<StorageError>,
}

impl<S: Storage> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        TaskStore {
            tasks: Vec::new(),
            storage,
            last_error: None,
        }
    }

    /// Load the persisted list, replacing the in-memory one. Unreadable or
    /// corrupt data leaves an empty, fully usable store and returns the
    /// error so the caller can mention it.
    pub fn load(&mut self) -> Result<(), StorageError> {
        match self.storage.load() {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                self.tasks = Vec::new();
                Err(e)
            }
        }
    }

    /// Add a new task at the front of the list (newest first).
    /// Returns the new task's id.
    pub fn add(&mut self, text: &str) -> Result<TaskId, ValidationError> {
        let text = validate_text(text, &self.tasks, None)?;
        let task = Task::new(text);
        let id = task.id;
        self.tasks.insert(0, task);
        self.persist();
        Ok(id)
    }

    /// Flip a task's completed flag. Returns the new value, or None for a
    /// stale id (benign no-op).
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();
        Some(completed)
    }

    /// Replace a task's text, validated like `add` except the task itself
    /// is excluded from the duplicate scan. Returns Ok(false) for a stale
    /// id without touching anything.
    pub fn edit(&mut self, id: TaskId, new_text: &str) -> Result<bool, ValidationError> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        let text = validate_text(new_text, &self.tasks, Some(id))?;
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = text;
            self.persist();
        }
        Ok(true)
    }

    /// Delete a task. Returns the removed task so callers can show its
    /// text, or None for a stale id.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(pos);
        self.persist();
        Some(task)
    }

    /// Delete every completed task. Returns how many were removed; 0 means
    /// nothing changed and nothing was persisted.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Tasks passing `filter`, in store order (newest first).
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Current totals.
    pub fn counts(&self) -> Counts {
        Counts::tally(&self.tasks)
    }

    /// The whole list, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up one task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The persistence failure the store is currently degraded by, if any.
    /// None means the last save (or load) worked.
    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    fn persist(&mut self) {
        match self.storage.save(&self.tasks) {
            Ok(()) => self.last_error = None,
            Err(e) => self.last_error = Some(e),
        }
    }
}
