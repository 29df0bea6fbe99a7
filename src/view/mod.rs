pub mod notify;

pub use notify::{Notification, Notifications, Severity};

use std::time::Instant;

use crate::io::storage::Storage;
use crate::model::{Config, Counts, Filter, Task, TaskId};
use crate::store::{TaskStore, ValidationError};

const MSG_TASK_ADDED: &str = "Task added successfully!";
const MSG_EMPTY_ADD: &str = "Please enter a task!";
const MSG_EMPTY_EDIT: &str = "Task text cannot be empty!";
const MSG_TOO_LONG: &str = "Task text is too long (max 100 characters)";
const MSG_DUPLICATE: &str = "This task already exists!";
const MSG_COMPLETED: &str = "Task completed!";
const MSG_PENDING: &str = "Task marked as pending";
const MSG_UPDATED: &str = "Task updated!";
const MSG_DELETED: &str = "Task deleted!";
const MSG_NOTHING_TO_CLEAR: &str = "No completed tasks to clear";
const MSG_LOAD_FAILED: &str = "Couldn't load saved tasks (starting fresh)";
const MSG_SAVE_FAILED: &str = "Couldn't save your tasks (changes kept for this session)";

/// A staged destructive action awaiting confirmation. Single slot:
/// staging a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    /// Delete one task; carries the text shown in the prompt.
    Delete { id: TaskId, preview: String },
    /// Remove all completed tasks; carries how many that is right now.
    ClearCompleted { count: usize },
}

/// One render pass worth of state: everything a presentation layer needs,
/// nothing it can mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Tasks under the active filter, newest first
    pub rows: Vec<Task>,
    pub counts: Counts,
    pub filter: Filter,
    pub pending_edit: Option<TaskId>,
    pub confirm: Option<PendingConfirm>,
}

// ---------------------------------------------------------------------------
// ViewController
// ---------------------------------------------------------------------------

/// Sequences user intents against the store and owns the transient UI
/// state the store knows nothing about: the active filter, the open edit
/// session, the staged confirmation, and the toast queue. Presentation
/// layers call intents and render `snapshot()`; they hold no task state.
pub struct ViewController<S: Storage> {
    store: TaskStore<S>,
    filter: Filter,
    pending_edit: Option<TaskId>,
    confirm: Option<PendingConfirm>,
    notifications: Notifications,
    /// Whether the current degraded-persistence episode has been toasted
    storage_warned: bool,
}

impl<S: Storage> ViewController<S> {
    pub fn new(store: TaskStore<S>, config: &Config) -> Self {
        ViewController {
            store,
            filter: Filter::default(),
            pending_edit: None,
            confirm: None,
            notifications: Notifications::from_config(&config.toasts),
            storage_warned: false,
        }
    }

    /// Load persisted tasks. An unreadable or corrupt file starts an empty
    /// session and says so once; it never blocks startup.
    pub fn load(&mut self) {
        if let Err(e) = self.store.load() {
            eprintln!("warning: {}", e);
            self.notify(MSG_LOAD_FAILED, Severity::Error);
        }
    }

    // --- add ---

    /// Returns true when the task was added, so the caller clears its
    /// input field. On failure the input stays as typed.
    pub fn submit_new_task(&mut self, raw: &str) -> bool {
        match self.store.add(raw) {
            Ok(_) => {
                self.notify(MSG_TASK_ADDED, Severity::Success);
                self.report_storage();
                true
            }
            Err(e) => {
                self.notify(add_error_message(e), Severity::Error);
                false
            }
        }
    }

    // --- toggle ---

    pub fn toggle_task(&mut self, id: TaskId) {
        match self.store.toggle(id) {
            Some(true) => self.notify(MSG_COMPLETED, Severity::Success),
            Some(false) => self.notify(MSG_PENDING, Severity::Info),
            // Stale id: the task is already gone, stay quiet
            None => return,
        }
        self.report_storage();
    }

    // --- edit session ---

    /// Start (or restart) an edit session. Returns the current text for
    /// prefilling the editor, or None for a stale id.
    pub fn request_edit(&mut self, id: TaskId) -> Option<String> {
        let text = self.store.get(id)?.text.clone();
        self.pending_edit = Some(id);
        Some(text)
    }

    /// Commit the open edit session. Returns true when the session is
    /// finished, false when validation failed and the session stays open
    /// for a retry.
    pub fn commit_edit(&mut self, new_text: &str) -> bool {
        let Some(id) = self.pending_edit else {
            return true;
        };
        match self.store.edit(id, new_text) {
            Ok(true) => {
                self.pending_edit = None;
                self.notify(MSG_UPDATED, Severity::Success);
                self.report_storage();
                true
            }
            Ok(false) => {
                // The task vanished under the session; nothing to say
                self.pending_edit = None;
                true
            }
            Err(e) => {
                self.notify(edit_error_message(e), Severity::Error);
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.pending_edit = None;
    }

    // --- delete ---

    /// Stage a delete confirmation, replacing any staged action. Returns
    /// the task's text as a preview, or None for a stale id.
    pub fn request_delete(&mut self, id: TaskId) -> Option<String> {
        let preview = self.store.get(id)?.text.clone();
        self.confirm = Some(PendingConfirm::Delete {
            id,
            preview: preview.clone(),
        });
        Some(preview)
    }

    pub fn confirm_delete(&mut self) {
        if let Some(PendingConfirm::Delete { id, .. }) = &self.confirm {
            let id = *id;
            self.confirm = None;
            if self.store.remove(id).is_some() {
                self.notify(MSG_DELETED, Severity::Info);
                self.report_storage();
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.confirm, Some(PendingConfirm::Delete { .. })) {
            self.confirm = None;
        }
    }

    // --- clear completed ---

    /// Stage a clear-completed confirmation. With nothing to clear this
    /// stages nothing and says so. Returns whether it staged.
    pub fn request_clear_completed(&mut self) -> bool {
        let count = self.store.counts().completed;
        if count == 0 {
            self.notify(MSG_NOTHING_TO_CLEAR, Severity::Info);
            return false;
        }
        self.confirm = Some(PendingConfirm::ClearCompleted { count });
        true
    }

    pub fn confirm_clear_completed(&mut self) {
        if matches!(self.confirm, Some(PendingConfirm::ClearCompleted { .. })) {
            self.confirm = None;
            let removed = self.store.clear_completed();
            let message = if removed == 1 {
                "Cleared 1 completed task".to_string()
            } else {
                format!("Cleared {} completed tasks", removed)
            };
            self.notify(&message, Severity::Success);
            self.report_storage();
        }
    }

    pub fn cancel_clear_completed(&mut self) {
        if matches!(self.confirm, Some(PendingConfirm::ClearCompleted { .. })) {
            self.confirm = None;
        }
    }

    /// Resolve the staged confirmation, whichever kind it is.
    pub fn confirm_pending(&mut self) {
        match &self.confirm {
            Some(PendingConfirm::Delete { .. }) => self.confirm_delete(),
            Some(PendingConfirm::ClearCompleted { .. }) => self.confirm_clear_completed(),
            None => {}
        }
    }

    /// Abandon the staged confirmation, whichever kind it is.
    pub fn cancel_pending(&mut self) {
        self.confirm = None;
    }

    // --- view state ---

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Assemble the view-model for one render pass.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self
                .store
                .filtered(self.filter)
                .into_iter()
                .cloned()
                .collect(),
            counts: self.store.counts(),
            filter: self.filter,
            pending_edit: self.pending_edit,
            confirm: self.confirm.clone(),
        }
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Expire old toasts. Call once per frame.
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    // --- internals ---

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifications.push(message, severity, Instant::now());
    }

    /// Surface a degraded-persistence episode once. A successful persist
    /// ends the episode, so the next failure warns again.
    fn report_storage(&mut self) {
        match self.store.last_error() {
            Some(e) if !self.storage_warned => {
                eprintln!("warning: {}", e);
                self.notify(MSG_SAVE_FAILED, Severity::Error);
                self.storage_warned = true;
            }
            Some(_) => {}
            None => self.storage_warned = false,
        }
    }
}

fn add_error_message(e: ValidationError) -> &'static str {
    match e {
        ValidationError::Empty => MSG_EMPTY_ADD,
        ValidationError::TooLong => MSG_TOO_LONG,
        ValidationError::Duplicate => MSG_DUPLICATE,
    }
}

fn edit_error_message(e: ValidationError) -> &'static str {
    match e {
        ValidationError::Empty => MSG_EMPTY_EDIT,
        ValidationError::TooLong => MSG_TOO_LONG,
        ValidationError::Duplicate => MSG_DUPLICATE,
    }
}
