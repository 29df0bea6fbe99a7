use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique task identifier. v7 UUIDs are time-ordered, so ids also
/// record creation order without being reusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        TaskId(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable, never reused
    pub id: TaskId,
    /// Display text, stored with `<`/`>` already escaped
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task with a fresh id, stamped now.
    /// `text` must already be validated and escaped.
    pub fn new(text: String) -> Self {
        Task {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// View predicate selecting which tasks a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    /// Filters in tab order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    /// Whether a task passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    /// Next filter in tab order, wrapping
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Previous filter in tab order, wrapping
    pub fn prev(self) -> Filter {
        match self {
            Filter::All => Filter::Completed,
            Filter::Pending => Filter::All,
            Filter::Completed => Filter::Pending,
        }
    }
}

/// Derived list totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Counts {
    /// Tally a task list in one pass.
    pub fn tally(tasks: &[Task]) -> Counts {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Counts {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    /// The count a filter tab displays.
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Completed => self.completed,
        }
    }
}
