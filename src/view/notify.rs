use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::ToastConfig;

/// How important a toast is. Also picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub posted_at: Instant,
}

/// FIFO queue of transient messages with a fixed time-to-live and a cap
/// on how many show at once (oldest evicted first). Time is passed in
/// explicitly so tests never sleep.
#[derive(Debug)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    ttl: Duration,
    max_visible: usize,
}

impl Notifications {
    pub fn new(ttl: Duration, max_visible: usize) -> Self {
        Notifications {
            queue: VecDeque::new(),
            ttl,
            max_visible,
        }
    }

    pub fn from_config(config: &ToastConfig) -> Self {
        Self::new(
            Duration::from_millis(config.duration_ms),
            config.max_visible,
        )
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.queue.push_back(Notification {
            message: message.into(),
            severity,
            posted_at: now,
        });
        while self.queue.len() > self.max_visible {
            self.queue.pop_front();
        }
    }

    /// Drop messages past their time-to-live. Call once per frame.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.queue
            .retain(|n| now.duration_since(n.posted_at) < ttl);
    }

    /// Messages still showing, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
