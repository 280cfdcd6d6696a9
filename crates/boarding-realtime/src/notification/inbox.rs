//! Notification inbox — the list shown on the notifications page.
//!
//! The inbox holds its own copies of delivered events. Marking an entry read
//! or removing it has no effect on the bus or on other subscribers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use boarding_core::error::AppError;
use boarding_core::types::id::NotificationId;

use super::event::{NotificationCategory, NotificationEvent, ReadState};
use super::listener::{listener, Listener};

/// Bounded, newest-first list of notifications with read tracking.
#[derive(Debug)]
pub struct NotificationInbox {
    /// Entries, newest at the front
    entries: Mutex<VecDeque<NotificationEvent>>,
    /// Maximum retained entries
    max_stored: usize,
}

impl NotificationInbox {
    /// Create an inbox holding at most `max_stored` entries (minimum 1).
    pub fn new(max_stored: usize) -> Self {
        let max_stored = max_stored.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_stored.min(1024))),
            max_stored,
        }
    }

    /// Add an event at the front, evicting the oldest beyond capacity.
    pub fn push(&self, event: NotificationEvent) {
        let mut entries = self.lock();
        entries.push_front(event);
        while entries.len() > self.max_stored {
            if let Some(evicted) = entries.pop_back() {
                tracing::trace!(id = %evicted.id, "Inbox full, evicted oldest notification");
            }
        }
    }

    /// Entries newest first, optionally limited to one category.
    pub fn list(&self, filter: Option<NotificationCategory>) -> Vec<NotificationEvent> {
        self.lock()
            .iter()
            .filter(|e| filter.is_none_or(|c| e.category() == c))
            .cloned()
            .collect()
    }

    /// Look up a single entry.
    pub fn get(&self, id: NotificationId) -> Option<NotificationEvent> {
        self.lock().iter().find(|e| e.id == id).cloned()
    }

    /// Number of unread entries.
    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|e| e.is_unread()).count()
    }

    /// Mark one entry read.
    pub fn mark_read(&self, id: NotificationId) -> Result<(), AppError> {
        let mut entries = self.lock();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
        entry.read_state = ReadState::Read;
        Ok(())
    }

    /// Mark every entry read. Returns how many changed.
    pub fn mark_all_read(&self) -> usize {
        let mut changed = 0;
        for entry in self.lock().iter_mut().filter(|e| e.is_unread()) {
            entry.read_state = ReadState::Read;
            changed += 1;
        }
        changed
    }

    /// Delete one entry and return it.
    pub fn remove(&self, id: NotificationId) -> Result<NotificationEvent, AppError> {
        let mut entries = self.lock();
        let pos = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
        entries
            .remove(pos)
            .ok_or_else(|| AppError::internal("Inbox index out of bounds"))
    }

    /// Delete every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Capacity limit.
    pub fn max_stored(&self) -> usize {
        self.max_stored
    }

    /// A bus listener that pushes every delivered event into this inbox.
    pub fn as_listener(self: &Arc<Self>) -> Listener {
        let inbox = Arc::clone(self);
        listener(move |event: NotificationEvent| {
            inbox.push(event);
            Ok(())
        })
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<NotificationEvent>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
