//! The task store: in-memory board backed by a persistence slot.
//!
//! The board is read from the slot once, when the store opens. After that
//! the in-memory copy is authoritative: every mutation rewrites the slot
//! and reads never go back to it. Save failures are logged, not returned.

use crate::config::{Config, DEFAULT_SLOT};
use crate::events::{Notification, Notifier, TracingNotifier};
use crate::storage::{self, FileSlotStore, MemorySlotStore, SlotStore};
use crate::task::{NewTask, Task, TaskSet, TaskStatus};
use crate::view::{self, BoardView};

pub struct TaskStore {
    tasks: TaskSet,
    slots: Box<dyn SlotStore>,
    slot: String,
    notifier: Box<dyn Notifier>,
    notify_completions: bool,
}

impl TaskStore {
    /// Open the board held in `slot`, starting empty if the slot is missing
    /// or unreadable.
    pub fn open(slots: impl SlotStore + 'static, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let tasks = load_task_set(&slots, &slot);
        Self {
            tasks,
            slots: Box::new(slots),
            slot,
            notifier: Box::new(TracingNotifier),
            notify_completions: true,
        }
    }

    /// Open the board described by a config: file-backed slot in the
    /// configured data directory.
    pub fn open_with_config(config: &Config) -> Self {
        let slots = FileSlotStore::new(config.storage.resolve_dir());
        Self::open(slots, config.storage.slot.clone())
            .with_notifications(config.notifications.enabled)
    }

    /// An empty board that persists to process memory only.
    pub fn in_memory() -> Self {
        Self::open(MemorySlotStore::new(), DEFAULT_SLOT)
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notify_completions = enabled;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks partitioned by column and sorted by order.
    pub fn view(&self) -> BoardView {
        BoardView::from_tasks(self.tasks.tasks())
    }

    pub fn create(&mut self, input: NewTask) -> Task {
        let task = self.tasks.create(input);
        self.persist();
        task
    }

    pub fn delete(&mut self, id: &str) {
        if self.tasks.delete(id) {
            self.persist();
        }
    }

    pub fn move_task(&mut self, id: &str, target: TaskStatus, before: Option<&str>) {
        let Some(moved) = self.tasks.move_task(id, target, before) else {
            return;
        };
        self.persist();

        if let Some(completion) = moved.completion {
            if self.notify_completions {
                self.notifier.notify(&Notification::completed(&completion));
            }
        }
    }

    fn persist(&self) {
        let result = storage::write_tasks(self.slots.as_ref(), &self.slot, self.tasks.tasks());
        if let Err(err) = result {
            tracing::error!(slot = %self.slot, error = %err, "failed to save tasks");
        }
    }
}

/// Read a board from a slot. Missing, unreadable or malformed data yields an
/// empty board; duplicate ids and broken orders are repaired.
pub fn load_task_set(slots: &dyn SlotStore, slot: &str) -> TaskSet {
    let tasks = match storage::read_tasks(slots, slot) {
        Ok(Some(tasks)) => tasks,
        Ok(None) => {
            tracing::debug!(slot, "slot empty, starting with no tasks");
            return TaskSet::new();
        }
        Err(err) => {
            tracing::warn!(slot, error = %err, "unreadable task data, starting with no tasks");
            return TaskSet::new();
        }
    };

    let mut set = TaskSet::from_tasks(tasks);
    if let Err(err) = view::check_dense(set.tasks()) {
        tracing::warn!(slot, error = %err, "repairing persisted task order");
        let dropped = set.dedupe_ids();
        if dropped > 0 {
            tracing::warn!(slot, dropped, "dropped tasks with duplicate ids");
        }
        set.renormalize_all();
    }
    tracing::debug!(slot, tasks = set.len(), "loaded tasks");
    set
}
