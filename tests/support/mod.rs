#![allow(dead_code)]

use taskmaster::events::NotificationLog;
use taskmaster::storage::MemorySlotStore;
use taskmaster::{NewTask, Task, TaskStatus, TaskStore};

pub const SLOT: &str = "taskmaster-tasks";

pub struct TestBoard {
    pub store: TaskStore,
    pub slots: MemorySlotStore,
    pub log: NotificationLog,
}

impl TestBoard {
    pub fn new() -> Self {
        let slots = MemorySlotStore::new();
        let log = NotificationLog::new();
        let store = TaskStore::open(slots.clone(), SLOT).with_notifier(log.clone());
        Self { store, slots, log }
    }

    /// Create a task and move it to the end of `status`.
    pub fn add(&mut self, title: &str, status: TaskStatus) -> Task {
        let task = self.store.create(NewTask::new(title));
        if status != TaskStatus::Ongoing {
            self.store.move_task(&task.id, status, None);
        }
        self.log.drain();
        self.store.get(&task.id).cloned().expect("task exists")
    }

    /// (title, order) pairs of a column in display order.
    pub fn column(&self, status: TaskStatus) -> Vec<(String, usize)> {
        self.store
            .view()
            .column(status)
            .iter()
            .map(|task| (task.title.clone(), task.order))
            .collect()
    }
}

pub fn pairs(items: &[(&str, usize)]) -> Vec<(String, usize)> {
    items
        .iter()
        .map(|(title, order)| (title.to_string(), *order))
        .collect()
}
