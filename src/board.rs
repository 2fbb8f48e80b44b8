//! Gesture handling for a board UI.
//!
//! `Board` turns clicks and drag-and-drop gestures into store operations and
//! keeps the transient drag state (which card is held, which column is
//! highlighted) that a renderer needs.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{NewTask, Task, TaskStatus};
use crate::view::BoardView;

/// Raw contents of the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Trim the fields and require a title. A blank description is dropped.
    pub fn validate(&self) -> Result<NewTask> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidArgument("Title is required".to_string()));
        }
        let description = self.description.trim();
        Ok(NewTask {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            deadline: self.deadline,
        })
    }
}

pub struct Board {
    store: TaskStore,
    dragging: Option<String>,
    drag_over: Option<TaskStatus>,
}

impl Board {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            dragging: None,
            drag_over: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn view(&self) -> BoardView {
        self.store.view()
    }

    /// Submit the new-task form.
    pub fn create_task(&mut self, draft: &TaskDraft) -> Result<Task> {
        let input = draft.validate()?;
        Ok(self.store.create(input))
    }

    pub fn delete_task(&mut self, id: &str) {
        if self.dragging.as_deref() == Some(id) {
            self.drag_end();
        }
        self.store.delete(id);
    }

    pub fn drag_start(&mut self, id: &str) {
        self.dragging = Some(id.to_string());
    }

    pub fn drag_over_column(&mut self, status: TaskStatus) {
        self.drag_over = Some(status);
    }

    /// Drop the held card on a column, before `before` when the drop landed
    /// on a card. Ends the drag either way.
    pub fn drop_on_column(&mut self, status: TaskStatus, before: Option<&str>) {
        let Some(id) = self.dragging.take() else {
            tracing::debug!(column = %status, "drop without an active drag");
            self.drag_end();
            return;
        };
        self.store.move_task(&id, status, before);
        self.drag_end();
    }

    pub fn drag_end(&mut self) {
        self.dragging = None;
        self.drag_over = None;
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn drag_over(&self) -> Option<TaskStatus> {
        self.drag_over
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NotificationLog;

    fn board() -> (Board, NotificationLog) {
        let log = NotificationLog::new();
        let store = TaskStore::in_memory().with_notifier(log.clone());
        (Board::new(store), log)
    }

    #[test]
    fn draft_requires_title() {
        let err = TaskDraft::new("   ").validate().expect_err("blank title");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn draft_trims_and_drops_blank_description() {
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 31).expect("date");
        let input = TaskDraft::new("  Pay rent ")
            .description("  ")
            .deadline(deadline)
            .validate()
            .expect("valid");
        assert_eq!(input.title, "Pay rent");
        assert!(input.description.is_none());
        assert_eq!(input.deadline, Some(deadline));
    }

    #[test]
    fn rejected_draft_creates_nothing() {
        let (mut board, _log) = board();
        assert!(board.create_task(&TaskDraft::default()).is_err());
        assert_eq!(board.view().total(), 0);
    }

    #[test]
    fn drag_and_drop_moves_held_card() {
        let (mut board, log) = board();
        let first = board.create_task(&TaskDraft::new("First")).expect("create");
        let second = board.create_task(&TaskDraft::new("Second")).expect("create");

        board.drag_start(&second.id);
        assert!(board.is_dragging(&second.id));
        board.drag_over_column(TaskStatus::Completed);
        assert_eq!(board.drag_over(), Some(TaskStatus::Completed));

        board.drop_on_column(TaskStatus::Completed, None);
        assert!(board.dragging().is_none());
        assert!(board.drag_over().is_none());

        let view = board.view();
        assert_eq!(view.ongoing.len(), 1);
        assert_eq!(view.ongoing[0].id, first.id);
        assert_eq!(view.completed[0].id, second.id);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn drop_on_card_places_before_it() {
        let (mut board, _log) = board();
        let a = board.create_task(&TaskDraft::new("A")).expect("create");
        let b = board.create_task(&TaskDraft::new("B")).expect("create");

        board.drag_start(&b.id);
        board.drop_on_column(TaskStatus::Ongoing, Some(&a.id));

        let ids: Vec<String> = board.view().ongoing.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn drop_without_drag_is_ignored() {
        let (mut board, _log) = board();
        let task = board.create_task(&TaskDraft::new("Idle")).expect("create");
        board.drag_over_column(TaskStatus::Current);

        board.drop_on_column(TaskStatus::Current, None);
        assert_eq!(board.store().get(&task.id).map(|t| t.status), Some(TaskStatus::Ongoing));
        assert!(board.drag_over().is_none());
    }

    #[test]
    fn drag_end_cancels_drag() {
        let (mut board, _log) = board();
        let task = board.create_task(&TaskDraft::new("Held")).expect("create");
        board.drag_start(&task.id);
        board.drag_end();

        board.drop_on_column(TaskStatus::Completed, None);
        assert!(board.view().completed.is_empty());
    }

    #[test]
    fn deleting_held_card_ends_drag() {
        let (mut board, _log) = board();
        let task = board.create_task(&TaskDraft::new("Gone")).expect("create");
        board.drag_start(&task.id);
        board.delete_task(&task.id);
        assert!(board.dragging().is_none());
        assert_eq!(board.view().total(), 0);
    }
}
