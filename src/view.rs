//! Read-side projection of the board.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Task, TaskStatus};

pub const EMPTY_COLUMN_PLACEHOLDER: &str = "No tasks here yet.";

impl TaskStatus {
    /// Column heading shown on the board.
    pub fn title(self) -> &'static str {
        match self {
            TaskStatus::Ongoing => "Ongoing",
            TaskStatus::Current => "Current",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Tasks partitioned by column, each column sorted by `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub ongoing: Vec<Task>,
    pub current: Vec<Task>,
    pub completed: Vec<Task>,
}

impl BoardView {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let column = |status: TaskStatus| {
            let mut column: Vec<Task> = tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect();
            column.sort_by_key(|task| task.order);
            column
        };
        Self {
            ongoing: column(TaskStatus::Ongoing),
            current: column(TaskStatus::Current),
            completed: column(TaskStatus::Completed),
        }
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Ongoing => &self.ongoing,
            TaskStatus::Current => &self.current,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Columns in board order, paired with their status.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Text to render in place of cards when a column has none.
    pub fn placeholder(&self, status: TaskStatus) -> Option<&'static str> {
        self.column(status)
            .is_empty()
            .then_some(EMPTY_COLUMN_PLACEHOLDER)
    }

    pub fn total(&self) -> usize {
        self.ongoing.len() + self.current.len() + self.completed.len()
    }
}

/// `Deadline: Mar 5, 2025`
pub fn deadline_label(deadline: NaiveDate) -> String {
    format!("Deadline: {}", deadline.format("%b %-d, %Y"))
}

/// Check that ids are unique and every column's orders are exactly `0..n-1`.
pub fn check_dense(tasks: &[Task]) -> Result<()> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(Error::DuplicateId(task.id.clone()));
        }
    }

    for status in TaskStatus::ALL {
        let mut orders: Vec<usize> = tasks
            .iter()
            .filter(|task| task.status == status)
            .map(|task| task.order)
            .collect();
        orders.sort_unstable();
        for (expected, found) in orders.into_iter().enumerate() {
            if expected != found {
                return Err(Error::DenseOrderViolated {
                    status,
                    expected,
                    found,
                });
            }
        }
    }
    Ok(())
}
