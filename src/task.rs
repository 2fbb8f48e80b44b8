//! Task model and ordering for the board.
//!
//! A `TaskSet` holds every task in its persisted array order. Each status
//! column keeps a dense `order` sequence `0..n-1`; every mutation here
//! restores that before returning.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Ongoing,
    Current,
    Completed,
}

impl TaskStatus {
    /// Columns in board order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Ongoing,
        TaskStatus::Current,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Ongoing => "ongoing",
            TaskStatus::Current => "current",
            TaskStatus::Completed => "completed",
        }
    }

    /// Column position, left to right.
    pub fn rank(self) -> usize {
        match self {
            TaskStatus::Ongoing => 0,
            TaskStatus::Current => 1,
            TaskStatus::Completed => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid status '{trimmed}' (expected ongoing|current|completed)"
                ))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "deadline_format")]
    pub deadline: Option<NaiveDate>,
    pub order: usize,
}

/// Input for creating a task. The title is trusted to be non-empty here;
/// `board::TaskDraft` does the form-level checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            deadline: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A task that just entered the completed column from another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub task_id: String,
    pub title: String,
}

/// What a move did to the task it found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moved {
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub order: usize,
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap tasks as-is. Callers loading untrusted data should follow up
    /// with `dedupe_ids` and `renormalize_all`.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Tasks in persisted array order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status == status).count()
    }

    /// Tasks of one column sorted by `order`.
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        let mut column: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.status == status)
            .collect();
        column.sort_by_key(|task| task.order);
        column
    }

    /// Append a new task to the end of the ongoing column.
    pub fn create(&mut self, input: NewTask) -> Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Ongoing,
            deadline: input.deadline,
            order: self.count(TaskStatus::Ongoing),
        };
        tracing::debug!(id = %task.id, order = task.order, "created task");
        self.tasks.push(task.clone());
        task
    }

    /// Remove a task and renormalize every column. Returns false when the id
    /// is unknown, in which case nothing changes.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|task| task.id == id) else {
            tracing::debug!(id, "delete ignored, unknown task");
            return false;
        };
        let removed = self.tasks.remove(pos);
        self.renormalize_all();
        tracing::debug!(id, status = %removed.status, "deleted task");
        true
    }

    /// Move a task into `target`, placed before `before` when that id is in
    /// the target column, otherwise at its end.
    ///
    /// Returns `None` for an unknown id, in which case nothing changes.
    pub fn move_task(
        &mut self,
        id: &str,
        target: TaskStatus,
        before: Option<&str>,
    ) -> Option<Moved> {
        let Some(pos) = self.tasks.iter().position(|task| task.id == id) else {
            tracing::debug!(id, "move ignored, unknown task");
            return None;
        };

        let mut moving = self.tasks.remove(pos);
        let origin = moving.status;
        // The origin column is compacted even when target == origin so the
        // reinserted task never collides with a stale order value.
        self.renormalize(origin);

        let (mut column, rest): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.status == target);
        column.sort_by_key(|task| task.order);

        let index = before
            .and_then(|before_id| column.iter().position(|task| task.id == before_id))
            .unwrap_or(column.len());

        moving.status = target;
        let title = moving.title.clone();
        column.insert(index, moving);
        for (order, task) in column.iter_mut().enumerate() {
            task.order = order;
        }

        self.tasks = rest;
        self.tasks.extend(column);
        self.tasks.sort_by_key(|task| (task.status.rank(), task.order));

        tracing::debug!(id, from = %origin, to = %target, order = index, "moved task");

        let completion = (target == TaskStatus::Completed && origin != TaskStatus::Completed)
            .then(|| Completion {
                task_id: id.to_string(),
                title,
            });
        Some(Moved {
            from: origin,
            to: target,
            order: index,
            completion,
        })
    }

    /// Reassign `0..n-1` in every column, keeping each column's relative order.
    pub fn renormalize_all(&mut self) {
        for status in TaskStatus::ALL {
            self.renormalize(status);
        }
    }

    /// Drop tasks whose id was already seen, keeping the first occurrence.
    /// Returns how many were dropped.
    pub fn dedupe_ids(&mut self) -> usize {
        let before = self.tasks.len();
        let mut seen = std::collections::HashSet::new();
        self.tasks.retain(|task| seen.insert(task.id.clone()));
        before - self.tasks.len()
    }

    fn renormalize(&mut self, status: TaskStatus) {
        let mut indices: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.status == status)
            .map(|(idx, _)| idx)
            .collect();
        // Stable: tied orders keep their array position.
        indices.sort_by_key(|&idx| self.tasks[idx].order);
        for (order, idx) in indices.into_iter().enumerate() {
            self.tasks[idx].order = order;
        }
    }
}

/// `YYYY-MM-DD` on the way out; on the way in, RFC 3339 timestamps are
/// accepted too and reduced to their calendar date in local time.
mod deadline_format {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Some(timestamp.with_timezone(&Local).date_naive()))
            .map_err(|err| {
                serde::de::Error::custom(format!("invalid deadline '{trimmed}': {err}"))
            })
    }
}
