//! taskmaster - task board engine
//!
//! A single-user board with three fixed columns (ongoing, current,
//! completed). Cards are created at the end of the ongoing column, moved by
//! drag-and-drop and deleted; each column keeps a dense `order` sequence
//! `0..n-1` through every mutation.
//!
//! # Module Organization
//!
//! - `task`: Task model and the ordering engine (`TaskSet`)
//! - `store`: `TaskStore`, the board backed by a persistence slot
//! - `storage`: Key-value slot stores (file and in-memory)
//! - `events`: Completion notifications and notifiers
//! - `board`: Gesture handling (form submit, drag and drop)
//! - `view`: Column projection, labels and the ordering checker
//! - `config`: Configuration loading from `.taskmaster.toml`
//! - `error`: Error types and result aliases
//! - `logging`: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use board::{Board, TaskDraft};
pub use error::{Error, Result};
pub use store::TaskStore;
pub use task::{Moved, NewTask, Task, TaskSet, TaskStatus};
pub use view::BoardView;
