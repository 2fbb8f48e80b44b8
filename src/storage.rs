//! Persistence slot for the board
//!
//! The board lives in a single named slot of a key-value store. The slot
//! holds a JSON array of task records:
//!
//! ```text
//! <data dir>/                   # StorageConfig::resolve_dir()
//!   taskmaster-tasks.json       # the slot (pretty JSON array of tasks)
//! ```
//!
//! File slots are replaced by writing a sibling temp file and renaming it
//! over the slot, so a reader sees either the old board or the new one.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::validate_slot_name;
use crate::error::{Error, Result};
use crate::task::Task;

/// A key-value store addressed by slot name.
pub trait SlotStore {
    /// Raw contents of a slot, `None` when it was never written.
    fn load(&self, slot: &str) -> Result<Option<String>>;

    /// Replace the contents of a slot.
    fn save(&self, slot: &str, contents: &str) -> Result<()>;
}

/// One JSON file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot_name(slot).map_err(|err| Error::InvalidArgument(err.to_string()))?;
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl SlotStore for FileSlotStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn save(&self, slot: &str, contents: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        replace_file(&path, contents.as_bytes())
    }
}

/// Write `<slot>.json.tmp` next to the slot, then rename it into place.
fn replace_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");
    let mut temp = fs::File::create(&temp_path)?;
    temp.write_all(data)?;
    temp.sync_all()?;
    drop(temp);
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// In-process slots. Clones share the same map, so a caller can keep a
/// handle after giving one to a `TaskStore`.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a slot, bypassing the trait.
    pub fn get(&self, slot: &str) -> Option<String> {
        self.slots().get(slot).cloned()
    }

    /// Seed a slot directly.
    pub fn insert(&self, slot: &str, contents: impl Into<String>) {
        self.slots().insert(slot.to_string(), contents.into());
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SlotStore for MemorySlotStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.get(slot))
    }

    fn save(&self, slot: &str, contents: &str) -> Result<()> {
        self.insert(slot, contents);
        Ok(())
    }
}

/// Serialize the full task array for a slot.
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse a slot's contents. Blank contents count as an empty board.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Read and parse a slot. `Ok(None)` when the slot is absent.
pub fn read_tasks(store: &dyn SlotStore, slot: &str) -> Result<Option<Vec<Task>>> {
    match store.load(slot)? {
        Some(raw) => decode_tasks(&raw).map(Some),
        None => Ok(None),
    }
}

/// Serialize and write the task array to a slot.
pub fn write_tasks(store: &dyn SlotStore, slot: &str, tasks: &[Task]) -> Result<()> {
    let encoded = encode_tasks(tasks)?;
    store.save(slot, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use tempfile::tempdir;

    fn sample() -> Vec<Task> {
        vec![Task {
            id: "a".to_string(),
            title: "Plan sprint".to_string(),
            description: Some("with the team".to_string()),
            status: TaskStatus::Current,
            deadline: None,
            order: 0,
        }]
    }

    #[test]
    fn file_store_round_trips_slot() {
        let dir = tempdir().expect("tempdir");
        let store = FileSlotStore::new(dir.path().join("data"));

        assert!(store.load("board").expect("load").is_none());
        write_tasks(&store, "board", &sample()).expect("write");

        let path = store.slot_path("board").expect("path");
        assert!(path.ends_with("data/board.json"));
        assert!(path.exists());

        let tasks = read_tasks(&store, "board").expect("read").expect("present");
        assert_eq!(tasks, sample());
    }

    #[test]
    fn file_store_overwrite_leaves_no_temp_file() {
        let dir = tempdir().expect("tempdir");
        let store = FileSlotStore::new(dir.path());
        store.save("board", "[]").expect("first save");
        store.save("board", "[ ]").expect("second save");

        assert_eq!(store.load("board").expect("load").as_deref(), Some("[ ]"));
        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["board.json".to_string()]);
    }

    #[test]
    fn file_store_rejects_path_like_slots() {
        let dir = tempdir().expect("tempdir");
        let store = FileSlotStore::new(dir.path());
        let err = store.save("../escape", "[]").expect_err("invalid slot");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn memory_store_clones_share_slots() {
        let store = MemorySlotStore::new();
        let handle = store.clone();
        store.save("board", "[]").expect("save");
        assert_eq!(handle.get("board").as_deref(), Some("[]"));
    }

    #[test]
    fn decode_blank_is_empty() {
        assert!(decode_tasks("  \n").expect("decode").is_empty());
    }

    #[test]
    fn decode_rejects_non_array() {
        assert!(matches!(decode_tasks("{\"id\":1}"), Err(Error::Json(_))));
        assert!(decode_tasks("not json").is_err());
    }

    #[test]
    fn encoded_records_use_wire_field_names() {
        let encoded = encode_tasks(&sample()).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
        let record = &value[0];
        assert_eq!(record["id"], "a");
        assert_eq!(record["title"], "Plan sprint");
        assert_eq!(record["description"], "with the team");
        assert_eq!(record["status"], "current");
        assert_eq!(record["order"], 0);
        assert!(record.get("deadline").is_none());
    }
}
