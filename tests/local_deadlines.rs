//! Runs alone in its own test binary because it sets `TZ` for the process.

use chrono::NaiveDate;
use taskmaster::storage::{MemorySlotStore, SlotStore};
use taskmaster::TaskStore;

const SLOT: &str = "taskmaster-tasks";

#[test]
fn timestamp_deadlines_land_on_the_local_calendar_day() {
    // Fixed UTC+2, written as a POSIX TZ string so no zoneinfo is needed.
    std::env::set_var("TZ", "CEST-2");

    let slots = MemorySlotStore::new();
    slots
        .save(
            SLOT,
            r#"[
                {"id":"late","title":"Taxes","status":"ongoing","deadline":"2025-04-14T22:00:00.000Z","order":0},
                {"id":"plain","title":"Rent","status":"ongoing","deadline":"2025-04-30","order":1}
            ]"#,
        )
        .expect("seed slot");

    let store = TaskStore::open(slots, SLOT);
    assert_eq!(
        store.get("late").and_then(|task| task.deadline),
        NaiveDate::from_ymd_opt(2025, 4, 15)
    );
    assert_eq!(
        store.get("plain").and_then(|task| task.deadline),
        NaiveDate::from_ymd_opt(2025, 4, 30)
    );
}
