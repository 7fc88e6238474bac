//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Tasks and
//! countdowns are separate fields so a countdown tick does not re-render
//! the list.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::countdown::{CountdownBoard, CountdownState};
use crate::models::{NewTask, StoredTask, TaskId};
use crate::task_list::TaskList;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Ordered tasks
    pub tasks: TaskList,
    /// Running and elapsed countdowns, by task id
    pub countdowns: CountdownBoard,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// What a countdown tick produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The countdown just ended; carries the task text for the notification
    Elapsed { text: String },
}

// ========================
// Store Helper Functions
// ========================

/// Append a task and set up its countdown, returning its id
pub fn store_add_task(store: &AppStore, draft: NewTask) -> TaskId {
    let timer = draft.timer_minutes;
    let id = store.tasks().write().add(draft);
    if let Some(minutes) = timer {
        store.countdowns().write().start(id, minutes);
    }
    id
}

/// Remove a task and its countdown by ID. Returns whether it existed.
pub fn store_remove_task(store: &AppStore, task_id: TaskId) -> bool {
    store.countdowns().write().remove(task_id);
    store.tasks().write().remove(task_id).is_some()
}

/// Flip a task's completion by ID
pub fn store_toggle_task(store: &AppStore, task_id: TaskId) -> Option<bool> {
    store.tasks().write().toggle(task_id)
}

/// Place `dragged` right after `target`
pub fn store_move_task(store: &AppStore, dragged: TaskId, target: TaskId) -> bool {
    store.tasks().write().move_after(dragged, target)
}

/// Append tasks loaded from storage, returning the ids with countdowns to run
pub fn store_restore_tasks(store: &AppStore, records: Vec<StoredTask>) -> Vec<TaskId> {
    let timed: Vec<(TaskId, u32)> = {
        let tasks_field = store.tasks();
        let mut tasks = tasks_field.write();
        let restored = tasks.restore(records);
        restored
            .into_iter()
            .filter_map(|id| Some((id, tasks.get(id)?.timer_minutes?)))
            .collect()
    };

    // One store guard at a time: both fields share the same lock
    let countdowns_field = store.countdowns();
    let mut countdowns = countdowns_field.write();
    timed
        .into_iter()
        .map(|(id, minutes)| {
            countdowns.start(id, minutes);
            id
        })
        .collect()
}

/// Advance one task's countdown by a second.
///
/// `None` means there is nothing left to tick: the task is gone, has no
/// timer, or its countdown already ended.
pub fn store_tick_countdown(store: &AppStore, task_id: TaskId) -> Option<TickOutcome> {
    let state = store.countdowns().write().tick(task_id)?;
    match state {
        CountdownState::Running => Some(TickOutcome::Running),
        CountdownState::Elapsed => {
            let text = store
                .tasks()
                .read_untracked()
                .get(task_id)
                .map(|t| t.text.clone())
                .unwrap_or_default();
            Some(TickOutcome::Elapsed { text })
        }
    }
}

/// Snapshot of the list in its persisted form
pub fn store_records(store: &AppStore) -> Vec<StoredTask> {
    store.tasks().read_untracked().to_records()
}
