//! Task Commands
//!
//! Every user action goes through here: mutate the store, keep the
//! countdown loops in step, then save the whole list.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::{NewTask, TaskId};
use crate::store::{
    store_add_task, store_move_task, store_records, store_remove_task, store_restore_tasks,
    store_toggle_task, AppStore,
};

/// Write the current list to storage, logging rather than surfacing failures
fn persist(ctx: &AppContext, store: &AppStore) {
    let records = store_records(store);
    if let Err(e) = ctx.repository.with_value(|repo| repo.save(&records)) {
        log::error!("[STORE] failed to save tasks: {}", e);
    }
}

fn run_countdown(ctx: &AppContext, store: &AppStore, id: TaskId) {
    (ctx.spawner)(*ctx, *store, id);
}

/// Load saved tasks and restart their countdowns
pub fn load_tasks(ctx: AppContext, store: AppStore) {
    let records = ctx.repository.with_value(|repo| repo.load());
    for id in store_restore_tasks(&store, records) {
        run_countdown(&ctx, &store, id);
    }
}

pub fn create_task(ctx: AppContext, store: AppStore, draft: NewTask) -> TaskId {
    let has_timer = draft.timer_minutes.is_some();
    let id = store_add_task(&store, draft);
    log::debug!("[APP] created task {}", id);
    if has_timer {
        run_countdown(&ctx, &store, id);
    }
    persist(&ctx, &store);
    id
}

/// Stop the task's countdown, then drop it from the list
pub fn delete_task(ctx: AppContext, store: AppStore, id: TaskId) {
    ctx.timers.update_value(|t| {
        t.cancel(id);
    });
    if store_remove_task(&store, id) {
        log::debug!("[APP] deleted task {}", id);
        persist(&ctx, &store);
    }
}

pub fn toggle_task(ctx: AppContext, store: AppStore, id: TaskId) {
    if store_toggle_task(&store, id).is_some() {
        persist(&ctx, &store);
    }
}

/// Drop `dragged` immediately after `target`
pub fn move_task(ctx: AppContext, store: AppStore, dragged: TaskId, target: TaskId) {
    if store_move_task(&store, dragged, target) {
        log::debug!("[DND] moved task {} after {}", dragged, target);
        persist(&ctx, &store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::Arc;

    use futures::executor::block_on;
    use futures::future::{pending, AbortHandle, AbortRegistration, Abortable};
    use reactive_stores::Store;
    use serde_json::{json, Value};

    use crate::config::WidgetConfig;
    use crate::repository::{MemoryTaskRepository, TaskRepository};
    use crate::store::{store_tick_countdown, AppState, AppStateStoreFields};

    thread_local! {
        static SPAWNED: RefCell<Vec<(TaskId, AbortRegistration)>> = RefCell::new(Vec::new());
    }

    /// Registers a cancellable countdown without running it
    fn record_countdown(ctx: AppContext, _store: AppStore, id: TaskId) {
        let (handle, registration) = AbortHandle::new_pair();
        ctx.timers.update_value(|t| t.register(id, handle));
        SPAWNED.with(|s| s.borrow_mut().push((id, registration)));
    }

    fn spawned_ids() -> Vec<TaskId> {
        SPAWNED.with(|s| s.borrow().iter().map(|(id, _)| *id).collect())
    }

    fn take_registration(id: TaskId) -> AbortRegistration {
        SPAWNED.with(|s| {
            let mut spawned = s.borrow_mut();
            let index = spawned.iter().position(|(spawned_id, _)| *spawned_id == id).unwrap();
            spawned.remove(index).1
        })
    }

    fn with_repo(repo: Arc<MemoryTaskRepository>, test: impl FnOnce(AppContext, AppStore, Arc<MemoryTaskRepository>)) {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppContext::with_services(WidgetConfig::default(), repo.clone(), record_countdown);
            test(ctx, Store::new(AppState::default()), repo)
        });
    }

    fn with_app(test: impl FnOnce(AppContext, AppStore, Arc<MemoryTaskRepository>)) {
        with_repo(Arc::new(MemoryTaskRepository::default()), test)
    }

    fn saved_texts(repo: &MemoryTaskRepository) -> Vec<String> {
        match repo.json() {
            Value::Array(tasks) => tasks.iter().map(|t| t["text"].as_str().unwrap().to_string()).collect(),
            other => panic!("nothing saved: {}", other),
        }
    }

    #[test]
    fn test_create_saves_list() {
        with_app(|ctx, store, repo| {
            create_task(ctx, store, NewTask::new("  Buy milk ").unwrap());
            assert_eq!(
                repo.json(),
                json!([{"text": "Buy milk", "deadline": null, "timer": null, "completed": false}])
            );
            assert!(spawned_ids().is_empty());

            let tea = create_task(ctx, store, NewTask::new("Tea").unwrap().with_timer(Some(3)));
            assert_eq!(saved_texts(&repo), vec!["Buy milk", "Tea"]);
            assert_eq!(repo.json()[1]["timer"], 3);
            assert_eq!(spawned_ids(), vec![tea]);
            assert_eq!(store.countdowns().read_untracked().get(tea).unwrap().label(), "3:00");
        });
    }

    #[test]
    fn test_save_keeps_timer_duration_while_counting() {
        with_app(|ctx, store, repo| {
            let tea = create_task(ctx, store, NewTask::new("Tea").unwrap().with_timer(Some(3)));
            for _ in 0..90 {
                store_tick_countdown(&store, tea);
            }
            assert_eq!(store.countdowns().read_untracked().get(tea).unwrap().label(), "1:30");

            toggle_task(ctx, store, tea);
            assert_eq!(repo.json()[0]["timer"], 3);
        });
    }

    #[test]
    fn test_toggle_saves_completion() {
        with_app(|ctx, store, repo| {
            let id = create_task(ctx, store, NewTask::new("Report").unwrap());

            toggle_task(ctx, store, id);
            assert_eq!(repo.json()[0]["completed"], true);

            toggle_task(ctx, store, id);
            assert_eq!(repo.json()[0]["completed"], false);
        });
    }

    #[test]
    fn test_toggle_unknown_task_does_not_save() {
        with_app(|ctx, store, repo| {
            toggle_task(ctx, store, 42);
            assert_eq!(repo.raw(), None);
        });
    }

    #[test]
    fn test_move_saves_new_order() {
        with_app(|ctx, store, repo| {
            let a = create_task(ctx, store, NewTask::new("A").unwrap());
            create_task(ctx, store, NewTask::new("B").unwrap());
            let c = create_task(ctx, store, NewTask::new("C").unwrap());

            move_task(ctx, store, a, c);
            assert_eq!(saved_texts(&repo), vec!["B", "C", "A"]);

            move_task(ctx, store, c, a);
            assert_eq!(saved_texts(&repo), vec!["B", "A", "C"]);
        });
    }

    #[test]
    fn test_noop_drop_does_not_save() {
        with_app(|ctx, store, repo| {
            let a = store_add_task(&store, NewTask::new("A").unwrap());
            store_add_task(&store, NewTask::new("B").unwrap());

            move_task(ctx, store, a, a);
            move_task(ctx, store, a, 99);
            move_task(ctx, store, 99, a);
            assert_eq!(repo.raw(), None);
        });
    }

    #[test]
    fn test_delete_cancels_countdown_and_saves() {
        with_app(|ctx, store, repo| {
            let tea = create_task(ctx, store, NewTask::new("Tea").unwrap().with_timer(Some(3)));
            create_task(ctx, store, NewTask::new("Milk").unwrap());
            let registration = take_registration(tea);

            delete_task(ctx, store, tea);

            assert!(block_on(Abortable::new(pending::<()>(), registration)).is_err());
            assert!(!ctx.timers.try_update_value(|t| t.cancel(tea)).unwrap());
            assert_eq!(saved_texts(&repo), vec!["Milk"]);
            assert!(store.countdowns().read_untracked().get(tea).is_none());
            assert_eq!(store_tick_countdown(&store, tea), None);
        });
    }

    #[test]
    fn test_delete_unknown_task_does_not_save() {
        with_app(|ctx, store, repo| {
            store_add_task(&store, NewTask::new("Keep").unwrap());
            delete_task(ctx, store, 7);
            assert_eq!(repo.raw(), None);
            assert_eq!(store.tasks().read_untracked().len(), 1);
        });
    }

    #[test]
    fn test_load_restarts_only_timed_countdowns() {
        let raw = r#"[{"text":"Stretch","deadline":null,"timer":2,"completed":false},{"text":"Done","deadline":null,"timer":null,"completed":true}]"#;
        with_repo(Arc::new(MemoryTaskRepository::with_raw(raw)), |ctx, store, repo| {
            load_tasks(ctx, store);

            let stretch = store.tasks().read_untracked().tasks()[0].id;
            assert_eq!(spawned_ids(), vec![stretch]);
            assert_eq!(store.countdowns().read_untracked().get(stretch).unwrap().remaining_secs(), 120);
            assert_eq!(store_records(&store), repo.load());
            // Loading does not write back
            assert_eq!(repo.raw().as_deref(), Some(raw));
        });
    }
}
