//! Task List View Component
//!
//! Renders the ordered tasks with drag-and-drop reordering.
//! Dropping a task onto another places it right after that task.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::commands;
use crate::components::TaskItem;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskListView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged, target| {
        commands::move_task(ctx, store, dragged, target);
    });

    let tasks = move || store.tasks().read().tasks().to_vec();

    view! {
        <ul id="task-list" class="task-list">
            <For
                each=tasks
                key=|task| task.id
                children=move |task| view! { <TaskItem task=task dnd=dnd /> }
            />
        </ul>
    }
}

/// "N tasks, M completed"
#[component]
pub fn TaskSummary() -> impl IntoView {
    let store = use_app_store();

    let summary = move || {
        let field = store.tasks();
        let tasks = field.read();
        format!("{} tasks, {} completed", tasks.len(), tasks.completed_count())
    };

    view! { <p class="task-count">{summary}</p> }
}
