//! New Task Form Component
//!
//! Text, deadline and timer fields plus the Add button.

use chrono::Local;
use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::models::NewTask;
use crate::store::use_app_store;

/// Form for creating new tasks
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (new_text, set_new_text) = signal(String::new());
    let (deadline, set_deadline) = signal(String::new());
    let (timer, set_timer) = signal(String::new());

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(draft) = NewTask::from_input(&new_text.get(), &deadline.get(), &timer.get(), &Local) else {
            return;
        };
        commands::create_task(ctx, store, draft);
        set_new_text.set(String::new());
        set_deadline.set(String::new());
        set_timer.set(String::new());
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <input
                id="new-task"
                type="text"
                placeholder="Add a new task..."
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <input
                id="deadline"
                type="datetime-local"
                prop:value=move || deadline.get()
                on:input=move |ev| set_deadline.set(event_target_value(&ev))
            />
            <input
                id="timer"
                type="number"
                min="1"
                placeholder="Timer (minutes)"
                prop:value=move || timer.get()
                on:input=move |ev| set_timer.set(event_target_value(&ev))
            />
            <button id="add-task-button" type="submit">"Add"</button>
        </form>
    }
}
