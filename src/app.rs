//! Countdown To-Do App
//!
//! Root component: owns the store and context, loads saved tasks once.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands;
use crate::components::{NewTaskForm, TaskListView, TaskSummary};
use crate::config::WidgetConfig;
use crate::context::AppContext;
use crate::store::AppState;

#[component]
pub fn App(config: WidgetConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    let ctx = AppContext::new(config);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load saved tasks on mount
    Effect::new(move |_| {
        commands::load_tasks(ctx, store);
    });

    view! {
        <main class="todo-app">
            <h1>"To-Do List"</h1>
            <NewTaskForm />
            <TaskListView />
            <TaskSummary />
        </main>
    }
}
