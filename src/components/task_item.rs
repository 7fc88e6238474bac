//! Task Item Component
//!
//! One task in the list: header with delete button, optional deadline,
//! optional live countdown.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos_dragdrop::*;
use wasm_bindgen::JsValue;

use crate::commands;
use crate::context::use_app_context;
use crate::countdown::Countdown;
use crate::models::Task;
use crate::store::{use_app_store, AppStateStoreFields};

/// Deadline in the browser's locale
fn format_deadline(deadline: DateTime<Utc>) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(deadline.timestamp_millis() as f64));
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

/// A single task row
#[component]
pub fn TaskItem(task: Task, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = task.id;

    let completed = move || store.tasks().read().get(id).is_some_and(|t| t.completed);
    let timer_label = move || store.countdowns().read().get(id).map(Countdown::label).unwrap_or_default();
    let timer_elapsed = move || store.countdowns().read().get(id).is_some_and(Countdown::is_elapsed);

    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let is_drop_target = move || dnd.drop_target_read.get() == Some(id);

    let item_class = move || {
        let mut c = String::from("task-item draggable");
        if completed() { c.push_str(" completed"); }
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let on_toggle = move |_: web_sys::MouseEvent| {
        if drag_recently_ended(&dnd) {
            return;
        }
        commands::toggle_task(ctx, store, id);
    };

    let on_delete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        commands::delete_task(ctx, store, id);
    };

    view! {
        <li
            class=item_class
            on:mousedown=make_on_mousedown(dnd, id)
            on:mouseenter=make_on_row_mouseenter(dnd, id)
            on:mouseleave=make_on_mouseleave(dnd)
            on:click=on_toggle
        >
            <div class="task-header">
                <span class="task-text">{task.text.clone()}</span>
                <button class="delete-btn" on:click=on_delete>"X"</button>
            </div>

            {task.deadline.map(move |deadline| view! {
                <div class="task-deadline">"Deadline: " {format_deadline(deadline)}</div>
            })}

            {task.timer_minutes.map(move |_| view! {
                <div class=move || if timer_elapsed() { "task-timer elapsed" } else { "task-timer" }>
                    "Timer: " {timer_label}
                </div>
            })}
        </li>
    }
}
