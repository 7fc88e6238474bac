//! Countdown Timers
//!
//! One abortable one-second loop per task with a timer. The loop only
//! touches the store; the registry keeps the handle used to stop it.

use std::collections::HashMap;

use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::TaskId;
use crate::store::{store_tick_countdown, AppStore, TickOutcome};

/// Cancellation handles for running countdown loops
#[derive(Debug, Default)]
pub struct TimerRegistry {
    handles: HashMap<TaskId, AbortHandle>,
}

impl TimerRegistry {
    /// Track a loop, aborting any older loop for the same task
    pub fn register(&mut self, id: TaskId, handle: AbortHandle) {
        if let Some(previous) = self.handles.insert(id, handle) {
            previous.abort();
        }
    }

    /// Stop a task's loop. Returns whether one was running.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.handles.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop the handle of a loop that finished on its own
    pub fn release(&mut self, id: TaskId) {
        self.handles.remove(&id);
    }
}

/// Start ticking `id` once per configured interval until it elapses or is cancelled.
pub fn start_countdown(ctx: AppContext, store: AppStore, id: TaskId) {
    let timers = ctx.timers;
    let interval_ms = ctx.config.tick_interval_ms;
    let (handle, registration) = AbortHandle::new_pair();
    timers.update_value(|t| t.register(id, handle));
    log::debug!("[TIMER] started countdown for task {}", id);

    let ticking = async move {
        loop {
            TimeoutFuture::new(interval_ms).await;
            match store_tick_countdown(&store, id) {
                Some(TickOutcome::Running) => {}
                Some(TickOutcome::Elapsed { text }) => {
                    log::info!("[TIMER] countdown elapsed for task {}", id);
                    notify_elapsed(&text);
                    break;
                }
                None => break,
            }
        }
    };

    spawn_local(async move {
        if Abortable::new(ticking, registration).await.is_ok() {
            timers.update_value(|t| t.release(id));
        } else {
            log::debug!("[TIMER] countdown for task {} cancelled", id);
        }
    });
}

/// Blocking alert naming the task whose time ran out
fn notify_elapsed(text: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(&format!("Time's up for task: \"{}\"", text));
    }
}
