//! Application Context
//!
//! Non-reactive services shared via the Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::models::TaskId;
use crate::repository::{BrowserTaskRepository, SharedRepository};
use crate::store::AppStore;
use crate::timers::{start_countdown, TimerRegistry};

/// Starts the loop that ticks a task's countdown
pub type CountdownSpawner = fn(AppContext, AppStore, TaskId);

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: WidgetConfig,
    /// Where the list is saved after every change
    pub repository: StoredValue<SharedRepository>,
    /// Cancellation handles of running countdowns
    pub timers: StoredValue<TimerRegistry>,
    pub spawner: CountdownSpawner,
}

impl AppContext {
    /// `localStorage` persistence and timeout-driven countdowns
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_services(
            config,
            Arc::new(BrowserTaskRepository::new(config.storage_key)),
            start_countdown,
        )
    }

    pub fn with_services(config: WidgetConfig, repository: SharedRepository, spawner: CountdownSpawner) -> Self {
        Self {
            config,
            repository: StoredValue::new(repository),
            timers: StoredValue::new(TimerRegistry::default()),
            spawner,
        }
    }
}

/// Get the app context from context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
