//! Widget Configuration

use log::LevelFilter;

/// Storage key the task list is saved under
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// One countdown tick per second
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetConfig {
    pub storage_key: &'static str,
    pub tick_interval_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }
}
