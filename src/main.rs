//! Countdown To-Do Frontend Entry Point

mod models;
mod countdown;
mod task_list;
mod error;
mod config;
mod logging;
mod repository;
mod store;
mod context;
mod timers;
mod commands;
mod components;
mod app;

use app::App;
use config::WidgetConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = WidgetConfig::default();
    logging::init(config.log_level);
    mount_to_body(move || view! { <App config=config /> });
}
