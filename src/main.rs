//! Tasks Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod models;
mod store;
mod sync;

use app::App;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_build_env();
    if console_log::init_with_level(config.log_level).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    mount_to_body(move || view! { <App config=config /> });
}
