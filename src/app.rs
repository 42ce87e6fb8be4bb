//! Tasks Frontend App
//!
//! Root component: builds the synchronizer, mirrors it into the store and
//! ties the initial load to the component's lifetime.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::HttpTodoApi;
use crate::components::{ErrorBanner, NewTaskForm, TaskList};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::store::store_apply;
use crate::sync::TaskSync;

fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let base = match config.resolve_base(page_origin().as_deref()) {
        Ok(base) => base,
        Err(err) => {
            log::error!("[APP] {}", err);
            return view! {
                <div class="error-banner" role="alert">"The task service is misconfigured."</div>
            }
            .into_any();
        }
    };
    log::info!("[APP] Using task API at {}", base);

    let sync = TaskSync::new(HttpTodoApi::new(base));
    let store = Store::new(sync.snapshot());
    sync.subscribe(move |state| store_apply(&store, state));

    provide_context(AppContext::new(sync.clone(), store, config.toggle_enabled));

    // Load after setup finishes, unless the view is gone by then
    spawn_local(sync.mount());
    let teardown = sync.teardown_handle();
    on_cleanup(move || {
        log::debug!("[APP] Teardown");
        teardown.abort();
    });

    view! {
        <div class="page">
            <div class="card">
                <header class="card-header">
                    <h1>"Tasks"</h1>
                    <p class="subtitle">"Rust + Leptos"</p>
                </header>

                <ErrorBanner />
                <NewTaskForm />
                <TaskList />
            </div>
        </div>
    }
    .into_any()
}
