//! Error Banner Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::sync::TaskListStateStoreFields;

/// Shows the current error message, if any
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_app_context().store;

    move || {
        store.error().get().map(|message| view! {
            <div class="error-banner" role="alert">{message}</div>
        })
    }
}
