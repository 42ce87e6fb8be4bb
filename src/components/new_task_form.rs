//! New Task Form Component
//!
//! Input bound to the synchronizer draft plus the submit button.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::sync::TaskListStateStoreFields;

/// Form for creating new tasks
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let busy = move || store.submitting().get() || store.loading().get();
    let blank = move || store.draft().with(|draft| draft.trim().is_empty());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        // Enter in the input submits even while the button is disabled
        let in_flight = store.submitting().get_untracked() || store.loading().get_untracked();
        if in_flight || store.draft().with_untracked(|draft| draft.trim().is_empty()) {
            return;
        }
        ctx.submit();
    };

    view! {
        <form class="new-task-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="New task"
                aria-label="New task"
                autofocus=true
                prop:value=move || store.draft().get()
                prop:disabled=busy
                on:input=move |ev| ctx.set_draft(event_target_value(&ev))
            />
            <button type="submit" prop:disabled=move || blank() || busy()>
                {move || if store.submitting().get() { "Adding…" } else { "Add" }}
            </button>
        </form>
    }
}
