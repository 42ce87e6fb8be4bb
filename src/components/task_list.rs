//! Task List Component
//!
//! Count header, then a loading skeleton, the empty state, or the rows.

use leptos::prelude::*;

use crate::components::TaskRow;
use crate::context::use_app_context;
use crate::models::task_count_label;
use crate::sync::TaskListStateStoreFields;

const SKELETON_ROWS: usize = 3;

#[component]
pub fn TaskList() -> impl IntoView {
    let store = use_app_context().store;

    let count = move || store.tasks().with(|tasks| task_count_label(tasks.len()));

    view! {
        <section class="task-section">
            <div class="task-section-header">
                <span>
                    <Show when=move || store.loading().get()>
                        <span class="spinner" aria-hidden="true"></span>
                    </Show>
                </span>
                <span class="task-count">{count}</span>
            </div>

            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <LoadingSkeleton /> }
            >
                <Show
                    when=move || store.tasks().with(|tasks| !tasks.is_empty())
                    fallback=|| view! {
                        <div class="empty-state">"No tasks yet. Why not create the first one?"</div>
                    }
                >
                    <ul class="task-list">
                        <For
                            each=move || store.tasks().get()
                            // completion is part of the key so a toggled row re-renders
                            key=|task| (task.id.clone(), task.title.clone(), task.done)
                            children=|task| view! { <TaskRow task=task /> }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}

/// Placeholder rows shown while a load is in flight
#[component]
pub fn LoadingSkeleton() -> impl IntoView {
    view! {
        <ul class="task-list">
            {(0..SKELETON_ROWS).map(|_| view! { <li class="task-row skeleton"></li> }).collect_view()}
        </ul>
    }
}
