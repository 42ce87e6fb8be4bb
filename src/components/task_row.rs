//! Task Row Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Task;

/// Marker shown before the title, when the server tracks completion
fn done_marker(done: Option<bool>) -> &'static str {
    match done {
        Some(true) => "✔ ",
        Some(false) => "• ",
        None => "",
    }
}

/// A single task in the list
#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_app_context();

    let completed = task.done == Some(true);
    let marker = done_marker(task.done);
    let id = task.id;

    let class = match (ctx.toggle_enabled, completed) {
        (true, true) => "task-row clickable completed",
        (true, false) => "task-row clickable",
        (false, true) => "task-row completed",
        (false, false) => "task-row",
    };

    view! {
        <li
            class=class
            on:click=move |_| {
                if ctx.toggle_enabled {
                    ctx.toggle(id.clone());
                }
            }
        >
            {marker}
            <span class="task-title">{task.title}</span>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_marker() {
        assert_eq!(done_marker(Some(true)), "✔ ");
        assert_eq!(done_marker(Some(false)), "• ");
        assert_eq!(done_marker(None), "");
    }
}
