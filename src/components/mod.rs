//! UI Components
//!
//! Leptos components for the task list page.

mod error_banner;
mod new_task_form;
mod task_list;
mod task_row;

pub use error_banner::ErrorBanner;
pub use new_task_form::NewTaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
