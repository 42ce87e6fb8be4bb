//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::HttpTodoApi;
use crate::models::TaskId;
use crate::store::TaskStore;
use crate::sync::TaskSync;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Synchronizer, kept in local storage since it is not `Send`
    sync: StoredValue<TaskSync<HttpTodoApi>, LocalStorage>,
    /// Reactive mirror of the synchronizer state
    pub store: TaskStore,
    /// Whether rows can be clicked to flip completion
    pub toggle_enabled: bool,
}

impl AppContext {
    pub fn new(sync: TaskSync<HttpTodoApi>, store: TaskStore, toggle_enabled: bool) -> Self {
        Self {
            sync: StoredValue::new_local(sync),
            store,
            toggle_enabled,
        }
    }

    fn sync(&self) -> Option<TaskSync<HttpTodoApi>> {
        self.sync.try_get_value()
    }

    /// Update the draft from the input
    pub fn set_draft(&self, text: String) {
        if let Some(sync) = self.sync() {
            sync.set_draft(text);
        }
    }

    /// Submit the draft in the background
    pub fn submit(&self) {
        if let Some(sync) = self.sync() {
            leptos::task::spawn_local(async move { sync.submit_draft().await });
        }
    }

    /// Toggle a task in the background
    pub fn toggle(&self, id: TaskId) {
        if let Some(sync) = self.sync() {
            leptos::task::spawn_local(async move { sync.toggle_task(&id).await });
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
