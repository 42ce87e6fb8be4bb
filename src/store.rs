//! Global Application State Store
//!
//! Mirrors synchronizer snapshots into Leptos reactive_stores for
//! fine-grained reactivity: only fields that actually changed notify, so
//! typing in the input does not re-render the list.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::sync::{TaskListState, TaskListStateStoreFields};

/// Type alias for the store
pub type TaskStore = Store<TaskListState>;

/// Copy the changed fields of `next` into the store
pub fn store_apply(store: &TaskStore, next: &TaskListState) {
    if store.tasks().with_untracked(|tasks| tasks != &next.tasks) {
        *store.tasks().write() = next.tasks.clone();
    }
    if store.draft().with_untracked(|draft| draft != &next.draft) {
        *store.draft().write() = next.draft.clone();
    }
    if store.loading().get_untracked() != next.loading {
        *store.loading().write() = next.loading;
    }
    if store.submitting().get_untracked() != next.submitting {
        *store.submitting().write() = next.submitting;
    }
    if store.error().with_untracked(|error| error != &next.error) {
        *store.error().write() = next.error.clone();
    }
}
