//! View-State Synchronizer
//!
//! Owns the task list, the draft title and the status flags, and keeps them
//! consistent with the remote collection. Every mutation is followed by a
//! full reload; nothing is patched locally.
//!
//! Single-threaded: state lives in `Rc`/`RefCell` and no borrow is held
//! across an await.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use reactive_stores::Store;

use crate::api::TodoApi;
use crate::models::{Task, TaskId};

pub const LOAD_FAILED: &str = "Could not load tasks. Please try again.";
pub const ADD_FAILED: &str = "Could not add the task.";
pub const TOGGLE_FAILED: &str = "Could not update the task.";

/// Everything the view renders
#[derive(Debug, Clone, Default, PartialEq, Store)]
pub struct TaskListState {
    /// Tasks from the last successful fetch, in server order
    pub tasks: Vec<Task>,
    /// Text in the new-task input
    pub draft: String,
    pub loading: bool,
    pub submitting: bool,
    /// User-facing error banner
    pub error: Option<String>,
}

type Listener = Rc<dyn Fn(&TaskListState)>;

struct Inner<A> {
    api: A,
    state: RefCell<TaskListState>,
    loads_in_flight: Cell<u32>,
    listener: RefCell<Option<Listener>>,
    /// Aborted on teardown; also cancels the deferred initial load
    teardown: AbortHandle,
    initial_load: Cell<Option<AbortRegistration>>,
}

/// Shared handle to the synchronizer. Clones refer to the same state.
pub struct TaskSync<A> {
    inner: Rc<Inner<A>>,
}

impl<A> Clone for TaskSync<A> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

/// Resets a status flag when dropped, whatever path the operation exits by
struct Release<'a, A> {
    sync: &'a TaskSync<A>,
    release: fn(&TaskSync<A>),
}

impl<A> Drop for Release<'_, A> {
    fn drop(&mut self) {
        (self.release)(self.sync);
    }
}

impl<A> TaskSync<A> {
    pub fn new(api: A) -> Self {
        let (teardown, registration) = AbortHandle::new_pair();
        Self {
            inner: Rc::new(Inner {
                api,
                state: RefCell::new(TaskListState::default()),
                loads_in_flight: Cell::new(0),
                listener: RefCell::new(None),
                teardown,
                initial_load: Cell::new(Some(registration)),
            }),
        }
    }

    pub fn snapshot(&self) -> TaskListState {
        self.inner.state.borrow().clone()
    }

    /// Register the observer notified with a snapshot after every state change.
    /// Replaces any previous observer; a listener may re-subscribe.
    pub fn subscribe(&self, listener: impl Fn(&TaskListState) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.draft = text);
    }

    /// Handle that tears the view down when aborted: the pending initial load
    /// is cancelled and every later state write, including ones from requests
    /// already in flight, is ignored. `Send`, unlike the synchronizer.
    pub fn teardown_handle(&self) -> AbortHandle {
        self.inner.teardown.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.teardown.is_aborted()
    }

    fn update(&self, apply: impl FnOnce(&mut TaskListState)) {
        if self.is_torn_down() {
            log::debug!("[SYNC] View torn down, dropping state write");
            return;
        }
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&snapshot);
        }
    }

    fn begin_load(&self) -> Release<'_, A> {
        let in_flight = self.inner.loads_in_flight.get() + 1;
        self.inner.loads_in_flight.set(in_flight);
        if in_flight == 1 {
            self.update(|state| state.loading = true);
        }
        Release { sync: self, release: Self::end_load }
    }

    fn end_load(&self) {
        let in_flight = self.inner.loads_in_flight.get().saturating_sub(1);
        self.inner.loads_in_flight.set(in_flight);
        if in_flight == 0 {
            self.update(|state| state.loading = false);
        }
    }

    fn begin_submit(&self) -> Release<'_, A> {
        self.update(|state| {
            state.submitting = true;
            state.error = None;
        });
        Release { sync: self, release: Self::end_submit }
    }

    fn end_submit(&self) {
        self.update(|state| state.submitting = false);
    }

    fn fail(&self, message: &str) {
        self.update(|state| state.error = Some(message.to_string()));
    }
}

impl<A: TodoApi + 'static> TaskSync<A> {
    /// Deferred initial load.
    ///
    /// Waits one scheduling turn before fetching so no state is written while
    /// the view is still being built. Resolves without fetching if the view is
    /// torn down first, or if the initial load was already handed out.
    pub fn mount(&self) -> impl Future<Output = ()> + 'static {
        let sync = self.clone();
        let registration = self.inner.initial_load.take();
        async move {
            let Some(registration) = registration else {
                log::warn!("[SYNC] Initial load already scheduled");
                return;
            };
            let load = async {
                next_turn().await;
                sync.refresh().await;
            };
            if Abortable::new(load, registration).await.is_err() {
                log::debug!("[SYNC] Initial load cancelled");
            }
        }
    }

    /// Replace the task list with the server's. On failure the previous list
    /// stays and the error banner is set.
    pub async fn refresh(&self) {
        let _loading = self.begin_load();
        match self.inner.api.list_tasks().await {
            Ok(tasks) => {
                log::debug!("[SYNC] Loaded {} tasks", tasks.len());
                self.update(|state| {
                    state.tasks = tasks;
                    state.error = None;
                });
            }
            Err(err) => {
                log::warn!("[SYNC] Load failed: {}", err);
                self.fail(LOAD_FAILED);
            }
        }
    }

    /// Create a task from `raw_title`, then reload.
    ///
    /// Blank titles are ignored. So is a submission made while another one is
    /// still waiting on the server.
    pub async fn submit_new_task(&self, raw_title: &str) {
        let title = raw_title.trim();
        if title.is_empty() {
            return;
        }
        if self.inner.state.borrow().submitting {
            log::debug!("[SYNC] Submission in flight, ignoring {:?}", title);
            return;
        }

        let created = {
            let _submitting = self.begin_submit();
            self.inner.api.create_task(title).await
        };
        match &created {
            Ok(()) => {
                log::debug!("[SYNC] Created {:?}", title);
                self.update(|state| state.draft.clear());
            }
            Err(err) => log::warn!("[SYNC] Create failed: {}", err),
        }

        self.refresh().await;
        if created.is_err() {
            self.fail(ADD_FAILED);
        }
    }

    /// Submit whatever is in the draft
    pub async fn submit_draft(&self) {
        let draft = self.inner.state.borrow().draft.clone();
        self.submit_new_task(&draft).await;
    }

    /// Flip a task's completion on the server, then reload whatever the outcome
    pub async fn toggle_task(&self, id: &TaskId) {
        let toggled = self.inner.api.toggle_task(id).await;
        if let Err(err) = &toggled {
            log::warn!("[SYNC] Toggle of {} failed: {}", id, err);
        }

        self.refresh().await;
        if toggled.is_err() {
            self.fail(TOGGLE_FAILED);
        }
    }
}

/// Yield to the event loop once
#[cfg(target_arch = "wasm32")]
async fn next_turn() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn next_turn() {
    tokio::task::yield_now().await;
}
