//! Task API Client
//!
//! Frontend bindings to the backend's `/todos` routes.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{ApiError, ApiResult};
use crate::models::{NewTask, Task, TaskId};

/// Characters left unescaped in an id path segment (RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Remote task collection.
///
/// Futures are not `Send`: in the browser they are driven by the single
/// event loop.
#[async_trait(?Send)]
pub trait TodoApi {
    /// Fetch every task in server order
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// Create a task. The created record is not returned; callers reload.
    async fn create_task(&self, title: &str) -> ApiResult<()>;

    /// Flip the completion flag of a task
    async fn toggle_task(&self, id: &TaskId) -> ApiResult<()>;
}

/// `TodoApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base: String,
}

impl HttpTodoApi {
    /// `base` is an absolute URL without trailing slash, e.g. `http://localhost:3000/api`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base)
    }

    fn toggle_url(&self, id: &TaskId) -> String {
        format!("{}/todos/{}/toggle", self.base, utf8_percent_encode(id.as_str(), PATH_SEGMENT))
    }
}

fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpTodoApi {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let url = self.todos_url();
        log::debug!("[API] GET {}", url);
        let response = ensure_success(self.client.get(&url).send().await?)?;
        let tasks = response.json::<Vec<Task>>().await?;
        log::debug!("[API] Loaded {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, title: &str) -> ApiResult<()> {
        let url = self.todos_url();
        log::debug!("[API] POST {}", url);
        ensure_success(self.client.post(&url).json(&NewTask { title }).send().await?)?;
        Ok(())
    }

    async fn toggle_task(&self, id: &TaskId) -> ApiResult<()> {
        let url = self.toggle_url(id);
        log::debug!("[API] POST {}", url);
        ensure_success(self.client.post(&url).send().await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Default)]
    struct Backend {
        created: Arc<Mutex<Vec<Value>>>,
        toggled: Arc<Mutex<Vec<String>>>,
    }

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn backend_router(backend: Backend) -> Router {
        let todos = Router::new()
            .route(
                "/todos",
                get(|| async { Json(json!([{"id": 1, "title": "Buy milk"}, {"id": "b", "title": "Walk dog", "done": true}])) })
                    .post(|State(backend): State<Backend>, Json(body): Json<Value>| async move {
                        backend.created.lock().unwrap().push(body);
                        (StatusCode::CREATED, Json(json!({"id": "new", "title": "ignored"})))
                    }),
            )
            .route(
                "/todos/{id}/toggle",
                post(|State(backend): State<Backend>, Path(id): Path<String>| async move {
                    backend.toggled.lock().unwrap().push(id);
                    "not json at all"
                }),
            )
            .with_state(backend);
        Router::new().nest("/api", todos)
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let base = serve(backend_router(Backend::default())).await;
        let api = HttpTodoApi::new(base);

        let tasks = api.list_tasks().await.expect("list failed");

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, TaskId::new("1"));
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[1].done, Some(true));
    }

    #[tokio::test]
    async fn test_create_task_sends_title() {
        let backend = Backend::default();
        let base = serve(backend_router(backend.clone())).await;
        let api = HttpTodoApi::new(base);

        api.create_task("Write report").await.expect("create failed");

        assert_eq!(*backend.created.lock().unwrap(), vec![json!({"title": "Write report"})]);
    }

    #[tokio::test]
    async fn test_toggle_ignores_response_body() {
        let backend = Backend::default();
        let base = serve(backend_router(backend.clone())).await;
        let api = HttpTodoApi::new(base);

        api.toggle_task(&TaskId::new("a b/c")).await.expect("toggle failed");

        assert_eq!(*backend.toggled.lock().unwrap(), vec!["a b/c".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router = Router::new().route(
            "/api/todos",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }).post(|| async { StatusCode::BAD_REQUEST }),
        );
        let base = serve(router).await;
        let api = HttpTodoApi::new(base);

        assert!(matches!(api.list_tasks().await, Err(ApiError::Status(500))));
        assert!(matches!(api.create_task("x").await, Err(ApiError::Status(400))));
        assert!(matches!(api.toggle_task(&TaskId::new("1")).await, Err(ApiError::Status(404))));
    }

    #[tokio::test]
    async fn test_bad_payload_maps_to_decode() {
        let router = Router::new().route("/api/todos", get(|| async { "[{\"oops\": true}]" }));
        let base = serve(router).await;
        let api = HttpTodoApi::new(base);

        assert!(matches!(api.list_tasks().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpTodoApi::new(format!("http://{}/api", addr));

        assert!(matches!(api.list_tasks().await, Err(ApiError::Transport(_))));
    }
}
