//! Typed HTTP client for the todo API.
//!
//! Mirrors what the browser client does: list, add by title with a
//! client-generated id, toggle completion, delete.

use models::todo::{DeletedTodo, Todo, TodoId};
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Clone, Debug)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// `{base}/todos` followed by `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("todos")
            .extend(segments);
        Ok(url)
    }

    fn todos_url(&self) -> Result<Url, ClientError> {
        self.url(&[])
    }

    fn todo_url(&self, id: &str) -> Result<Url, ClientError> {
        self.url(&[id])
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let res = self.http.get(self.todos_url()?).send().await?;
        Ok(check(res).await?.json().await?)
    }

    /// `None` when the server answers 404.
    pub async fn get(&self, id: &str) -> Result<Option<Todo>, ClientError> {
        let res = self.http.get(self.todo_url(id)?).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(res).await?.json().await?))
    }

    pub async fn create(&self, todo: &Todo) -> Result<Todo, ClientError> {
        let res = self.http.post(self.todos_url()?).json(todo).send().await?;
        Ok(check(res).await?.json().await?)
    }

    /// Create an open todo under a freshly generated id.
    pub async fn add(&self, title: &str) -> Result<Todo, ClientError> {
        let todo = Todo::new(TodoId::Text(uuid::Uuid::new_v4().simple().to_string()), title);
        debug!(id = %todo.id, "adding todo");
        self.create(&todo).await
    }

    /// PUT the whole record to `/todos/{todo.id}`.
    pub async fn update(&self, todo: &Todo) -> Result<Todo, ClientError> {
        let res = self
            .http
            .put(self.todo_url(&todo.id.to_string())?)
            .json(todo)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn toggle(&self, todo: &Todo) -> Result<Todo, ClientError> {
        self.update(&todo.toggled()).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeletedTodo, ClientError> {
        let res = self.http.delete(self.todo_url(id)?).send().await?;
        Ok(check(res).await?.json().await?)
    }
}

async fn check(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
