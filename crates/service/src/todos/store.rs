use crate::errors::ServiceError;
use async_trait::async_trait;
use models::todo::{DeletedTodo, Todo};

/// Trait abstraction for todo storage.
///
/// Ids are addressed by their string form (`"1"` finds both `1` and `"1"`).
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// The full collection in stored order.
    async fn list(&self) -> Result<Vec<Todo>, ServiceError>;
    /// First record whose id matches, if any.
    async fn get(&self, id: &str) -> Result<Option<Todo>, ServiceError>;
    /// Append as given; no id generation, no duplicate check.
    async fn create(&self, todo: Todo) -> Result<Todo, ServiceError>;
    /// Replace every matching record with `todo`; echoes `todo` even when nothing matched.
    async fn update(&self, id: &str, todo: Todo) -> Result<Todo, ServiceError>;
    /// Remove every matching record; echoes the requested id even when nothing matched.
    async fn delete(&self, id: &str) -> Result<DeletedTodo, ServiceError>;
}
