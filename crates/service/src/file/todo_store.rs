use std::{path::PathBuf, sync::Arc};

use models::todo::{DeletedTodo, Todo};
use tracing::debug;

use crate::errors::ServiceError;
use crate::observability::{record_outcome, STORE_OPERATION_DURATION};
use crate::storage::json_list_store::JsonListStore;
use crate::todos::TodoStore;

/// Todos persisted as one JSON array file.
#[derive(Clone)]
pub struct JsonTodoStore {
    store: Arc<JsonListStore<Todo>>,
}

impl JsonTodoStore {
    /// Open the store, creating an empty collection file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Todo>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        let _timer = STORE_OPERATION_DURATION.with_label_values(&["list"]).start_timer();
        let res = self.store.list().await;
        record_outcome("list", &res);
        res
    }

    pub async fn get(&self, id: &str) -> Result<Option<Todo>, ServiceError> {
        let _timer = STORE_OPERATION_DURATION.with_label_values(&["get"]).start_timer();
        let res = self
            .store
            .list()
            .await
            .map(|todos| todos.into_iter().find(|t| t.id.matches(id)));
        record_outcome("get", &res);
        res
    }

    pub async fn create(&self, todo: Todo) -> Result<Todo, ServiceError> {
        let _timer = STORE_OPERATION_DURATION.with_label_values(&["create"]).start_timer();
        let res = self.create_inner(todo).await;
        record_outcome("create", &res);
        res
    }

    async fn create_inner(&self, todo: Todo) -> Result<Todo, ServiceError> {
        todo.validate()?;
        let count = self
            .store
            .update_list(|todos| {
                todos.push(todo.clone());
                Ok(todos.len())
            })
            .await?;
        debug!(op = "create", id = %todo.id, count, "todo appended");
        Ok(todo)
    }

    pub async fn update(&self, id: &str, todo: Todo) -> Result<Todo, ServiceError> {
        let _timer = STORE_OPERATION_DURATION.with_label_values(&["update"]).start_timer();
        let res = self.update_inner(id, todo).await;
        record_outcome("update", &res);
        res
    }

    async fn update_inner(&self, id: &str, todo: Todo) -> Result<Todo, ServiceError> {
        todo.validate()?;
        let matched = self
            .store
            .update_list(|todos| {
                let mut matched = 0usize;
                for existing in todos.iter_mut().filter(|t| t.id.matches(id)) {
                    *existing = todo.clone();
                    matched += 1;
                }
                Ok(matched)
            })
            .await?;
        debug!(op = "update", %id, matched, "todo replaced");
        Ok(todo)
    }

    pub async fn delete(&self, id: &str) -> Result<DeletedTodo, ServiceError> {
        let _timer = STORE_OPERATION_DURATION.with_label_values(&["delete"]).start_timer();
        let res = self.delete_inner(id).await;
        record_outcome("delete", &res);
        res
    }

    async fn delete_inner(&self, id: &str) -> Result<DeletedTodo, ServiceError> {
        let removed = self
            .store
            .update_list(|todos| {
                let before = todos.len();
                todos.retain(|t| !t.id.matches(id));
                Ok(before - todos.len())
            })
            .await?;
        debug!(op = "delete", %id, removed, "todos removed");
        Ok(DeletedTodo { id: id.to_string() })
    }
}

#[async_trait::async_trait]
impl TodoStore for JsonTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, ServiceError> { self.list().await }
    async fn get(&self, id: &str) -> Result<Option<Todo>, ServiceError> { self.get(id).await }
    async fn create(&self, todo: Todo) -> Result<Todo, ServiceError> { self.create(todo).await }
    async fn update(&self, id: &str, todo: Todo) -> Result<Todo, ServiceError> { self.update(id, todo).await }
    async fn delete(&self, id: &str) -> Result<DeletedTodo, ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::todo::TodoId;

    async fn setup_store() -> (Arc<JsonTodoStore>, PathBuf) {
        let dir = std::env::temp_dir().join(format!("todo_store_{}", uuid::Uuid::new_v4()));
        let path = dir.join("todos.json");
        let store = JsonTodoStore::new(&path).await.expect("store init");
        (store, dir)
    }

    fn todo(id: impl Into<TodoId>, title: &str, done: bool) -> Todo {
        Todo { id: id.into(), title: title.into(), is_completed: done }
    }

    #[tokio::test]
    async fn create_update_delete_round() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;

        store.create(todo(1i64, "a", false)).await?;
        assert_eq!(store.list().await?, vec![todo(1i64, "a", false)]);

        let echoed = store.update("1", todo(1i64, "b", true)).await?;
        assert_eq!(echoed, todo(1i64, "b", true));
        assert_eq!(store.list().await?, vec![todo(1i64, "b", true)]);

        let deleted = store.delete("1").await?;
        assert_eq!(deleted.id, "1");
        assert!(store.list().await?.is_empty());

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_appends_once_without_dedup() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;

        store.create(todo("x", "first", false)).await?;
        assert_eq!(store.list().await?.iter().filter(|t| t.id.matches("x")).count(), 1);

        // duplicate ids are accepted as given
        store.create(todo("x", "second", false)).await?;
        let all = store.list().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "first");
        assert_eq!(all[1].title, "second");

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_matches_string_form_of_numeric_and_text_ids() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;
        store.create(todo(7i64, "num", false)).await?;
        store.create(todo("abc", "text", false)).await?;

        assert_eq!(store.get("7").await?.map(|t| t.title), Some("num".to_string()));
        assert_eq!(store.get("abc").await?.map(|t| t.title), Some("text".to_string()));
        assert!(store.get("8").await?.is_none());

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_whole_record_and_may_change_id() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;
        store.create(todo(1i64, "a", false)).await?;
        store.create(todo(2i64, "keep", false)).await?;

        store.update("1", todo("renamed", "z", true)).await?;
        let all = store.list().await?;
        assert_eq!(all, vec![todo("renamed", "z", true), todo(2i64, "keep", false)]);
        assert!(store.get("1").await?.is_none());

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_without_match_echoes_and_leaves_collection() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;
        store.create(todo(1i64, "a", false)).await?;

        let echoed = store.update("99", todo(99i64, "ghost", true)).await?;
        assert_eq!(echoed, todo(99i64, "ghost", true));
        assert_eq!(store.list().await?, vec![todo(1i64, "a", false)]);

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_every_match_and_echoes_missing_ids() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;
        store.create(todo(5i64, "n", false)).await?;
        store.create(todo("5", "s", false)).await?;
        store.create(todo(6i64, "other", false)).await?;

        let deleted = store.delete("5").await?;
        assert_eq!(deleted.id, "5");
        assert_eq!(store.list().await?, vec![todo(6i64, "other", false)]);

        let missing = store.delete("nope").await?;
        assert_eq!(missing.id, "nope");
        assert_eq!(store.list().await?.len(), 1);

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_records_are_rejected_before_writing() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;

        assert!(matches!(store.create(todo("  ", "blank id", false)).await, Err(ServiceError::Model(_))));
        store.create(todo(1i64, "ok", false)).await?;
        assert!(matches!(store.update("1", todo("", "x", true)).await, Err(ServiceError::Model(_))));
        assert_eq!(store.list().await?, vec![todo(1i64, "ok", false)]);

        // empty titles are stored as given
        store.create(todo(2i64, "", false)).await?;
        assert_eq!(store.get("2").await?, Some(todo(2i64, "", false)));

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn usable_through_trait_object() -> Result<(), anyhow::Error> {
        let (store, dir) = setup_store().await;
        let dyn_store: Arc<dyn TodoStore> = store;
        dyn_store.create(todo("t", "via trait", false)).await?;
        assert_eq!(TodoStore::list(&*dyn_store).await?.len(), 1);

        let _ = tokio::fs::remove_dir_all(dir).await;
        Ok(())
    }
}
