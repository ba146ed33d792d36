//! Todo lifecycle: create, read with or without items, patch, cascade delete

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Entity, ServiceError, ServiceResult};
use crate::models::{BaseResponse, CreateTodo, NewTodo, Todo, TodoId, UpdateTodo};
use crate::store::{Relations, Store};

/// Owns `Todo` aggregate roots.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn Store>,
}

impl TodoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CreateTodo) -> ServiceResult<BaseResponse<Todo>> {
        let new = NewTodo::try_from(input)?;
        let todo = self.store.insert_todo(new).await?;

        info!(todo_id = todo.id, "todo created");
        Ok(BaseResponse::success(todo))
    }

    /// All todos, items not loaded.
    pub async fn find_all(&self) -> ServiceResult<Vec<Todo>> {
        Ok(self.store.list_todos(Relations::Skip).await?)
    }

    /// All todos with their items.
    pub async fn find_all_with_items(&self) -> ServiceResult<Vec<Todo>> {
        Ok(self.store.list_todos(Relations::Load).await?)
    }

    /// One todo with its items.
    pub async fn find_one(&self, id: TodoId) -> ServiceResult<Todo> {
        self.store
            .find_todo(id, Relations::Load)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Todo))
    }

    /// Overwrite the fields present in `patch` and persist.
    ///
    /// The returned todo carries the items loaded before the write.
    pub async fn update(&self, id: TodoId, patch: UpdateTodo) -> ServiceResult<Todo> {
        let mut todo = self.find_one(id).await?;
        patch.apply_to(&mut todo)?;

        let items = todo.items.take();
        let mut saved = self
            .store
            .save_todo(&todo)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Todo))?;
        saved.items = items;

        debug!(todo_id = id, "todo updated");
        Ok(saved)
    }

    /// Delete the todo together with every item it owns.
    pub async fn remove(&self, id: TodoId) -> ServiceResult<()> {
        if self.store.find_todo(id, Relations::Skip).await?.is_none() {
            return Err(ServiceError::NotFound(Entity::Todo));
        }

        // Deleted concurrently between the check and the cascade
        if self.store.delete_todo_cascade(id).await? == 0 {
            return Err(ServiceError::NotFound(Entity::Todo));
        }

        info!(todo_id = id, "todo removed with its items");
        Ok(())
    }
}
