//! TodoItem lifecycle

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Entity, ServiceError, ServiceResult};
use crate::models::{CreateTodoItem, NewTodoItem, TodoItem, TodoItemId, UpdateTodoItem};
use crate::store::{Relations, Store};

/// Owns individual `TodoItem` rows.
#[derive(Clone)]
pub struct TodoItemService {
    store: Arc<dyn Store>,
}

impl TodoItemService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Insert a new item; `is_completed` defaults to `false`.
    ///
    /// The parent is not looked up first. An unknown `todo_id` surfaces as the
    /// store's foreign key error.
    pub async fn create(&self, input: CreateTodoItem) -> ServiceResult<TodoItem> {
        let new = NewTodoItem::try_from(input)?;
        let item = self.store.insert_item(new).await?;

        info!(item_id = item.id, todo_id = item.todo_id, "todo item created");
        Ok(item)
    }

    /// All items, each with its parent todo.
    pub async fn find_all(&self) -> ServiceResult<Vec<TodoItem>> {
        Ok(self.store.list_items(Relations::Load).await?)
    }

    /// One item with its parent todo.
    pub async fn find_one(&self, id: TodoItemId) -> ServiceResult<TodoItem> {
        self.store
            .find_item(id, Relations::Load)
            .await?
            .ok_or(ServiceError::NotFound(Entity::TodoItem))
    }

    pub async fn update(&self, id: TodoItemId, patch: UpdateTodoItem) -> ServiceResult<TodoItem> {
        let mut item = self.find_one(id).await?;
        patch.apply_to(&mut item)?;

        let parent = match item.todo.take() {
            Some(parent) => Some(parent),
            None => self
                .store
                .find_todo(item.todo_id, Relations::Skip)
                .await?
                .map(Box::new),
        };

        let mut saved = self
            .store
            .save_item(&item)
            .await?
            .ok_or(ServiceError::NotFound(Entity::TodoItem))?;
        saved.todo = parent;

        debug!(item_id = id, "todo item updated");
        Ok(saved)
    }

    /// Delete by id. Zero affected rows means the item did not exist.
    pub async fn remove(&self, id: TodoItemId) -> ServiceResult<()> {
        if self.store.delete_item(id).await? == 0 {
            return Err(ServiceError::NotFound(Entity::TodoItem));
        }

        info!(item_id = id, "todo item removed");
        Ok(())
    }
}
