//! Persistence abstraction
//!
//! # Design Principles
//!
//! - Every read states whether it loads the relation - no lazy loading
//! - Rely on store constraints for foreign keys - no check-then-insert
//! - The one multi-step write (todo cascade delete) is atomic inside the store

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewTodo, NewTodoItem, Todo, TodoId, TodoItem, TodoItemId};

/// Whether a read also loads the related side.
///
/// For todos that is the `items` collection, for items the parent `todo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relations {
    Skip,
    Load,
}

impl Relations {
    pub fn loaded(self) -> bool {
        matches!(self, Self::Load)
    }
}

/// Storage capability the services are written against.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip to prove the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    async fn insert_todo(&self, todo: NewTodo) -> StoreResult<Todo>;

    /// All todos ordered by id.
    async fn list_todos(&self, relations: Relations) -> StoreResult<Vec<Todo>>;

    async fn find_todo(&self, id: TodoId, relations: Relations) -> StoreResult<Option<Todo>>;

    /// Write the scalar columns of `todo` back to its row.
    ///
    /// Returns `None` if the row no longer exists. The returned todo has no
    /// relation loaded.
    async fn save_todo(&self, todo: &Todo) -> StoreResult<Option<Todo>>;

    /// Delete every item owned by `id`, then the todo itself, as one unit.
    ///
    /// Returns the number of todo rows removed (0 or 1). If either step fails
    /// nothing is removed.
    async fn delete_todo_cascade(&self, id: TodoId) -> StoreResult<u64>;

    /// Fails with [`StoreError::ForeignKey`](crate::StoreError::ForeignKey)
    /// when `todo_id` does not reference an existing todo.
    async fn insert_item(&self, item: NewTodoItem) -> StoreResult<TodoItem>;

    /// All items ordered by id.
    async fn list_items(&self, relations: Relations) -> StoreResult<Vec<TodoItem>>;

    async fn find_item(&self, id: TodoItemId, relations: Relations)
        -> StoreResult<Option<TodoItem>>;

    /// Write the columns of `item` back to its row. Same contract as
    /// [`Store::save_todo`], plus the foreign key check on `todo_id`.
    async fn save_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>>;

    /// Returns the number of rows removed.
    async fn delete_item(&self, id: TodoItemId) -> StoreResult<u64>;
}
