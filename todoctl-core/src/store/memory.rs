//! In-process store backed by ordered maps
//!
//! Mirrors the PostgreSQL schema closely enough to exercise the services:
//! identity-style ids that are never reused and a foreign key from items to
//! todos. A single lock makes every operation, including the cascade delete,
//! atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Relations, Store};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewTodo, NewTodoItem, Todo, TodoId, TodoItem, TodoItemId};

#[derive(Debug, Default)]
struct Tables {
    todos: BTreeMap<TodoId, Todo>,
    items: BTreeMap<TodoItemId, TodoItem>,
    last_todo_id: TodoId,
    last_item_id: TodoItemId,
}

impl Tables {
    fn check_parent(&self, todo_id: TodoId) -> StoreResult<()> {
        if self.todos.contains_key(&todo_id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey {
                detail: format!("todo {} does not exist", todo_id),
            })
        }
    }

    fn todo_with(&self, todo: &Todo, relations: Relations) -> Todo {
        let mut todo = todo.clone();
        if relations.loaded() {
            todo.items = Some(
                self.items
                    .values()
                    .filter(|item| item.todo_id == todo.id)
                    .cloned()
                    .collect(),
            );
        }
        todo
    }

    fn item_with(&self, item: &TodoItem, relations: Relations) -> TodoItem {
        let mut item = item.clone();
        if relations.loaded() {
            item.todo = self.todos.get(&item.todo_id).cloned().map(Box::new);
        }
        item
    }
}

/// Store that keeps everything in memory; used by tests and `serve --memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_todo(&self, todo: NewTodo) -> StoreResult<Todo> {
        let mut tables = self.tables.write().await;
        tables.last_todo_id += 1;

        let todo = Todo {
            id: tables.last_todo_id,
            title: todo.title.into_string(),
            description: todo.description,
            items: None,
        };
        tables.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn list_todos(&self, relations: Relations) -> StoreResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .values()
            .map(|todo| tables.todo_with(todo, relations))
            .collect())
    }

    async fn find_todo(&self, id: TodoId, relations: Relations) -> StoreResult<Option<Todo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .get(&id)
            .map(|todo| tables.todo_with(todo, relations)))
    }

    async fn save_todo(&self, todo: &Todo) -> StoreResult<Option<Todo>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.todos.get_mut(&todo.id) else {
            return Ok(None);
        };

        row.title = todo.title.clone();
        row.description = todo.description.clone();
        Ok(Some(row.clone()))
    }

    async fn delete_todo_cascade(&self, id: TodoId) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if !tables.todos.contains_key(&id) {
            return Ok(0);
        }

        tables.items.retain(|_, item| item.todo_id != id);
        tables.todos.remove(&id);
        Ok(1)
    }

    async fn insert_item(&self, item: NewTodoItem) -> StoreResult<TodoItem> {
        let mut tables = self.tables.write().await;
        tables.check_parent(item.todo_id)?;
        tables.last_item_id += 1;

        let item = TodoItem {
            id: tables.last_item_id,
            todo_id: item.todo_id,
            name: item.name.into_string(),
            description: item.description,
            is_completed: item.is_completed,
            todo: None,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list_items(&self, relations: Relations) -> StoreResult<Vec<TodoItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .map(|item| tables.item_with(item, relations))
            .collect())
    }

    async fn find_item(
        &self,
        id: TodoItemId,
        relations: Relations,
    ) -> StoreResult<Option<TodoItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .get(&id)
            .map(|item| tables.item_with(item, relations)))
    }

    async fn save_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>> {
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&item.id) {
            return Ok(None);
        }
        tables.check_parent(item.todo_id)?;

        let mut row = item.clone();
        row.todo = None;
        tables.items.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn delete_item(&self, id: TodoItemId) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        Ok(tables.items.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemName, TodoTitle};

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: TodoTitle::new(title).unwrap(),
            description: None,
        }
    }

    fn new_item(todo_id: TodoId, name: &str) -> NewTodoItem {
        NewTodoItem {
            todo_id,
            name: ItemName::new(name).unwrap(),
            description: None,
            is_completed: false,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.insert_todo(new_todo("a")).await.unwrap();
        assert_eq!(store.delete_todo_cascade(first.id).await.unwrap(), 1);

        let second = store.insert_todo(new_todo("b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn item_insert_checks_foreign_key() {
        let store = MemoryStore::new();
        let err = store.insert_item(new_item(42, "orphan")).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey { .. }));
        assert!(store.list_items(Relations::Skip).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn relations_loaded_only_on_request() {
        let store = MemoryStore::new();
        let todo = store.insert_todo(new_todo("T1")).await.unwrap();
        let item = store.insert_item(new_item(todo.id, "I1")).await.unwrap();

        let bare = store.find_todo(todo.id, Relations::Skip).await.unwrap().unwrap();
        assert!(bare.items.is_none());

        let full = store.find_todo(todo.id, Relations::Load).await.unwrap().unwrap();
        assert_eq!(full.items.unwrap(), vec![item.clone()]);

        let with_parent = store
            .find_item(item.id, Relations::Load)
            .await
            .unwrap()
            .unwrap();
        let parent = with_parent.todo.unwrap();
        assert_eq!(parent.id, todo.id);
        assert!(parent.items.is_none());
    }

    #[tokio::test]
    async fn cascade_only_touches_owned_items() {
        let store = MemoryStore::new();
        let keep = store.insert_todo(new_todo("keep")).await.unwrap();
        let gone = store.insert_todo(new_todo("drop")).await.unwrap();
        store.insert_item(new_item(keep.id, "k")).await.unwrap();
        store.insert_item(new_item(gone.id, "d1")).await.unwrap();
        store.insert_item(new_item(gone.id, "d2")).await.unwrap();

        assert_eq!(store.delete_todo_cascade(gone.id).await.unwrap(), 1);
        assert_eq!(store.delete_todo_cascade(gone.id).await.unwrap(), 0);

        let items = store.list_items(Relations::Skip).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].todo_id, keep.id);
    }

    #[tokio::test]
    async fn save_of_missing_row_returns_none() {
        let store = MemoryStore::new();
        let ghost = Todo {
            id: 7,
            title: "ghost".into(),
            description: None,
            items: None,
        };
        assert!(store.save_todo(&ghost).await.unwrap().is_none());
    }
}
