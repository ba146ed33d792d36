//! PostgreSQL implementation of [`Store`]
//!
//! - Todo reads with items: one query for todos, one batched `ANY($1)` query
//!   for their items
//! - Item reads with parent: single JOIN
//! - Cascade delete: one transaction, parent row locked first

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use todoctl_core::{
    NewTodo, NewTodoItem, Relations, Store, StoreError, StoreResult, Todo, TodoId, TodoItem,
    TodoItemId,
};

const TODO_COLUMNS: &str = "id, title, description";
const ITEM_COLUMNS: &str = "id, todo_id, name, description, is_completed";

/// `todo` row
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            items: None,
        }
    }
}

/// `todo_item` row
#[derive(Debug, Clone, FromRow)]
struct ItemRow {
    id: i64,
    todo_id: i64,
    name: String,
    description: Option<String>,
    is_completed: bool,
}

impl From<ItemRow> for TodoItem {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            todo_id: row.todo_id,
            name: row.name,
            description: row.description,
            is_completed: row.is_completed,
            todo: None,
        }
    }
}

/// `todo_item` row joined with its parent's columns
#[derive(Debug, Clone, FromRow)]
struct ItemWithTodoRow {
    #[sqlx(flatten)]
    item: ItemRow,
    todo_title: String,
    todo_description: Option<String>,
}

impl From<ItemWithTodoRow> for TodoItem {
    fn from(row: ItemWithTodoRow) -> Self {
        let parent = Todo {
            id: row.item.todo_id,
            title: row.todo_title,
            description: row.todo_description,
            items: None,
        };
        let mut item = TodoItem::from(row.item);
        item.todo = Some(Box::new(parent));
        item
    }
}

const ITEM_WITH_TODO_SELECT: &str = r#"
    SELECT
        i.id,
        i.todo_id,
        i.name,
        i.description,
        i.is_completed,
        t.title AS todo_title,
        t.description AS todo_description
    FROM todo_item i
    JOIN todo t ON t.id = i.todo_id
"#;

/// Map sqlx failures onto the store taxonomy.
fn store_err(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return StoreError::ForeignKey {
                detail: db.message().to_owned(),
            };
        }
    }
    StoreError::backend(err)
}

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Items for the given todos, grouped by owner.
    async fn items_for(&self, todo_ids: &[i64]) -> StoreResult<HashMap<TodoId, Vec<TodoItem>>> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM todo_item WHERE todo_id = ANY($1) ORDER BY id"
        ))
        .bind(todo_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        let mut grouped: HashMap<TodoId, Vec<TodoItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.todo_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn insert_todo(&self, todo: NewTodo) -> StoreResult<Todo> {
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO todo (title, description) VALUES ($1, $2) RETURNING {TODO_COLUMNS}"
        ))
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.into())
    }

    async fn list_todos(&self, relations: Relations) -> StoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> =
            sqlx::query_as(&format!("SELECT {TODO_COLUMNS} FROM todo ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;

        let mut todos: Vec<Todo> = rows.into_iter().map(Todo::from).collect();
        if relations.loaded() && !todos.is_empty() {
            let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
            let mut grouped = self.items_for(&ids).await?;
            for todo in &mut todos {
                todo.items = Some(grouped.remove(&todo.id).unwrap_or_default());
            }
        }
        Ok(todos)
    }

    async fn find_todo(&self, id: TodoId, relations: Relations) -> StoreResult<Option<Todo>> {
        let row: Option<TodoRow> =
            sqlx::query_as(&format!("SELECT {TODO_COLUMNS} FROM todo WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut todo = Todo::from(row);
        if relations.loaded() {
            let mut grouped = self.items_for(&[id]).await?;
            todo.items = Some(grouped.remove(&id).unwrap_or_default());
        }
        Ok(Some(todo))
    }

    async fn save_todo(&self, todo: &Todo) -> StoreResult<Option<Todo>> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "UPDATE todo SET title = $2, description = $3 WHERE id = $1 RETURNING {TODO_COLUMNS}"
        ))
        .bind(todo.id)
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Todo::from))
    }

    async fn delete_todo_cascade(&self, id: TodoId) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        // Lock the parent so no item can be attached while we clean up
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM todo WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?;

        if locked.is_none() {
            // Dropping the transaction rolls it back
            return Ok(0);
        }

        let items = sqlx::query("DELETE FROM todo_item WHERE todo_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?
            .rows_affected();

        let todos = sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?
            .rows_affected();

        tx.commit().await.map_err(store_err)?;

        tracing::debug!(todo_id = id, items_removed = items, "cascade delete committed");
        Ok(todos)
    }

    async fn insert_item(&self, item: NewTodoItem) -> StoreResult<TodoItem> {
        let row: ItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO todo_item (todo_id, name, description, is_completed)
            VALUES ($1, $2, $3, $4)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.todo_id)
        .bind(item.name.as_str())
        .bind(item.description.as_deref())
        .bind(item.is_completed)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.into())
    }

    async fn list_items(&self, relations: Relations) -> StoreResult<Vec<TodoItem>> {
        if relations.loaded() {
            let rows: Vec<ItemWithTodoRow> =
                sqlx::query_as(&format!("{ITEM_WITH_TODO_SELECT} ORDER BY i.id"))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(store_err)?;
            return Ok(rows.into_iter().map(TodoItem::from).collect());
        }

        let rows: Vec<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM todo_item ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;
        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    async fn find_item(
        &self,
        id: TodoItemId,
        relations: Relations,
    ) -> StoreResult<Option<TodoItem>> {
        if relations.loaded() {
            let row: Option<ItemWithTodoRow> =
                sqlx::query_as(&format!("{ITEM_WITH_TODO_SELECT} WHERE i.id = $1"))
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(store_err)?;
            return Ok(row.map(TodoItem::from));
        }

        let row: Option<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM todo_item WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;
        Ok(row.map(TodoItem::from))
    }

    async fn save_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            r#"
            UPDATE todo_item
            SET todo_id = $2, name = $3, description = $4, is_completed = $5
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.todo_id)
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(item.is_completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(TodoItem::from))
    }

    async fn delete_item(&self, id: TodoItemId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM todo_item WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected())
    }
}
