//! TodoItem, owned by a Todo

use serde::{Deserialize, Serialize};

use super::{nullable, ItemName, Todo, TodoId, ValidationError};

/// Store-generated item identifier
pub type TodoItemId = i64;

/// TodoItem record
///
/// `todo` is the back-reference to the owning todo, populated only when the
/// read asked for it. It never carries its own `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoItemId,
    pub todo_id: TodoId,
    pub name: String,
    pub description: Option<String>,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<Box<Todo>>,
}

/// POST /todo-item body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItem {
    pub todo_id: TodoId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl CreateTodoItem {
    pub fn new(todo_id: TodoId, name: impl Into<String>) -> Self {
        Self {
            todo_id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }
}

/// Validated insert for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoItem {
    pub todo_id: TodoId,
    pub name: ItemName,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl TryFrom<CreateTodoItem> for NewTodoItem {
    type Error = ValidationError;

    fn try_from(input: CreateTodoItem) -> Result<Self, Self::Error> {
        Ok(Self {
            todo_id: input.todo_id,
            name: ItemName::new(&input.name)?,
            description: input.description,
            is_completed: input.is_completed.unwrap_or(false),
        })
    }
}

/// PATCH /todo-item/{id} body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItem {
    #[serde(default)]
    pub todo_id: Option<TodoId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl UpdateTodoItem {
    /// Overwrite the provided fields on `item`.
    ///
    /// A changed `todo_id` drops the loaded back-reference since it no longer
    /// describes the item's owner.
    pub fn apply_to(self, item: &mut TodoItem) -> Result<(), ValidationError> {
        let name = self.name.as_deref().map(ItemName::new).transpose()?;

        if let Some(name) = name {
            item.name = name.into_string();
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(is_completed) = self.is_completed {
            item.is_completed = is_completed;
        }
        if let Some(todo_id) = self.todo_id {
            if todo_id != item.todo_id {
                item.todo_id = todo_id;
                item.todo = None;
            }
        }
        Ok(())
    }
}
