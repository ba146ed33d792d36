//! Todo aggregate root

use serde::{Deserialize, Serialize};

use super::{nullable, TodoItem, TodoTitle, ValidationError};

/// Store-generated todo identifier
pub type TodoId = i64;

/// Todo record
///
/// `items` is only populated when the read asked for the relation; it is
/// left out of the JSON entirely otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TodoItem>>,
}

/// POST /todo body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated insert for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: Option<String>,
}

impl TryFrom<CreateTodo> for NewTodo {
    type Error = ValidationError;

    fn try_from(input: CreateTodo) -> Result<Self, Self::Error> {
        Ok(Self {
            title: TodoTitle::new(&input.title)?,
            description: input.description,
        })
    }
}

/// PATCH /todo/{id} body
///
/// Fields left out are not touched. `"description": null` clears the
/// description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateTodo {
    /// Overwrite the provided fields on `todo`.
    ///
    /// Validates everything first so a rejected patch leaves `todo` untouched.
    pub fn apply_to(self, todo: &mut Todo) -> Result<(), ValidationError> {
        let title = self.title.as_deref().map(TodoTitle::new).transpose()?;

        if let Some(title) = title {
            todo.title = title.into_string();
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        Ok(())
    }
}
