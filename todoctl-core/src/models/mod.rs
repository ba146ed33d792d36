//! Domain models with validation at construction
//!
//! Request payloads (`Create*`, `Update*`) deserialize from JSON as-is and are
//! validated into store inputs (`New*`) or applied onto loaded entities.
//! Invalid input returns ValidationError, not panic.

pub mod label;
pub mod response;
pub mod todo;
pub mod todo_item;
pub mod validation;

pub use label::{ItemName, TodoTitle, MAX_LABEL_LEN};
pub use response::BaseResponse;
pub use todo::{CreateTodo, NewTodo, Todo, TodoId, UpdateTodo};
pub use todo_item::{CreateTodoItem, NewTodoItem, TodoItem, TodoItemId, UpdateTodoItem};
pub use validation::ValidationError;

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null` in a patch.
///
/// Used with `#[serde(default, deserialize_with = "nullable")]`: a missing key
/// stays `None`, `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
