//! todoctl-core: the Todo / TodoItem model and the services that own it
//!
//! Services talk to persistence only through the [`Store`] trait, so the same
//! logic runs against PostgreSQL in production and [`MemoryStore`] in tests.

pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use error::{Entity, ServiceError, ServiceResult, StoreError, StoreResult};
pub use models::{
    BaseResponse, CreateTodo, CreateTodoItem, ItemName, NewTodo, NewTodoItem, Todo, TodoId,
    TodoItem, TodoItemId, TodoTitle, UpdateTodo, UpdateTodoItem, ValidationError,
};
pub use service::{TodoItemService, TodoService};
pub use store::{MemoryStore, Relations, Store};
