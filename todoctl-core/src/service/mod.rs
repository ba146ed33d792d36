//! Services owning the Todo and TodoItem lifecycles

pub mod todo;
pub mod todo_item;

pub use todo::TodoService;
pub use todo_item::TodoItemService;
