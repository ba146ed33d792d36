//! Route handlers organized by resource

pub mod health;
pub mod todo_items;
pub mod todos;
