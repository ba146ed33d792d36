//! Application state shared across handlers

use std::sync::Arc;

use todoctl_core::{Store, TodoItemService, TodoService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn Store>,
    todos: TodoService,
    items: TodoItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                todos: TodoService::new(store.clone()),
                items: TodoItemService::new(store.clone()),
                store,
            }),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    pub fn todos(&self) -> &TodoService {
        &self.inner.todos
    }

    pub fn items(&self) -> &TodoItemService {
        &self.inner.items
    }
}
