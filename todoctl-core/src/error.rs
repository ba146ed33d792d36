//! Error types for todoctl-core

use std::fmt;

use thiserror::Error;

use crate::models::ValidationError;

pub type StoreResult<T> = Result<T, StoreError>;
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure reported by a [`Store`](crate::Store) backend.
///
/// Services never catch these; they travel unchanged to the HTTP boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert or update referenced a row that does not exist
    #[error("foreign key violation: {detail}")]
    ForeignKey { detail: String },

    /// Anything else the backend raised (connectivity, timeouts, SQL errors)
    #[error("store error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Entity kinds, used to phrase not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Todo,
    TodoItem,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => f.write_str("Todo"),
            Self::TodoItem => f.write_str("TodoItem"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(Entity),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
