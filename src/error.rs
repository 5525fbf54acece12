//! Error and result types shared across the crate.
//!
//! Two layers are modelled separately: [`StoreError`] describes what went wrong
//! inside a persistence backend, while [`DataError`] is the generic kind the
//! data access layer hands to the controller. The `Display` text of a
//! `DataError` is the message shown to the user, so it never carries detail
//! from the underlying store.
use thiserror::Error;

/// Result type used at the binary edge and in the event loop.
pub type Result<T> = anyhow::Result<T>;

/// Failure reported by a [`UserStore`](crate::store::UserStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id exists.
    #[error("user {id} not found")]
    NotFound { id: i64 },
    /// The SQLite driver rejected the statement or the connection broke.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The backend cannot serve requests at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Generic failure kinds surfaced by [`UserService`](crate::data::UserService).
///
/// Listing never fails from the caller's point of view; a broken store yields
/// an empty list instead, so there is no `LoadFailed` variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Error creating user")]
    CreateFailed,
    #[error("Error updating user")]
    UpdateFailed,
    #[error("Error deleting user")]
    DeleteFailed,
}
