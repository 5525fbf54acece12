//! Persistence layer for the `User` table.
//!
//! [`UserStore`] is the capability the data access layer is built on. It is
//! injected at construction time so tests (and `--in-memory` runs) can swap the
//! SQLite backend for [`MemoryStore`].
pub mod sqlite;

use std::fmt;

use crate::error::StoreError;

pub use sqlite::SqliteStore;

/// A persisted user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.name, self.email)
    }
}

/// Single-row operations against the user table.
///
/// Every method is one atomic call: it either applies fully or reports an
/// error and leaves the table untouched.
pub trait UserStore {
    /// All rows in insertion order.
    fn find_all(&mut self) -> Result<Vec<User>, StoreError>;

    /// Insert a row and return it with its newly assigned id.
    fn insert(&mut self, name: &str, email: &str) -> Result<User, StoreError>;

    /// Overwrite `name` and `email` of the row with `id`.
    fn update(&mut self, id: i64, name: &str, email: &str) -> Result<User, StoreError>;

    /// Remove the row with `id`. A missing row is an error.
    fn delete(&mut self, id: i64) -> Result<(), StoreError>;
}

/// In-process store backed by a `Vec`.
///
/// Ids start at 1 and are never reused, matching the SQLite schema.
#[derive(Debug)]
pub struct MemoryStore {
    rows: Vec<User>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    /// Build a store that already holds `rows`; the id counter continues after the largest id.
    pub fn with_rows(rows: Vec<User>) -> Self {
        let next_id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryStore {
    fn find_all(&mut self) -> Result<Vec<User>, StoreError> {
        Ok(self.rows.clone())
    }

    fn insert(&mut self, name: &str, email: &str) -> Result<User, StoreError> {
        let user = User { id: self.next_id, name: name.to_string(), email: email.to_string() };
        self.next_id += 1;
        self.rows.push(user.clone());
        Ok(user)
    }

    fn update(&mut self, id: i64, name: &str, email: &str) -> Result<User, StoreError> {
        let row = self
            .rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound { id })?;
        row.name = name.to_string();
        row.email = email.to_string();
        Ok(row.clone())
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let pos = self
            .rows
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound { id })?;
        self.rows.remove(pos);
        Ok(())
    }
}
