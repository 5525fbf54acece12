use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use super::{User, UserStore};
use crate::error::StoreError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "User" (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    email TEXT NOT NULL
);
"#;

/// [`UserStore`] backed by a SQLite database through `rusqlite`.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and make sure the table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened sqlite database");
        Self::with_connection(conn)
    }

    /// Open a private in-memory database; contents vanish when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        info!("opened in-memory sqlite database");
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}

impl UserStore for SqliteStore {
    fn find_all(&mut self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self.conn.prepare(r#"SELECT id, name, email FROM "User" ORDER BY id"#)?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = users.len(), "find_all");
        Ok(users)
    }

    fn insert(&mut self, name: &str, email: &str) -> Result<User, StoreError> {
        let user = self.conn.query_row(
            r#"INSERT INTO "User" (name, email) VALUES (?1, ?2) RETURNING id, name, email"#,
            params![name, email],
            user_from_row,
        )?;
        debug!(id = user.id, "inserted user");
        Ok(user)
    }

    fn update(&mut self, id: i64, name: &str, email: &str) -> Result<User, StoreError> {
        let user = self
            .conn
            .query_row(
                r#"UPDATE "User" SET name = ?1, email = ?2 WHERE id = ?3 RETURNING id, name, email"#,
                params![name, email, id],
                user_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound { id })?;
        debug!(id, "updated user");
        Ok(user)
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let affected = self.conn.execute(r#"DELETE FROM "User" WHERE id = ?1"#, params![id])?;
        if affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_returns_row_with_fresh_id() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let u = store.insert("John Doe", "john@example.com").unwrap();
        assert_eq!(u, User { id: 1, name: "John Doe".into(), email: "john@example.com".into() });
        assert_eq!(store.find_all().unwrap(), vec![u]);
    }

    #[test]
    fn update_keeps_id_and_overwrites_fields() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let u = store.insert("John Doe", "john@example.com").unwrap();
        let updated = store.update(u.id, "Jane Doe", "jane@example.com").unwrap();
        assert_eq!(updated.id, u.id);
        assert_eq!(updated.name, "Jane Doe");
        assert_eq!(store.find_all().unwrap(), vec![updated]);
    }

    #[test]
    fn update_missing_row_is_not_found() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let err = store.update(5, "A", "a@b.c").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 5 }));
    }

    #[test]
    fn delete_twice_fails_the_second_time() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let u = store.insert("Ann", "ann@example.com").unwrap();
        store.delete(u.id).unwrap();
        assert!(matches!(store.delete(u.id), Err(StoreError::NotFound { .. })));
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert("Ann", "ann@example.com").unwrap();
        store.delete(a.id).unwrap();
        let b = store.insert("Bob", "bob@example.com").unwrap();
        assert_eq!(b.id, 2);
    }

    #[test]
    fn rows_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert("Ann", "ann@example.com").unwrap();
            store.insert("Bob", "bob@example.com").unwrap();
        }
        let mut store = SqliteStore::open(&path).unwrap();
        let names: Vec<String> = store.find_all().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ann".to_string(), "Bob".to_string()]);
    }
}
