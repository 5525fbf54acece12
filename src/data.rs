//! Data access layer: one store call per operation.
//!
//! Mutations report a generic [`DataError`]; the store's own error is logged
//! and then dropped. Listing swallows failures and returns an empty vector, so
//! a broken store looks the same as an empty one to the caller.
use tracing::{debug, warn};

use crate::error::DataError;
use crate::store::{User, UserStore};

pub struct UserService {
    store: Box<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Box<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn list(&mut self) -> Vec<User> {
        match self.store.find_all() {
            Ok(users) => {
                debug!(count = users.len(), "loaded users");
                users
            }
            Err(e) => {
                warn!(error = %e, "listing users failed; returning empty list");
                Vec::new()
            }
        }
    }

    pub fn create(&mut self, name: &str, email: &str) -> Result<User, DataError> {
        self.store.insert(name, email).map_err(|e| {
            warn!(error = %e, "create user failed");
            DataError::CreateFailed
        })
    }

    pub fn update(&mut self, id: i64, name: &str, email: &str) -> Result<User, DataError> {
        self.store.update(id, name, email).map_err(|e| {
            warn!(id, error = %e, "update user failed");
            DataError::UpdateFailed
        })
    }

    pub fn delete(&mut self, id: i64) -> Result<(), DataError> {
        self.store.delete(id).map_err(|e| {
            warn!(id, error = %e, "delete user failed");
            DataError::DeleteFailed
        })
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl UserStore for BrokenStore {
        fn find_all(&mut self) -> Result<Vec<User>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        fn insert(&mut self, _: &str, _: &str) -> Result<User, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        fn update(&mut self, _: i64, _: &str, _: &str) -> Result<User, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        fn delete(&mut self, _: i64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn list_degrades_to_empty_on_failure() {
        let mut svc = UserService::new(Box::new(BrokenStore));
        assert!(svc.list().is_empty());
    }

    #[test]
    fn mutations_map_to_generic_errors() {
        let mut svc = UserService::new(Box::new(BrokenStore));
        assert_eq!(svc.create("Ann", "a@b.co"), Err(DataError::CreateFailed));
        assert_eq!(svc.update(1, "Ann", "a@b.co"), Err(DataError::UpdateFailed));
        assert_eq!(svc.delete(1), Err(DataError::DeleteFailed));
    }

    #[test]
    fn create_then_list_contains_new_user() {
        let mut svc = UserService::new(Box::new(MemoryStore::new()));
        let created = svc.create("John Doe", "john@example.com").unwrap();
        let all = svc.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[test]
    fn update_of_missing_id_fails() {
        let mut svc = UserService::new(Box::new(MemoryStore::new()));
        assert_eq!(svc.update(7, "Alice", "a@x.com"), Err(DataError::UpdateFailed));
    }

    #[test]
    fn update_keeps_id() {
        let rows = vec![User { id: 7, name: "Bob".into(), email: "bob@x.com".into() }];
        let mut svc = UserService::new(Box::new(MemoryStore::with_rows(rows)));
        let updated = svc.update(7, "Alice", "a@x.com").unwrap();
        assert_eq!(updated, User { id: 7, name: "Alice".into(), email: "a@x.com".into() });
        assert_eq!(svc.list(), vec![updated]);
    }

    #[test]
    fn double_delete_fails_second_time() {
        let mut svc = UserService::new(Box::new(MemoryStore::new()));
        let u = svc.create("Ann", "ann@example.com").unwrap();
        assert_eq!(svc.delete(u.id), Ok(()));
        assert_eq!(svc.delete(u.id), Err(DataError::DeleteFailed));
        assert!(svc.list().is_empty());
    }
}
