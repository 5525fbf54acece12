// Integration tests for user-manager: controller flows over real stores.

use std::cell::RefCell;
use std::rc::Rc;

use user_manager::app::keymap::Keymap;
use user_manager::app::{AppState, FormMode, InputMode, ModalState, Theme, UPDATE_SUCCESS_MESSAGE};
use user_manager::data::UserService;
use user_manager::error::StoreError;
use user_manager::store::{MemoryStore, SqliteStore, User, UserStore};

/// Wraps a store, records every call, and can be told to fail.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<String>>>,
    fail: Rc<RefCell<bool>>,
}

struct RecordingStore {
    inner: MemoryStore,
    rec: Recorder,
}

impl RecordingStore {
    fn check(&self, call: String) -> Result<(), StoreError> {
        self.rec.calls.borrow_mut().push(call);
        if *self.rec.fail.borrow() {
            return Err(StoreError::Unavailable("simulated outage".into()));
        }
        Ok(())
    }
}

impl UserStore for RecordingStore {
    fn find_all(&mut self) -> Result<Vec<User>, StoreError> {
        self.check("find_all".into())?;
        self.inner.find_all()
    }
    fn insert(&mut self, name: &str, email: &str) -> Result<User, StoreError> {
        self.check(format!("insert {name}"))?;
        self.inner.insert(name, email)
    }
    fn update(&mut self, id: i64, name: &str, email: &str) -> Result<User, StoreError> {
        self.check(format!("update {id}"))?;
        self.inner.update(id, name, email)
    }
    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.check(format!("delete {id}"))?;
        self.inner.delete(id)
    }
}

fn recorded_app(rows: Vec<User>) -> (AppState, Recorder) {
    let rec = Recorder::default();
    let store = RecordingStore { inner: MemoryStore::with_rows(rows), rec: rec.clone() };
    let app = AppState::new(UserService::new(Box::new(store)), Theme::dark(), Keymap::default());
    (app, rec)
}

fn mutating_calls(rec: &Recorder) -> Vec<String> {
    rec.calls.borrow().iter().filter(|c| *c != "find_all").cloned().collect()
}

fn fill(app: &mut AppState, name: &str, email: &str) {
    app.form.name = name.to_string();
    app.form.email = email.to_string();
}

fn info_message(app: &AppState) -> Option<&str> {
    match &app.modal {
        Some(ModalState::Info { message }) => Some(message.as_str()),
        _ => None,
    }
}

fn user(id: i64, name: &str, email: &str) -> User {
    User { id, name: name.into(), email: email.into() }
}

// 1) End-to-end: create, update, delete against a SQLite file, reloading between steps
#[test]
fn end_to_end_create_update_delete() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("users.db");
    let open = || {
        let store = SqliteStore::open(&db).unwrap();
        AppState::new(UserService::new(Box::new(store)), Theme::dark(), Keymap::default())
    };

    let mut app = open();
    assert!(app.users.is_empty());

    fill(&mut app, "John Doe", "john@example.com");
    app.submit();
    assert_eq!(app.users, vec![user(1, "John Doe", "john@example.com")]);
    assert_eq!(open().users, app.users);

    app.start_edit();
    assert_eq!(app.mode, FormMode::Editing(user(1, "John Doe", "john@example.com")));
    app.form.clear();
    fill(&mut app, "Jane Doe", "jane@example.com");
    app.submit();
    assert_eq!(info_message(&app), Some(UPDATE_SUCCESS_MESSAGE));
    assert_eq!(app.mode, FormMode::Idle);
    assert!(app.form.name.is_empty() && app.form.email.is_empty());
    assert_eq!(app.users, vec![user(1, "Jane Doe", "jane@example.com")]);
    assert_eq!(open().users, app.users);
    app.close_modal();

    app.request_delete();
    app.answer_delete(true);
    assert!(app.users.is_empty());
    assert!(open().users.is_empty());
}

// 2) Rejection: invalid name never reaches the store
#[test]
fn rejected_name_does_not_touch_store() {
    let (mut app, rec) = recorded_app(vec![]);
    fill(&mut app, "John123", "john@example.com");
    app.submit();
    assert!(mutating_calls(&rec).is_empty());
    assert_eq!(info_message(&app), Some("Please enter a valid name (letters and spaces only)"));
    assert_eq!(app.form.name, "John123");
}

// 3) Overlong fields never reach the store
#[test]
fn overlong_fields_do_not_touch_store() {
    let (mut app, rec) = recorded_app(vec![]);
    fill(&mut app, &"a".repeat(21), "a@b.co");
    app.submit();
    app.close_modal();
    fill(&mut app, "Ann", &format!("{}@example.com", "a".repeat(14)));
    app.submit();
    assert!(mutating_calls(&rec).is_empty());
    assert_eq!(info_message(&app), Some("Email cannot be longer than 25 characters"));
}

// 4) Store failures: list degrades silently, mutations alert and keep state
#[test]
fn failures_keep_prior_state() {
    let rows = vec![user(1, "Ann", "ann@x.com")];
    let (mut app, rec) = recorded_app(rows.clone());
    *rec.fail.borrow_mut() = true;

    fill(&mut app, "Bob", "bob@x.com");
    app.submit();
    assert_eq!(info_message(&app), Some("Error creating user"));
    assert_eq!(app.form.name, "Bob");
    assert_eq!(app.users, rows);
    app.close_modal();

    app.start_edit();
    fill(&mut app, "Annie", "annie@x.com");
    app.submit();
    assert_eq!(info_message(&app), Some("Error updating user"));
    assert!(matches!(app.mode, FormMode::Editing(_)));
    assert_eq!(app.users, rows);
    app.close_modal();
    app.leave_form();

    app.request_delete();
    app.answer_delete(true);
    assert_eq!(info_message(&app), Some("Error deleting user"));
    assert_eq!(app.users, rows);
    app.close_modal();

    app.load();
    assert!(app.users.is_empty(), "a failed load looks like an empty store");
    assert_eq!(mutating_calls(&rec), vec!["insert Bob", "update 1", "delete 1"]);
}

// 5) Declining the confirmation makes no call
#[test]
fn declined_delete_makes_no_call() {
    let (mut app, rec) = recorded_app(vec![user(4, "Ann", "ann@x.com")]);
    app.request_delete();
    assert!(matches!(app.modal, Some(ModalState::DeleteConfirm { .. })));
    app.answer_delete(false);
    assert!(app.modal.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(mutating_calls(&rec).is_empty());
    assert_eq!(app.users.len(), 1);
}

// 6) Local list is only patched; a reload converges with changes made elsewhere
#[test]
fn reload_converges_with_store() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("users.db");
    let mut app = AppState::new(
        UserService::new(Box::new(SqliteStore::open(&db).unwrap())),
        Theme::dark(),
        Keymap::default(),
    );

    let mut other = SqliteStore::open(&db).unwrap();
    other.insert("Zed", "zed@example.com").unwrap();
    assert!(app.users.is_empty());

    app.load();
    assert_eq!(app.users, vec![user(1, "Zed", "zed@example.com")]);
}

// 7) Update writes exactly the id being edited and keeps it
#[test]
fn update_targets_edited_id() {
    let (mut app, rec) = recorded_app(vec![user(3, "Bob", "bob@x.com"), user(7, "Eve", "eve@x.com")]);
    app.start_edit_user(user(7, "Eve", "eve@x.com"));
    fill(&mut app, "Alice", "a@x.com");
    app.update_user();
    assert_eq!(mutating_calls(&rec), vec!["update 7"]);
    assert_eq!(app.users[1], user(7, "Alice", "a@x.com"));
    assert_eq!(app.users[0], user(3, "Bob", "bob@x.com"));
}
