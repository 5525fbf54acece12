//! Application state and the controller flows behind the form.
//!
//! `AppState` owns the local copy of the user list, the pending form fields
//! and the explicit form mode. Each flow calls the data access layer once and
//! patches the local list from the result instead of re-fetching.
//!
pub mod keymap;
pub mod theme;
pub mod update;

use tracing::{debug, info};

use crate::data::UserService;
use crate::store::User;
use crate::validate::validate_new_user;

pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
    Modal,
}

/// Which form field receives typed characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
}

/// Pending form values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub focus: FormField,
}

impl UserForm {
    pub fn new() -> Self {
        Self { name: String::new(), email: String::new(), focus: FormField::Name }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        };
    }

    pub fn fill_from(&mut self, user: &User) {
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.focus = FormField::Name;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

/// What the submit control does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new user.
    Idle,
    /// Submitting overwrites this user's name and email.
    Editing(User),
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Idle => "Create User",
            FormMode::Editing(_) => "Update User",
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            FormMode::Idle => None,
            FormMode::Editing(u) => Some(u.id),
        }
    }
}

/// Modal dialogs layered over the main screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Blocking notice; closes on Enter or Esc.
    Info { message: String },
    /// Confirmation before deleting `user`. `selected` 0 is Yes, 1 is No.
    DeleteConfirm { selected: usize, user: User },
    Help,
}

pub const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete this user?";
pub const UPDATE_SUCCESS_MESSAGE: &str = "User updated successfully.";

pub struct AppState {
    pub service: UserService,
    pub users: Vec<User>,
    pub form: UserForm,
    pub mode: FormMode,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    resume_mode: InputMode,
    mutations: u64,
}

impl AppState {
    /// Build the state and load the user list once.
    pub fn new(service: UserService, theme: Theme, keymap: keymap::Keymap) -> Self {
        let mut app = Self {
            service,
            users: Vec::new(),
            form: UserForm::new(),
            mode: FormMode::Idle,
            input_mode: InputMode::Normal,
            modal: None,
            selected_index: 0,
            rows_per_page: 10,
            theme,
            keymap,
            resume_mode: InputMode::Normal,
            mutations: 0,
        };
        app.load();
        app
    }

    /// Replace the local list with the store's current contents.
    pub fn load(&mut self) {
        self.users = self.service.list();
        self.clamp_selection();
        info!(count = self.users.len(), "user list loaded");
    }

    /// Number of store mutations attempted so far. The event loop compares it
    /// across a key press to tell whether that key reached the store.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.users.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_index = self.selected_index.saturating_add(rpp).min(self.users.len().saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_index = self.selected_index.saturating_sub(rpp);
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.users.len().saturating_sub(1));
    }

    pub fn focus_form(&mut self) {
        self.input_mode = InputMode::Form;
    }

    /// Leave the form. An edit in progress is abandoned.
    pub fn leave_form(&mut self) {
        if matches!(self.mode, FormMode::Editing(_)) {
            self.cancel_edit();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        if self.input_mode != InputMode::Modal {
            self.resume_mode = self.input_mode;
        }
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = self.resume_mode;
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.open_modal(ModalState::Info { message: message.into() });
    }

    fn record_mutation(&mut self, op: &'static str) {
        self.mutations += 1;
        debug!(op, seq = self.mutations, "store mutation");
    }

    /// Run the action the submit control currently stands for.
    pub fn submit(&mut self) {
        match self.mode {
            FormMode::Idle => self.create_user(),
            FormMode::Editing(_) => self.update_user(),
        }
    }

    /// Validate the form and create a user from it.
    pub fn create_user(&mut self) {
        if let Err(e) = validate_new_user(&self.form.name, &self.form.email) {
            debug!(reason = ?e, "create rejected by validation");
            self.alert(e.to_string());
            return;
        }
        self.record_mutation("create");
        match self.service.create(&self.form.name, &self.form.email) {
            Ok(user) => {
                info!(id = user.id, "user created");
                self.users.push(user);
                self.form.clear();
            }
            Err(e) => self.alert(e.to_string()),
        }
    }

    /// Copy the selected user into the form and switch to editing.
    pub fn start_edit(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.start_edit_user(user);
        }
    }

    pub fn start_edit_user(&mut self, user: User) {
        self.form.fill_from(&user);
        debug!(id = user.id, "editing user");
        self.mode = FormMode::Editing(user);
        self.input_mode = InputMode::Form;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Idle;
        self.form.clear();
    }

    /// Write the form back to the user being edited. Not validated.
    pub fn update_user(&mut self) {
        let FormMode::Editing(editing) = &self.mode else {
            return;
        };
        let id = editing.id;
        self.record_mutation("update");
        match self.service.update(id, &self.form.name, &self.form.email) {
            Ok(updated) => {
                info!(id = updated.id, "user updated");
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == updated.id) {
                    *slot = updated;
                }
                self.form.clear();
                self.mode = FormMode::Idle;
                self.alert(UPDATE_SUCCESS_MESSAGE);
            }
            Err(e) => self.alert(e.to_string()),
        }
    }

    /// Ask for confirmation before deleting the selected user.
    pub fn request_delete(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.open_modal(ModalState::DeleteConfirm { selected: 1, user });
        }
    }

    /// Delete `id` after the user confirmed.
    pub fn delete_user(&mut self, id: i64) {
        self.record_mutation("delete");
        match self.service.delete(id) {
            Ok(()) => {
                info!(id, "user deleted");
                self.users.retain(|u| u.id != id);
                self.clamp_selection();
                if self.mode.editing_id() == Some(id) {
                    self.cancel_edit();
                }
            }
            Err(e) => self.alert(e.to_string()),
        }
    }

    /// Resolve the open delete confirmation.
    pub fn answer_delete(&mut self, confirmed: bool) {
        let Some(ModalState::DeleteConfirm { user, .. }) = self.modal.clone() else {
            return;
        };
        self.close_modal();
        if confirmed {
            self.delete_user(user.id);
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("users", &self.users)
            .field("form", &self.form)
            .field("mode", &self.mode)
            .field("input_mode", &self.input_mode)
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
