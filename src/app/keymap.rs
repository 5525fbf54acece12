//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings apply in Normal mode only. The form and modals use fixed keys
//! (typing, Tab, Enter, Esc) so they never collide with user bindings.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Semantic actions available from the users list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move input focus into the form (create mode unless an edit is active).
    FocusForm,
    /// Load the selected user into the form for editing.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Re-read the full list from the store.
    Reload,
    /// Display the keybindings reference.
    OpenHelp,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [(KeyAction, &str); 11] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::FocusForm, "FocusForm"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::Reload, "Reload"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::Ignore, "Ignore"),
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style j/k, and single-letter commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('i')), KeyAction::FocusForm);
        bindings.insert((M::NONE, Tab), KeyAction::FocusForm);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('r')), KeyAction::Reload);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Some terminals report '?' with SHIFT held
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        Self { bindings }
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Start from defaults and apply `<Action> = <KeySpec>` lines on top.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else { continue };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => warn!(line, "ignoring unrecognised keybinding"),
            }
        }
        map
    }

    /// Export every binding, sorted for a stable file.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-manager keybindings (list view)\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Tab, Up, Down, PageUp, PageDown, Delete, ?\n");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut lines: Vec<String> = self
            .all_bindings()
            .into_iter()
            .map(|((mods, code), action)| format!("{} = {}", format_action(action), Self::format_key(mods, code)))
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Human-readable spec like "Ctrl+q" or "PageDown"; the inverse of `parse_key`.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        let mut out = String::new();
        if mods.contains(KeyModifiers::CONTROL) {
            out.push_str("Ctrl+");
        }
        if mods.contains(KeyModifiers::SHIFT) {
            out.push_str("Shift+");
        }
        out.push_str(&base);
        out
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    loop {
        if let Some(after) = rest.strip_prefix("Ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("Shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = after;
        } else {
            break;
        }
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ALL_ACTIONS.iter().find(|(_, name)| *name == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ALL_ACTIONS
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}
