//! Shared UI components (status bar, modal helpers).
//!
use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, FormMode, InputMode, ModalState};

/// Render the bottom status bar with mode, form state and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Form => "FORM",
        InputMode::Modal => "MODAL",
    };
    let form = match &app.mode {
        FormMode::Idle => "Idle".to_string(),
        FormMode::Editing(u) => format!("Editing #{}", u.id),
    };
    let msg = format!("mode: {mode}  form: {form}  users:{}  rows/page:{}", app.users.len(), app.rows_per_page);
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Blocking notice: validation messages, errors and the update confirmation.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let width = 50u16.min(max_w);
        let approx_lines = (message.chars().count() as u16 / width.saturating_sub(4).max(10)).max(1);
        let height = (approx_lines + 4).min(area.height.saturating_sub(2).max(5));
        let rect = centered_rect(width, height, area);
        let p = Paragraph::new(message.clone()).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

fn action_label(action: KeyAction) -> Option<&'static str> {
    Some(match action {
        KeyAction::Quit => "Quit",
        KeyAction::FocusForm => "New user / focus form",
        KeyAction::EditSelection => "Edit selected",
        KeyAction::DeleteSelection => "Delete selected",
        KeyAction::Reload => "Reload list",
        KeyAction::OpenHelp => "Show this help",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::PageUp => "Page up",
        KeyAction::PageDown => "Page down",
        KeyAction::Ignore => return None,
    })
}

/// Group the keymap by action so each line lists every key bound to it.
pub fn keybind_lines(keymap: &Keymap) -> Vec<(&'static str, String)> {
    let mut grouped: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for ((mods, code), action) in keymap.all_bindings() {
        if let Some(label) = action_label(action) {
            grouped.entry(label).or_default().push(Keymap::format_key(mods, code));
        }
    }
    grouped
        .into_iter()
        .map(|(label, mut keys)| {
            keys.sort();
            (label, keys.join(", "))
        })
        .collect()
}

/// Keybindings reference for the list view plus the fixed form keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("List:", bold))];
    for (label, keys) in keybind_lines(&app.keymap) {
        lines.push(Line::from(vec![Span::raw(format!("  {label:>22} │ ")), Span::styled(keys, italic)]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Form:", bold)));
    for (label, keys) in [
        ("Switch field", "Tab, Up, Down"),
        ("Submit", "Enter"),
        ("Delete character", "Backspace"),
        ("Back to list", "Esc (cancels an edit)"),
    ] {
        lines.push(Line::from(vec![Span::raw(format!("  {label:>22} │ ")), Span::styled(keys, italic)]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![Span::raw("Close help: "), Span::styled("Esc / Enter", italic)]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clipped_to_area() {
        let area = Rect { x: 0, y: 0, width: 20, height: 10 };
        let r = centered_rect(40, 4, area);
        assert_eq!(r, Rect { x: 0, y: 3, width: 20, height: 4 });
    }

    #[test]
    fn keybind_lines_group_keys_per_action() {
        let lines = keybind_lines(&Keymap::default());
        let (_, keys) = lines.iter().find(|(label, _)| *label == "Move down").unwrap();
        assert_eq!(keys, "Down, j");
        assert!(lines.iter().all(|(label, _)| !label.is_empty()));
    }
}
