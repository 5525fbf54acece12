use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::ui;

/// What the loop should do after a key was handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where the event loop reads terminal input from.
pub trait EventSource {
    /// Wait up to `timeout` for the next event. `Duration::ZERO` only returns
    /// events that are already queued.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

pub fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    events: &mut E,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let Some(Event::Key(key)) = events.next_event(Duration::from_millis(200))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let before = app.mutation_count();
        if handle_key(app, key) == Flow::Quit {
            break;
        }
        if app.mutation_count() != before {
            // Keys typed while the store call blocked must not fire a second mutation.
            let dropped = drain_pending_input(events)?;
            if dropped > 0 {
                debug!(dropped, "discarded input buffered during mutation");
            }
        }
    }
    Ok(())
}

fn drain_pending_input<E: EventSource>(events: &mut E) -> Result<usize> {
    let mut dropped = 0;
    while events.next_event(Duration::ZERO)?.is_some() {
        dropped += 1;
    }
    Ok(dropped)
}

/// Route one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Form => {
            handle_form_key(app, key);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            Flow::Continue
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::FocusForm => app.focus_form(),
        KeyAction::EditSelection => app.start_edit(),
        KeyAction::DeleteSelection => app.request_delete(),
        KeyAction::Reload => app.load(),
        KeyAction::OpenHelp => app.open_modal(ModalState::Help),
        KeyAction::MoveUp => app.select_prev(),
        KeyAction::MoveDown => app.select_next(),
        KeyAction::PageUp => app.page_up(),
        KeyAction::PageDown => app.page_down(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.form.toggle_focus(),
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.form.push_char(c)
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Info { .. }) | Some(ModalState::Help) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_modal();
            }
        }
        Some(ModalState::DeleteConfirm { selected, .. }) => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = 1 - (*selected).min(1);
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_delete(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_delete(false),
            KeyCode::Enter => {
                let confirmed = *selected == 0;
                app.answer_delete(confirmed);
            }
            _ => {}
        },
        None => app.close_modal(),
    }
}
