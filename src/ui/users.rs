use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, CONFIRM_DELETE_PROMPT, FormField, FormMode, InputMode, ModalState};
use crate::ui::components::centered_rect;

/// Users table, paged so the selected row is always visible.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.users.len());
    let slice = app.users.get(start..end).unwrap_or_default();
    let editing = app.mode.editing_id();

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let mut style = Style::default().fg(app.theme.text);
        if start + i == app.selected_index {
            style = style.fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD);
        }
        let marker = if editing == Some(u.id) { "✎" } else { " " };
        Row::new(vec![
            Cell::from(marker),
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
        ])
        .style(style)
    });

    let widths = [Constraint::Length(1), Constraint::Length(6), Constraint::Percentage(40), Constraint::Percentage(60)];
    let header = Row::new(vec!["", "ID", "NAME", "EMAIL"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let border = if app.input_mode == InputMode::Normal { app.theme.focus } else { app.theme.border };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Users").borders(Borders::ALL).border_style(Style::default().fg(border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Name and email fields plus the submit control for the current mode.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState) {
    let in_form = app.input_mode == InputMode::Form;
    let field_line = |label: &'static str, value: &str, field: FormField| {
        let focused = in_form && app.form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let cursor = if focused { "_" } else { "" };
        let style = if focused { Style::default().fg(app.theme.focus) } else { Style::default().fg(app.theme.text) };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<6} "), style),
            Span::styled(format!("{value}{cursor}"), style.add_modifier(Modifier::BOLD)),
        ])
    };

    let title = match &app.mode {
        FormMode::Idle => "New user".to_string(),
        FormMode::Editing(u) => format!("Editing user #{}", u.id),
    };
    let lines = vec![
        field_line("Name", &app.form.name, FormField::Name),
        field_line("Email", &app.form.email, FormField::Email),
        Line::raw(""),
        Line::from(Span::styled(
            format!("[ {} ]", app.mode.submit_label()),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
    ];

    let border = if in_form { app.theme.focus } else { app.theme.border };
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border)));
    f.render_widget(p, area);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::DeleteConfirm { selected, user } = state else {
        return;
    };
    let rect = centered_rect(52, 8, area);
    let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
    let no = if *selected == 1 { "[No]" } else { " No " };
    let body = format!("{CONFIRM_DELETE_PROMPT}\n\n{}\n\n  {yes}    {no}", user);
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
