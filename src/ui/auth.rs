use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{App, AuthField};

const FORM_WIDTH: u16 = 48;

pub fn render_auth(app: &App, area: Rect, buf: &mut Buffer) {
    let form = &app.auth;
    let width = FORM_WIDTH.min(area.width);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // tabs
            Constraint::Length(1),
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(2), // error
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(form_area);

    Paragraph::new(Span::styled(
        "⚡ typepace",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().add_modifier(Modifier::DIM))
        }
    };
    Paragraph::new(Line::from(vec![
        tab(" Log In ", !form.signing_up),
        Span::raw("  "),
        tab(" Sign Up ", form.signing_up),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let field_block = |title: &'static str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    };

    Paragraph::new(form.email.as_str())
        .block(field_block("Email", form.field == AuthField::Email))
        .render(chunks[5], buf);

    Paragraph::new("•".repeat(form.password.chars().count()))
        .block(field_block("Password", form.field == AuthField::Password))
        .render(chunks[6], buf);

    if let Some(error) = &form.error {
        Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }

    super::legend("(tab) field / (←/→) log in or sign up / (enter) submit / (esc)ape")
        .render(chunks[8], buf);
}
