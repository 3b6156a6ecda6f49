use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::{App, MenuItem};
use typepace::{achievements, history::TestResult};

const RECENT_RESULTS: usize = 5;

pub fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let greeting = match &app.user {
        Some(user) => format!("typepace · {}", user.email),
        None => "typepace".to_string(),
    };
    Paragraph::new(Span::styled(
        greeting,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .render(rows[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_items(app, columns[0], buf);
    render_dashboard(app, columns[1], buf);

    let legend = if app.user.is_some() {
        "(↑/↓) select / (enter) start / (o) log out / (q)uit"
    } else {
        "(↑/↓) select / (enter) start / (q)uit"
    };
    super::legend(legend).render(rows[2], buf);
}

fn render_items(app: &App, area: Rect, buf: &mut Buffer) {
    let items: Vec<ListItem> = MenuItem::all()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == app.menu_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(item.label(), style))
        })
        .collect();

    List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Practice"))
        .render(area, buf);
}

fn render_dashboard(app: &App, area: Rect, buf: &mut Buffer) {
    let now = app.now();
    let history = app.progress().history();
    let streak = app.streak();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Best {} wpm", history.best_wpm()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("   "),
            Span::raw(format!("Avg {} wpm", history.avg_wpm())),
            Span::raw("   "),
            Span::raw(format!("{}% acc", history.avg_accuracy())),
        ]),
        Line::from(vec![
            Span::styled(
                format!("🔥 {streak} day streak"),
                Style::default().fg(Color::LightRed),
            ),
            Span::raw("   "),
            Span::raw(format!("{} today", history.today_count(now))),
            Span::raw("   "),
            Span::raw(format!("{} total", history.total_tests())),
        ]),
        Line::default(),
    ];

    lines.extend(
        achievements::evaluate(history, streak)
            .into_iter()
            .map(|(achievement, unlocked)| {
                let style = if unlocked {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                Line::from(Span::styled(
                    format!(
                        "{} {} {} ({})",
                        if unlocked { '✓' } else { '·' },
                        achievement.icon(),
                        achievement,
                        achievement.requirement()
                    ),
                    style,
                ))
            }),
    );

    lines.push(Line::default());
    if history.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tests yet. Pick a mode to start!",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(
            history
                .entries()
                .iter()
                .take(RECENT_RESULTS)
                .map(|result| Line::from(recent_line(result, now))),
        );
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .render(area, buf);
}

fn recent_line(result: &TestResult, now: chrono::DateTime<chrono::Local>) -> String {
    let when = result
        .completed_at()
        .map(|at| {
            let ago = (now - at).to_std().unwrap_or_default();
            HumanTime::from(ago).to_text_en(Accuracy::Rough, Tense::Past)
        })
        .unwrap_or_else(|| result.date.clone());

    [
        format!("{} wpm", result.wpm),
        format!("{}%", result.accuracy),
        result.mode.clone(),
        when,
    ]
    .iter()
    .join(" · ")
}
