pub mod auth;
pub mod menu;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};
use typepace::{achievements::SPEED_DEMON_WPM, celebration::Confetti};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const CONFETTI_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);

        if self.state == AppState::Results && self.confetti.is_active() {
            render_confetti(&self.confetti, self, area, buf);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

pub(crate) fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let now = app.now();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = session.text().width() as u16;
    let prompt_occupied_lines = if prompt_width <= max_chars_per_line {
        1
    } else {
        prompt_width.div_ceil(max_chars_per_line) + 1
    };
    let padding = area.height.saturating_sub(prompt_occupied_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(1), // header
            Constraint::Length(1), // caps lock
            Constraint::Length(1),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let metrics = session.live_metrics(now);
    let clock = match session.remaining_secs(now) {
        Some(secs) => format!("{secs}s left"),
        None => {
            let elapsed = session
                .started_at()
                .map(|start| (now - start).num_seconds().max(0))
                .unwrap_or(0);
            format!("{elapsed}s")
        }
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(session.kind().mode_label(), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(clock, bold().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(format!("{} wpm", metrics.wpm), bold()),
        Span::raw("   "),
        Span::styled(format!("{}% acc", metrics.accuracy), bold()),
        Span::raw("   "),
        Span::styled(
            format!("{} errors", session.errors()),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[1], buf);

    if app.caps_lock {
        Paragraph::new(Span::styled(
            "⚠ Caps Lock is ON",
            bold().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    let mut spans: Vec<Span> = vec![Span::styled(
        session.typed().iter().collect::<String>(),
        bold().fg(Color::Green),
    )];
    if let Some(expected) = session.expected_char() {
        spans.push(Span::styled(
            expected.to_string(),
            dim_bold()
                .add_modifier(Modifier::UNDERLINED)
                .bg(Color::Rgb(80, 70, 20)),
        ));
    }
    spans.push(Span::styled(
        session.upcoming().iter().collect::<String>(),
        dim_bold(),
    ));

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

    legend("(tab) restart / (esc) menu").render(chunks[6], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.last_result.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // wpm
            Constraint::Length(1), // accuracy
            Constraint::Length(1), // mode
            Constraint::Length(1), // streak
            Constraint::Length(1),
            Constraint::Length(1), // achievement
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let centered = |text: String, style: Style| {
        Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center)
    };

    centered("Amazing Work!".to_string(), bold().fg(Color::Yellow)).render(chunks[1], buf);
    centered(
        format!("{} wpm   (raw {} wpm)", result.wpm, result.raw_wpm),
        bold().fg(Color::Yellow),
    )
    .render(chunks[3], buf);
    centered(
        format!("{}% acc   {} errors", result.accuracy, result.errors),
        bold().fg(Color::Green),
    )
    .render(chunks[4], buf);
    centered(result.mode.clone(), Style::default().fg(Color::Cyan)).render(chunks[5], buf);
    centered(
        format!("🔥 {} day streak", app.last_streak),
        Style::default().fg(Color::LightRed),
    )
    .render(chunks[6], buf);

    if result.wpm >= SPEED_DEMON_WPM {
        centered(
            "★ Achievement Unlocked: Speed Demon! ★".to_string(),
            bold().fg(Color::Magenta),
        )
        .render(chunks[8], buf);
    }

    legend("(r)etry / (m)enu / (esc)ape").render(chunks[10], buf);
}

/// Confetti falls top to bottom over the whole screen.
fn render_confetti(confetti: &Confetti, app: &App, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    for (particle, x, y) in confetti.visible(app.now()) {
        let col = ((x * area.width as f64) as u16).min(area.width - 1);
        let row = ((y * area.height as f64) as u16).min(area.height - 1);
        let color = CONFETTI_COLORS[particle.color_index % CONFETTI_COLORS.len()];

        if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        }
    }
}

#[cfg(test)]
pub(crate) fn rendered(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
