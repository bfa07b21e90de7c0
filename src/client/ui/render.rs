//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::client::state::{ClientApp, ClientState};
use crate::session::SubmitTrigger;

use super::{review, take};

const APP_TITLE: &str = "SCHOOL QUIZ";

/// Render the client UI based on current state.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        ClientState::Loading { message } => render_loading(frame, area, message),
        ClientState::Taking(screen) => take::render(frame, area, screen),
        ClientState::Submitted {
            title,
            trigger,
            answered,
            total,
        } => render_submitted(frame, area, title, *trigger, *answered, *total),
        ClientState::Reviewing(review) => review::render(frame, area, review),
        ClientState::Empty { message } => render_empty(frame, area, message),
    }
}

fn centered(area: Rect, height: u16) -> Rect {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area)[1]
}

fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, centered(area, 5));
}

fn render_submitted(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    trigger: SubmitTrigger,
    answered: usize,
    total: usize,
) {
    let headline = match trigger {
        SubmitTrigger::Manual => "Quiz submitted",
        SubmitTrigger::Timeout => "Time is up. Quiz submitted",
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(Span::styled(
            format!("{} of {} questions answered", answered, total),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, centered(area, 7));
}

fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, centered(area, 8));
}
