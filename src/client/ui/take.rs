//! Take screen: the timed quiz.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::client::state::{Prompt, TakeScreen};
use crate::models::Question;
use crate::session::{Countdown, Cursor, Phase, SubmitTrigger, TakeSession};

/// Render the take screen.
pub fn render(frame: &mut Frame, area: Rect, screen: &TakeScreen) {
    let session = &screen.session;

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title and timer
        Constraint::Length(1), // Progress
        Constraint::Length(6), // Question text
        Constraint::Min(6),    // Options
        Constraint::Length(1), // Status
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session);
    render_progress(frame, chunks[1], session);

    let question = session.current_question();
    render_question_text(frame, chunks[2], question);
    render_options(
        frame,
        chunks[3],
        question,
        session.answers().get(&question.id),
        screen.highlighted,
        session.accepts_input(),
    );
    render_status(frame, chunks[4], session);
    render_controls(frame, chunks[5], session.cursor());

    if let Some(prompt) = screen.prompt {
        render_prompt(frame, area, prompt, session);
    }
}

fn timer_style(countdown: &Countdown) -> Style {
    if countdown.is_urgent() {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Green).bold()
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &TakeSession) {
    let quiz = session.quiz();
    let countdown = session.countdown();

    let columns =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).split(area);

    let mut title = vec![Line::from(Span::styled(
        quiz.title.as_str(),
        Style::default().fg(Color::Cyan).bold(),
    ))];
    let mut details = vec![format!("{} pts", quiz.total_points)];
    if let Some(date) = quiz.start_date {
        details.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(time) = quiz.start_time {
        details.push(time.format("%H:%M").to_string());
    }
    title.push(Line::from(Span::styled(
        details.join("  ·  "),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(title), columns[0]);

    let timer = Paragraph::new(countdown.display())
        .alignment(Alignment::Center)
        .style(timer_style(countdown))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(timer_style(countdown)),
        );
    frame.render_widget(timer, columns[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &TakeSession) {
    let (answered, total) = session.progress();
    let progress_text = format!(
        "Question {} of {}  ·  {} of {} answered",
        session.cursor().index() + 1,
        total,
        answered,
        total
    );

    let widget = Paragraph::new(progress_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} pts ", question.points))
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    chosen: Option<&str>,
    highlighted: usize,
    editable: bool,
) {
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_highlighted = editable && i == highlighted;
            let is_chosen = chosen == Some(option.text.as_str());
            let prefix = if is_highlighted { "> " } else { "  " };
            let marker = if is_chosen { "(*) " } else { "( ) " };

            let style = match (is_highlighted, is_chosen) {
                (_, true) => Style::default().fg(Color::Green).bold(),
                (true, false) => Style::default().fg(Color::Yellow).bold(),
                (false, false) if editable => Style::default().fg(Color::White),
                _ => Style::default().fg(Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(marker, style),
                Span::styled(option.text.as_str(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, session: &TakeSession) {
    let (text, color) = match session.phase() {
        Phase::Submitting(SubmitTrigger::Timeout) => ("Time is up. Submitting...", Color::Yellow),
        Phase::Submitting(SubmitTrigger::Manual) => ("Submitting...", Color::Yellow),
        _ => match session.last_error() {
            Some(message) => (message, Color::Red),
            None if session.countdown().is_expired() => {
                ("Time is up. Answers are locked.", Color::Red)
            }
            None => ("", Color::Reset),
        },
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold());
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, cursor: &Cursor) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled("j/k option  ·  Enter select  ·  x clear  ·  ", dim)];
    spans.extend(navigation_hints(cursor, dim));
    spans.push(Span::styled("  ·  s submit  ·  q leave", dim));

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

/// "h prev" / "l next" hints, struck through at either end of the quiz.
pub(super) fn navigation_hints(cursor: &Cursor, style: Style) -> Vec<Span<'static>> {
    let hint = |text: &'static str, available: bool| {
        if available {
            Span::styled(text, style)
        } else {
            Span::styled(text, style.add_modifier(Modifier::CROSSED_OUT))
        }
    };
    vec![
        hint("h prev", !cursor.is_first()),
        Span::styled("  ", style),
        hint("l next", !cursor.is_last()),
        Span::styled("  ·  1-9 jump", style),
    ]
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: Prompt, session: &TakeSession) {
    let (answered, total) = session.progress();
    let (question, detail) = match prompt {
        Prompt::Submit => (
            "Submit your answers?",
            format!("{} of {} answered. This cannot be undone.", answered, total),
        ),
        Prompt::Leave => (
            "Leave this quiz?",
            "Your answers will be lost.".to_string(),
        ),
    };

    let popup = centered_rect(area, 50, 7);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            question,
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "[Y] yes    [N] no",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
