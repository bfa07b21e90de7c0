//! Review screen for a graded submission.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::session::{
    ChoiceMark, Cursor, MarkAudit, QuestionIssue, Review, ReviewedQuestion,
};

use super::take::navigation_hints;

/// Render the review screen.
pub fn render(frame: &mut Frame, area: Rect, review: &Review) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Score summary
        Constraint::Length(5), // Question text
        Constraint::Min(6),    // Choices
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], review);

    if let Some(question) = review.current() {
        render_question(frame, chunks[1], review, question);
        render_choices(frame, chunks[2], question);
    }
    render_controls(frame, chunks[3], review.cursor());
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.2}", points)
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, review: &Review) {
    let total = review.total_points();
    let percentage = if total > 0.0 {
        (review.reported_mark() / total) * 100.0
    } else {
        0.0
    };

    let grade_color = match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let mut subtitle = format!("Viewing as {}", review.viewer());
    if let Some(submitted_at) = review.submitted_at() {
        subtitle.push_str(&format!(
            "  ·  submitted {}",
            submitted_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    let audit_line = match review.audit() {
        MarkAudit::Consistent { .. } => Line::from(Span::styled(
            "Points check out",
            Style::default().fg(Color::DarkGray),
        )),
        MarkAudit::Mismatch {
            reported,
            recomputed,
        } => Line::from(Span::styled(
            format!(
                "Mark mismatch: reported {} but questions add up to {}",
                format_points(reported),
                format_points(recomputed)
            ),
            Style::default().fg(Color::Red).bold(),
        )),
    };

    let content = vec![
        Line::from(Span::styled(
            review.title(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)",
                format_points(review.reported_mark()),
                format_points(total),
                percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        audit_line,
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_question(frame: &mut Frame, area: Rect, review: &Review, question: &ReviewedQuestion) {
    let title = format!(
        " Question {} of {}  ·  {} / {} pts ",
        review.cursor().index() + 1,
        review.questions().len(),
        format_points(question.earned),
        format_points(question.points)
    );
    let title_color = if question.is_correct() {
        Color::Green
    } else {
        Color::Red
    };

    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(title_color))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn choice_style(mark: ChoiceMark) -> (&'static str, Style) {
    match mark {
        ChoiceMark::ChosenCorrect => (" + ", Style::default().fg(Color::Green).bold()),
        ChoiceMark::ChosenIncorrect => (" x ", Style::default().fg(Color::Red).bold()),
        ChoiceMark::MissedCorrect => (" * ", Style::default().fg(Color::Green)),
        ChoiceMark::Plain => ("   ", Style::default().fg(Color::Gray)),
    }
}

fn render_choices(frame: &mut Frame, area: Rect, question: &ReviewedQuestion) {
    let mut lines: Vec<Line> = question
        .choices
        .iter()
        .map(|choice| {
            let (symbol, style) = choice_style(choice.mark);
            let note = match choice.mark {
                ChoiceMark::ChosenCorrect => "  (your answer, correct)",
                ChoiceMark::ChosenIncorrect => "  (your answer)",
                ChoiceMark::MissedCorrect => "  (correct answer)",
                ChoiceMark::Plain => "",
            };
            Line::from(vec![
                Span::styled(symbol, style),
                Span::styled(choice.text.as_str(), style),
                Span::styled(note, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    if question.chosen.is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Not answered",
            Style::default().fg(Color::Yellow),
        )));
    }
    for issue in &question.issues {
        let text = match issue {
            QuestionIssue::CorrectAnswerNotAmongChoices => {
                format!("Recorded correct answer \"{}\" is not one of the choices", question.correct)
            }
            QuestionIssue::ChosenAnswerNotAmongChoices => format!(
                "Recorded answer \"{}\" is not one of the choices",
                question.chosen.as_deref().unwrap_or_default()
            ),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Red),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Choices ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, cursor: &Cursor) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = navigation_hints(cursor, dim);
    spans.push(Span::styled("  ·  q quit", dim));

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
