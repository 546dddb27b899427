use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::{AnswerRecord, CompletionReason, GradeLetter, QuizSession};

use super::format_clock;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], session);
    render_question_breakdown(frame, chunks[2], session, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(letter: GradeLetter) -> Color {
    match letter {
        GradeLetter::APlus | GradeLetter::A => Color::Green,
        GradeLetter::B => Color::Cyan,
        GradeLetter::C | GradeLetter::D => Color::Yellow,
        GradeLetter::F => Color::Red,
    }
}

fn completion_label(session: &QuizSession) -> String {
    match session.completion() {
        Some(CompletionReason::TimeExpired) => "Temps écoulé".to_string(),
        Some(CompletionReason::Finished) if session.quiz().is_timed() => format!(
            "Terminé avec {} restantes",
            format_clock(session.time_remaining_seconds())
        ),
        _ => "Terminé".to_string(),
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let Ok(grade) = session.grade() else {
        return;
    };
    let grade_color = get_grade_color(grade.letter);

    let content = vec![
        Line::from(Span::styled(
            session.quiz().title.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  ·  {}%", grade.letter, grade.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(grade.message, Style::default().fg(grade_color))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {} correctes  ·  {} points  ·  meilleure série {}",
                session.correct_count(),
                session.quiz().total_questions(),
                session.score(),
                session.max_streak()
            ),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            completion_label(session),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let lines: Vec<Line> = session
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let record = find_record(session.answer_log(), question.id);
            let (symbol, color, points) = match record {
                Some(r) if r.was_correct => ("+", Color::Green, format!("+{}", r.earned_points)),
                Some(_) => ("-", Color::Red, "0".to_string()),
                None => ("·", Color::DarkGray, "—".to_string()),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.text),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("  {}", points), Style::default().fg(color)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn find_record(log: &[AnswerRecord], question_id: u32) -> Option<&AnswerRecord> {
    log.iter().find(|r| r.question_id == question_id)
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k défiler  ·  r recommencer  ·  m menu  ·  q quitter")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("court"), "court");
        let long = "é".repeat(60);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }
}
