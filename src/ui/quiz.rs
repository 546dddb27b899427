use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::{QuizSession, SubmitOutcome};
use crate::models::{Difficulty, Question};

use super::format_clock;

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];
const LOW_TIME_SECONDS: u32 = 30;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let question = session.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session);
    render_stats(frame, chunks[1], session, question);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], question, session, app.highlighted_option());
    render_feedback(frame, chunks[4], app);
    render_controls(frame, chunks[5], session.answer_revealed(), session.is_last_question());
}

fn render_header(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).areas(area);

    let progress = format!(
        "{}  ·  {}/{}",
        session.quiz().title,
        session.current_question_index() + 1,
        session.quiz().total_questions()
    );
    frame.render_widget(Paragraph::new(progress).fg(Color::DarkGray), left);

    let (clock, color) = if session.quiz().is_timed() {
        let remaining = session.time_remaining_seconds();
        let color = if remaining <= LOW_TIME_SECONDS {
            Color::Red
        } else {
            Color::Green
        };
        (format_clock(remaining), color)
    } else {
        ("--:--".to_string(), Color::DarkGray)
    };
    let widget = Paragraph::new(clock)
        .alignment(Alignment::Right)
        .fg(color)
        .bold();
    frame.render_widget(widget, right);
}

fn render_stats(frame: &mut Frame, area: Rect, session: &QuizSession, question: &Question) {
    let line = Line::from(vec![
        Span::styled(
            format!("Score {}", session.score()),
            Style::default().fg(Color::White).bold(),
        ),
        Span::raw("   "),
        Span::styled(
            format!(
                "Série {} (x{:.1})",
                session.streak(),
                session.next_bonus_multiplier()
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} · {} pts", question.difficulty, question.points),
            Style::default().fg(difficulty_color(question.difficulty)),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    session: &QuizSession,
    highlighted: Option<usize>,
) {
    let revealed = session.answer_revealed();
    let selected = session.selected_answer_index().or(highlighted);
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(index);
        let (marker, style) = if revealed && question.is_correct(index) {
            ("✓", Style::default().fg(Color::Green).bold())
        } else if revealed && is_selected {
            ("✗", Style::default().fg(Color::Red).bold())
        } else if is_selected {
            (">", Style::default().fg(Color::Cyan).bold())
        } else {
            (" ", Style::default().fg(Color::Gray))
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match (app.feedback(), app.notice()) {
        (Some(outcome), _) => feedback_lines(outcome),
        (None, Some(notice)) => vec![Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ))],
        (None, None) => Vec::new(),
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn feedback_lines(outcome: &SubmitOutcome) -> Vec<Line<'static>> {
    let headline = if outcome.is_correct {
        let bonus = if outcome.bonus_multiplier > 1.0 {
            format!(" (bonus x{:.1})", outcome.bonus_multiplier)
        } else {
            String::new()
        };
        Span::styled(
            format!("Bonne réponse ! +{} points{}", outcome.earned_points, bonus),
            Style::default().fg(Color::Green).bold(),
        )
    } else {
        Span::styled(
            format!(
                "Mauvaise réponse. La bonne réponse était la {}.",
                OPTION_LABELS[outcome.correct_option_index]
            ),
            Style::default().fg(Color::Red).bold(),
        )
    };

    vec![
        Line::from(headline),
        Line::from(Span::styled(
            outcome.explanation.clone(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn render_controls(frame: &mut Frame, area: Rect, revealed: bool, last: bool) {
    let action = match (revealed, last) {
        (false, _) => "entrée valider",
        (true, false) => "entrée question suivante",
        (true, true) => "entrée voir le résultat",
    };
    let text = format!(
        "j/k ou 1-4 choisir  ·  {}  ·  r recommencer  ·  m menu  ·  q quitter",
        action
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
