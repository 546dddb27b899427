use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::Quiz;

use super::format_clock;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let quizzes = app.catalog().quizzes();
    let list_height = (quizzes.len() as u16) * 3;

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(list_height + 2),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(area);

    render_title(frame, chunks[1], quizzes.len());

    let lines: Vec<Line> = quizzes
        .iter()
        .enumerate()
        .flat_map(|(index, quiz)| quiz_lines(quiz, index == app.menu_index()))
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(widget, centered(chunks[2], 70));

    let controls = Paragraph::new("j/k choisir  ·  entrée commencer  ·  q quitter")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect, count: usize) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} quiz disponibles", count),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn quiz_lines(quiz: &Quiz, is_selected: bool) -> [Line<'_>; 3] {
    let style = if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if is_selected { ">" } else { " " };
    let limit = if quiz.is_timed() {
        format_clock(quiz.time_limit_seconds)
    } else {
        "sans limite".to_string()
    };

    [
        Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::styled(quiz.title.as_str(), style),
        ]),
        Line::from(Span::styled(
            format!(
                "  {}  ·  {} questions  ·  {}",
                quiz.description,
                quiz.total_questions(),
                limit
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ]
}

fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
