mod menu;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::engine::QuizSession;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App, session: Option<&QuizSession>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match (app.state, session) {
        (AppState::Quiz, Some(session)) => quiz::render(frame, area, app, session),
        (AppState::Result, Some(session)) => result::render(frame, area, app, session),
        _ => menu::render(frame, area, app),
    }
}

/// `mm:ss`
pub(crate) fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
