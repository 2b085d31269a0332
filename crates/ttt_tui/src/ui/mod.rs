//! UI rendering using ratatui.

mod board;

use crate::app::{self, App};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use ttt_client::ClientState;

pub use board::render_board;

const HELP: &str = "1-9 / arrows+Enter: move | A/B: toggle control | R: new game | Q: quit";

/// Draws the main UI from one consistent view of the client state.
pub fn draw<S>(f: &mut Frame, app: &App<S>, view: &ClientState)
where
    S: ttt_client::GameService + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(11),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_board(f, chunks[1], view.snapshot(), app.cursor());

    let turn_style = if view.game_over() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let turn = Paragraph::new(vec![
        Line::styled(app::turn_line(view), turn_style),
        Line::from(app::controls_line(view)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Turn"));
    f.render_widget(turn, chunks[2]);

    let mut status = vec![Line::from(app.notice().to_string())];
    if let Some(failure) = app::failure_line(view) {
        status.push(Line::styled(failure, Style::default().fg(Color::Red)));
    }
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}
