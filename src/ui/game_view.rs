use std::str::FromStr;

use crate::game::{GameState, PlayerId};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    state: &GameState,
    cursor: (usize, usize),
    message: &Option<String>,
) {
    let board_rows = u16::try_from(state.size().height)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Min(board_rows), // Board
            Constraint::Length(3),       // Scores
            Constraint::Length(3),       // Message
            Constraint::Length(3),       // Controls
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);
    render_board(frame, state, cursor, chunks[1]);
    render_scores(frame, state, chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

/// Terminal color for a player's color tag; unknown tags render white.
fn player_color(state: &GameState, id: PlayerId) -> Color {
    Color::from_str(&state.player(id).color).unwrap_or(Color::White)
}

fn render_header(frame: &mut Frame, state: &GameState, area: Rect) {
    let (status, id) = match state.winner() {
        Some(winner) => (
            format!("{} wins!  |  Game Over", state.player(winner).name),
            winner,
        ),
        None => {
            let current = state.current_player();
            (
                format!("Current Player: {}", state.player(current).name),
                current,
            )
        }
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(state, id))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Four in a Row"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, state: &GameState, cursor: (usize, usize), area: Rect) {
    let mut lines = Vec::new();

    for (y, row) in state.board().rows().into_iter().enumerate() {
        let mut spans = Vec::new();
        for (x, cell) in row.into_iter().enumerate() {
            let (symbol, mut style) = match cell {
                None => (" . ", Style::default().fg(Color::DarkGray)),
                Some(id) => (" \u{25cf} ", Style::default().fg(player_color(state, id))),
            };
            if (x, y) == cursor {
                style = style
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board_widget, area);
}

fn render_scores(frame: &mut Frame, state: &GameState, area: Rect) {
    let mut spans = Vec::new();
    for id in PlayerId::all() {
        if id == PlayerId::Second {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            state.player(id).name.clone(),
            Style::default()
                .fg(player_color(state, id))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {}", state.score(id))));
    }

    let scores = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Pieces"));
    frame.render_widget(scores, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Arrows: Move  |  Enter: Place  |  R: Restart  |  L: Load  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
