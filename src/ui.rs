//! Terminal UI rendering with ratatui
//!
//! Draws from a `GameSnapshot` only; nothing here touches the live game.

use crate::board::{Cell, BOARD_HEIGHT};
use crate::game::GameState;
use crate::piece::Piece;
use crate::settings::Settings;
use crate::snapshot::GameSnapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Total width needed: board(22) + next/stats(16) = 38
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Render one frame of the game
pub fn render_game(frame: &mut Frame, snapshot: &GameSnapshot, settings: &Settings) {
    let area = frame.area();
    let (block_char, empty_char) = settings.visual.block_chars();

    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next piece + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, block_char, empty_char);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], snapshot.next.as_ref(), block_char);
    render_stats(frame, right_layout[1], snapshot);

    match snapshot.state {
        GameState::NotStarted => render_overlay(frame, area, "BLOCKFALL", "Space to start"),
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Space to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Space to restart"),
        GameState::Running => {}
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the board with the falling piece on top
fn render_board(
    frame: &mut Frame,
    area: Rect,
    snapshot: &GameSnapshot,
    block_char: &str,
    empty_char: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = snapshot.composed();
    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);

    for (row, cells) in grid.iter().enumerate() {
        let clearing = snapshot.is_clearing(row);
        let spans: Vec<Span> = cells
            .iter()
            .map(|cell| match cell {
                // Rows about to clear flash white
                Cell::Filled(_) if clearing => {
                    Span::styled(block_char, Style::default().fg(Color::White).bold())
                }
                Cell::Filled(color) => Span::styled(block_char, Style::default().fg(*color)),
                Cell::Empty => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, next: Option<&Piece>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(piece) = next else {
        return;
    };

    let color = piece.color();
    let shape = piece.shape;
    let size = shape.size();
    let lines: Vec<Line> = (0..size)
        // Padding rows carry nothing worth showing
        .filter(|&row| (0..size).any(|col| shape.is_filled(row, col)))
        .map(|row| {
            let spans: Vec<Span> = (0..size)
                .map(|col| {
                    if shape.is_filled(row, col) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for start/pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
