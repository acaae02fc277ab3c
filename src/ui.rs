//! Terminal rendering with ratatui

use blockfall::{Cell, GameState, Snapshot, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH};
use blockfall::settings::VisualSettings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Board (10*2 + 2 for borders) + stats(16)
const PANEL_WIDTH: u16 = 38;
/// Board(20) + 2 for borders
const PANEL_HEIGHT: u16 = 22;
const PANEL_GAP: u16 = 4;

/// Display colour of each piece
fn kind_color(kind: TetrominoType) -> Color {
    match kind {
        TetrominoType::I => Color::Cyan,
        TetrominoType::O => Color::Yellow,
        TetrominoType::T => Color::Magenta,
        TetrominoType::S => Color::Green,
        TetrominoType::Z => Color::Red,
        TetrominoType::J => Color::Blue,
        TetrominoType::L => Color::Rgb(255, 165, 0),
    }
}

/// Render one session per snapshot, side by side
pub fn render(frame: &mut Frame, snapshots: &[(&str, Snapshot)], visual: &VisualSettings) {
    let count = snapshots.len() as u16;
    let width = PANEL_WIDTH * count + PANEL_GAP * count.saturating_sub(1);
    let area = center_rect(frame.area(), width, PANEL_HEIGHT);

    let mut constraints = Vec::new();
    for i in 0..snapshots.len() {
        if i > 0 {
            constraints.push(Constraint::Length(PANEL_GAP));
        }
        constraints.push(Constraint::Length(PANEL_WIDTH));
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (title, snapshot)) in snapshots.iter().enumerate() {
        render_panel(frame, columns[i * 2], title, snapshot, visual);
    }
}

/// Board plus stats for one player
fn render_panel(frame: &mut Frame, area: Rect, title: &str, snapshot: &Snapshot, visual: &VisualSettings) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board
            Constraint::Length(16), // Stats
        ])
        .split(area);

    render_board(frame, layout[0], title, snapshot, visual);
    render_stats(frame, layout[1], snapshot);

    match snapshot.state {
        GameState::Paused => render_overlay(frame, area, "PAUSED", "press pause to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", &format!("score {}", snapshot.score)),
        GameState::Active => {}
    }
}

/// Center a rect within another rect
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

/// Render the main game board
fn render_board(frame: &mut Frame, area: Rect, title: &str, snapshot: &Snapshot, visual: &VisualSettings) {
    let (block_char, ghost_char) = visual.block_chars();

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece: Vec<(i32, i32)> = snapshot.piece.blocks().collect();
    let ghost: Vec<(i32, i32)> = match &snapshot.ghost {
        Some(ghost) if visual.show_ghost => ghost.blocks().collect(),
        _ => Vec::new(),
    };
    let color = kind_color(snapshot.piece.kind);

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for row in 0..BOARD_HEIGHT {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);
        for col in 0..BOARD_WIDTH {
            let pos = (col as i32, row as i32);
            // falling piece over ghost over settled cells
            let (text, style) = if piece.contains(&pos) {
                (block_char, Style::default().fg(color))
            } else if ghost.contains(&pos) {
                (ghost_char, Style::default().fg(color).dim())
            } else {
                match snapshot.cell(col, row) {
                    Cell::Filled(kind) => (block_char, Style::default().fg(kind_color(kind))),
                    Cell::Empty => (EMPTY, Style::default()),
                }
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
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

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 24, 5);

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
