#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::app::App;
use crate::camera::Camera;
use crate::components::{AvatarState, RoundPhase};
use crate::leaderboard::Leaderboard;
use crate::round::Simulation;
use ratatui::{
    buffer::Buffer,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

// Game units covered by one terminal column
pub const UNITS_PER_COLUMN: f32 = 5.0;

const INFO_WIDTH: u16 = 24;

// Block colours, cycled by a block's palette index
const PALETTE: [Color; 8] = [
    Color::Rgb(0xFF, 0x6B, 0x6B),
    Color::Rgb(0x4E, 0xCD, 0xC4),
    Color::Rgb(0xFF, 0xE6, 0x6D),
    Color::Rgb(0x95, 0xE1, 0xD3),
    Color::Rgb(0xF3, 0x81, 0x81),
    Color::Rgb(0xAA, 0x96, 0xDA),
    Color::Rgb(0xFC, 0xBA, 0xD3),
    Color::Rgb(0xA8, 0xD8, 0xEA),
];

#[must_use]
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Playfield size in cells, without borders
#[must_use]
pub fn board_cells(simulation: &Simulation) -> (u16, u16) {
    let tuning = simulation.tuning();
    let cols = (tuning.viewport_width / UNITS_PER_COLUMN).ceil() as u16;
    let rows = (tuning.viewport_height / tuning.block_height).ceil() as u16;
    (cols, rows)
}

pub fn render(f: &mut Frame, app: &App) {
    let simulation = app.simulation();
    let (cols, rows) = board_cells(simulation);
    let board_width = cols + 2;
    let board_height = rows + 2;
    let min_total_width = board_width + INFO_WIDTH;
    let min_total_height = board_height + 2;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(format!(
            "Terminal too small!\nNeed {min_total_width}x{min_total_height}, have {}x{}.",
            f.area().width,
            f.area().height
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Chick Stack"));

        let warning_area = centered_rect(60, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(board_height),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("CHICK STACK")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_board(f, app, game_layout[1]);
    render_info(f, app, main_layout[1]);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let simulation = app.simulation();
    let inner = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let board = BoardView::new(simulation, inner);
    let buf = f.buffer_mut();

    for block in simulation.stack().blocks() {
        board.fill_span(
            buf,
            block.left,
            block.width,
            block.top,
            "█",
            palette_color(block.color_index),
        );
    }

    if simulation.phase() == RoundPhase::Active {
        let moving = simulation.moving_block();
        let color = palette_color(simulation.score() as usize + 1);
        board.fill_span(
            buf,
            moving.left,
            moving.width,
            simulation.stack().moving_top(),
            "▓",
            color,
        );
    }

    render_avatar(buf, &board, simulation);

    match simulation.phase() {
        RoundPhase::Idle => render_idle_prompt(f, inner),
        RoundPhase::OverScreen => render_over_screen(f, app, inner),
        RoundPhase::Active | RoundPhase::Over => {}
    }
}

// Maps untranslated game coordinates onto the board's cells
struct BoardView {
    inner: Rect,
    camera: Camera,
    block_height: f32,
}

impl BoardView {
    fn new(simulation: &Simulation, inner: Rect) -> Self {
        Self {
            inner,
            camera: simulation.round().camera,
            block_height: simulation.tuning().block_height,
        }
    }

    // Row holding the band [y, y + block_height) once the camera is applied
    fn row(&self, y: f32) -> Option<u16> {
        let row = (self.camera.to_screen_y(y) / self.block_height).floor();
        (row >= 0.0 && row < f32::from(self.inner.height)).then(|| self.inner.y + row as u16)
    }

    fn column(&self, x: f32) -> Option<u16> {
        let col = (x / UNITS_PER_COLUMN).floor();
        (col >= 0.0 && col < f32::from(self.inner.width)).then(|| self.inner.x + col as u16)
    }

    fn fill_span(&self, buf: &mut Buffer, left: f32, width: f32, top: f32, symbol: &str, color: Color) {
        let Some(y) = self.row(top) else {
            return;
        };

        let first = (left / UNITS_PER_COLUMN).floor().max(0.0);
        let mut last = ((left + width) / UNITS_PER_COLUMN).ceil();
        // Keep slivers visible
        if width > 0.0 && last <= first {
            last = first + 1.0;
        }
        let last = last.min(f32::from(self.inner.width));

        let mut col = first;
        while col < last {
            if let Some(cell) = buf.cell_mut((self.inner.x + col as u16, y)) {
                cell.set_symbol(symbol);
                cell.set_fg(color);
                cell.set_bg(Color::Black);
            }
            col += 1.0;
        }
    }

    fn put(&self, buf: &mut Buffer, x: f32, y: f32, symbol: &str, style: Style) {
        if let (Some(cx), Some(cy)) = (self.column(x), self.row(y)) {
            if let Some(cell) = buf.cell_mut((cx, cy)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

fn render_avatar(buf: &mut Buffer, board: &BoardView, simulation: &Simulation) {
    let avatar = simulation.avatar();
    // Body sits in the band just above the feet
    let body_y = avatar.y - board.block_height;
    let body = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    match avatar.state {
        AvatarState::Standing { alarmed } => {
            board.put(buf, avatar.x, body_y, "@", body);
            if alarmed {
                let cue = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
                board.put(buf, avatar.x, body_y - board.block_height, "!", cue);
            }
        }
        AvatarState::Jumping => board.put(buf, avatar.x, body_y, "@", body),
        AvatarState::Falling => {
            board.put(buf, avatar.x, body_y, "x", body.fg(Color::LightRed));
        }
    }
}

fn render_idle_prompt(f: &mut Frame, inner: Rect) {
    let prompt = Paragraph::new("Press Space or click\nto drop the first block")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    let area = Rect {
        x: inner.x,
        y: inner.y + inner.height / 3,
        width: inner.width,
        height: 2.min(inner.height),
    };
    f.render_widget(prompt, area);
}

fn render_over_screen(f: &mut Frame, app: &App, inner: Rect) {
    let hud = app.hud();
    let final_score = hud.final_score.unwrap_or_else(|| app.simulation().score());
    let area = centered_rect(90, 80, inner);

    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final score: {final_score}")),
        Line::from(""),
    ];

    match app.leaderboard() {
        Some(entries) if entries.is_empty() => lines.push(Line::from("No scores yet")),
        Some(entries) => {
            lines.push(Line::from(Span::styled(
                "Top scores",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
            let mine = Leaderboard::player_best(entries, &hud.player).map(|(rank, _)| rank);
            // Leave room for the header and the footer
            let room = usize::from(area.height.saturating_sub(7));
            for (i, entry) in entries.iter().take(room).enumerate() {
                let style = if mine == Some(i + 1) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("{:>2}. {:<14} {:>4}", i + 1, entry.name, entry.score),
                    style,
                )));
            }
        }
        None => lines.push(Line::from("Leaderboard unavailable")),
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Space: continue   Q: quit"));

    let over = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(over, area);
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let simulation = app.simulation();
    let hud = app.hud();

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Min(5),
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let stats = format!(
        "Player: {}\nScore: {}\nSpeed: {:.1}\nHeight: {}\nBest: {}\nRounds: {}",
        hud.player,
        hud.score,
        simulation.round().speed,
        simulation.stack().len() - 1,
        hud.session_best,
        hud.rounds_played,
    );
    let stats = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[1]);

    let (status, color) = match simulation.phase() {
        RoundPhase::Idle => ("Ready", Color::Green),
        RoundPhase::Active if simulation.avatar().is_alarmed() => ("Watch out!", Color::Red),
        RoundPhase::Active => ("", Color::White),
        RoundPhase::Over => ("Falling...", Color::LightRed),
        RoundPhase::OverScreen => ("GAME OVER", Color::Red),
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(status, info_layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        Space/Enter/↑: Drop\n\
        Click: Drop\n\
        Q/Esc: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
