//! Chess board view - draws a whole frame: board, labels, move list, footer.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::domain::Coord;
use crate::ui::board_layout::BoardLayout;
use crate::ui::components::render_square;
use crate::ui::theme::{CELL_HEIGHT, CELL_WIDTH, Theme};
use crate::ui::view_models::Frame;
use crate::ui::views::{engine_lines, render_move_list};

const TITLE: &str = "Terminal Chess";
const QUIT_HINT: &str = "Press 'q' or 'Ctrl+C' to quit.";

/// One footer line and whether it should stand out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLine {
    pub text: String,
    pub alert: bool,
}

impl FooterLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alert: false,
        }
    }

    fn alert(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alert: true,
        }
    }
}

/// Footer content under the board
pub fn footer_lines(frame: &Frame) -> Vec<FooterLine> {
    let mut lines = Vec::new();

    if frame.outcome.is_over() {
        lines.push(FooterLine::alert(format!(
            "Game over: {}",
            frame.outcome.result_text()
        )));
    }
    if let Some(piece) = frame.selected_piece {
        lines.push(FooterLine::plain(format!("Selected piece: {}", piece.glyph())));
    }
    lines.push(FooterLine::plain(format!(
        "Current player: {}",
        frame.current_player
    )));
    if let Some(last_move) = &frame.last_move {
        lines.push(FooterLine::plain(format!("Last move: {last_move}")));
    }
    if frame.selected_piece.is_some() {
        let mut text = "Valid Moves:".to_string();
        for uci in &frame.valid_moves {
            text.push(' ');
            text.push_str(uci);
        }
        lines.push(FooterLine::plain(text));
    }
    lines.extend(engine_lines(frame).into_iter().map(FooterLine::plain));
    if let Some(status) = &frame.status {
        lines.push(FooterLine::alert(status.clone()));
    }
    lines.push(FooterLine::plain(""));
    lines.push(FooterLine::plain(QUIT_HINT));
    lines
}

/// Draw a full frame
pub fn render_frame<W: Write>(
    out: &mut W,
    frame: &Frame,
    layout: &BoardLayout,
    theme: &Theme,
) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(layout.origin_x, 0),
        SetForegroundColor(theme.label),
        Print(TITLE)
    )?;

    for (row, squares) in frame.squares.iter().enumerate() {
        for (col, square) in squares.iter().enumerate() {
            render_square(out, layout, theme, Coord::new(row, col), square)?;
        }
    }

    queue!(out, SetForegroundColor(theme.label))?;
    for (row, label) in frame.rank_labels.iter().enumerate() {
        let y = layout.origin_y + row as u16 * CELL_HEIGHT + CELL_HEIGHT / 2;
        queue!(out, MoveTo(layout.rank_label_x(), y), Print(label))?;
    }
    for (col, label) in frame.file_labels.iter().enumerate() {
        let x = layout.origin_x + col as u16 * CELL_WIDTH + CELL_WIDTH / 2;
        queue!(out, MoveTo(x, layout.file_label_y()), Print(label))?;
    }

    render_move_list(out, frame, layout, theme)?;

    for (i, line) in footer_lines(frame).iter().enumerate() {
        let color = if line.alert { theme.alert } else { theme.text };
        queue!(
            out,
            MoveTo(layout.origin_x, layout.footer_y() + i as u16),
            SetForegroundColor(color),
            Print(&line.text)
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}
