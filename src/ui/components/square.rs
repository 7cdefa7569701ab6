//! Square rendering component.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor};

use crate::domain::Coord;
use crate::ui::board_layout::BoardLayout;
use crate::ui::components::render_piece;
use crate::ui::theme::{CELL_HEIGHT, CELL_WIDTH, Theme};
use crate::ui::view_models::SquareDisplay;

/// Render a single board square, glyph centered
pub fn render_square<W: Write>(
    out: &mut W,
    layout: &BoardLayout,
    theme: &Theme,
    square: Coord,
    display: &SquareDisplay,
) -> io::Result<()> {
    let (x, y) = layout.square_origin(square);
    let background =
        theme.square_color(square.row, square.col, display.is_cursor, display.is_selected);
    let blank = " ".repeat(CELL_WIDTH as usize);
    let side = " ".repeat(CELL_WIDTH as usize / 2);

    queue!(out, SetBackgroundColor(background))?;
    for line in 0..CELL_HEIGHT {
        queue!(out, MoveTo(x, y + line))?;
        if line == CELL_HEIGHT / 2 {
            queue!(out, Print(&side))?;
            render_piece(out, &display.glyph, theme)?;
            queue!(out, Print(&side))?;
        } else {
            queue!(out, Print(&blank))?;
        }
    }
    queue!(out, ResetColor)
}
