//! Piece rendering component.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, SetForegroundColor};

use crate::ui::theme::Theme;

/// Print a piece glyph at the current cursor position
pub fn render_piece<W: Write>(out: &mut W, glyph: &str, theme: &Theme) -> io::Result<()> {
    queue!(out, SetForegroundColor(theme.piece), Print(glyph))
}
