//! Move list panel - the ledger, right of the board.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, SetForegroundColor};

use crate::ui::board_layout::BoardLayout;
use crate::ui::theme::Theme;
use crate::ui::view_models::Frame;

/// Lines of the move list, oldest first. Only the newest lines that fit
/// next to the board are kept.
pub fn move_list_lines(frame: &Frame, max_lines: usize) -> Vec<&str> {
    let lines: Vec<&str> = frame.history.lines().filter(|l| !l.is_empty()).collect();
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].to_vec()
}

pub fn render_move_list<W: Write>(
    out: &mut W,
    frame: &Frame,
    layout: &BoardLayout,
    theme: &Theme,
) -> io::Result<()> {
    let x = layout.move_list_x();
    queue!(
        out,
        MoveTo(x, layout.origin_y),
        SetForegroundColor(theme.label),
        Print("Moves"),
        SetForegroundColor(theme.text)
    )?;

    let max_lines = layout.board_height().saturating_sub(2) as usize;
    let lines = move_list_lines(frame, max_lines);
    if lines.is_empty() {
        return queue!(
            out,
            MoveTo(x, layout.origin_y + 2),
            SetForegroundColor(theme.label),
            Print("No moves yet")
        );
    }
    for (i, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(x, layout.origin_y + 2 + i as u16), Print(line))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameModel;
    use crate::ui::display::build_frame;

    #[test]
    fn test_lines_from_ledger() {
        let mut frame = build_frame(&GameModel::new(), None, None, None);
        assert!(move_list_lines(&frame, 10).is_empty());

        frame.history = "\n1. e4 e5\n2. Nf3 Nc6\n3. Bb5".to_string();
        assert_eq!(
            move_list_lines(&frame, 10),
            vec!["1. e4 e5", "2. Nf3 Nc6", "3. Bb5"]
        );
        assert_eq!(move_list_lines(&frame, 2), vec!["2. Nf3 Nc6", "3. Bb5"]);
    }
}
