//! Promotion prompt drawn under the board.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;

use crate::domain::{PieceColor, Promotion};
use crate::models::PromotionPrompt;
use crate::ui::board_layout::BoardLayout;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Choice(Promotion),
    Dismiss,
    /// Key means nothing here, keep waiting
    Ignore,
}

pub fn answer_for_key(key: KeyEvent) -> PromptAnswer {
    match key.code {
        KeyCode::Esc => PromptAnswer::Dismiss,
        KeyCode::Char(c) => {
            Promotion::from_char(c).map_or(PromptAnswer::Ignore, PromptAnswer::Choice)
        }
        _ => PromptAnswer::Ignore,
    }
}

pub fn prompt_text(color: PieceColor) -> String {
    let options: Vec<String> = Promotion::ALL
        .iter()
        .map(|p| format!("[{}] {}", p.uci_char(), p.label()))
        .collect();
    format!("Promote {color} pawn to: {} (Esc cancels)", options.join(" "))
}

/// Blocks on terminal input until a piece is picked or the prompt dismissed
pub struct TerminalPrompt<'a, W: Write> {
    out: &'a mut W,
    layout: BoardLayout,
    theme: Theme,
}

impl<'a, W: Write> TerminalPrompt<'a, W> {
    pub fn new(out: &'a mut W, layout: BoardLayout, theme: Theme) -> Self {
        Self { out, layout, theme }
    }

    fn draw(&mut self, color: PieceColor) -> io::Result<()> {
        let y = self.layout.footer_y().saturating_sub(1);
        queue!(
            self.out,
            MoveTo(self.layout.origin_x, y),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(self.theme.alert),
            Print(prompt_text(color)),
            ResetColor
        )?;
        self.out.flush()
    }
}

impl<W: Write> PromotionPrompt for TerminalPrompt<'_, W> {
    fn choose(&mut self, color: PieceColor) -> Option<Promotion> {
        if let Err(e) = self.draw(color) {
            warn!(error = %e, "could not draw promotion prompt");
        }
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match answer_for_key(key) {
                        PromptAnswer::Choice(promotion) => return Some(promotion),
                        PromptAnswer::Dismiss => return None,
                        PromptAnswer::Ignore => {}
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "reading promotion choice failed");
                    return None;
                }
            }
        }
    }
}
