//! Theme colors and cell geometry for the terminal board.

use crossterm::style::Color;

/// Terminal columns per square
pub const CELL_WIDTH: u16 = 7;
/// Terminal rows per square
pub const CELL_HEIGHT: u16 = 3;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const CURSOR_LIGHT: u32 = 0x9FC6E7;
pub const CURSOR_DARK: u32 = 0x5B8FB9;
pub const SELECTED_SQUARE: u32 = 0xE5C454;

// Text colors
pub const TEXT_PRIMARY: u32 = 0xFFFFFF;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_ALERT: u32 = 0xF87171;

pub fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

/// Style set handed to the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub light_square: Color,
    pub dark_square: Color,
    pub cursor_light: Color,
    pub cursor_dark: Color,
    pub selected: Color,
    /// Piece glyphs, both colors (the glyph shape tells them apart)
    pub piece: Color,
    pub label: Color,
    pub text: Color,
    pub alert: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: rgb(LIGHT_SQUARE),
            dark_square: rgb(DARK_SQUARE),
            cursor_light: rgb(CURSOR_LIGHT),
            cursor_dark: rgb(CURSOR_DARK),
            selected: rgb(SELECTED_SQUARE),
            piece: Color::Black,
            label: rgb(TEXT_SECONDARY),
            text: rgb(TEXT_PRIMARY),
            alert: rgb(TEXT_ALERT),
        }
    }
}

impl Theme {
    /// Background for a board square
    pub fn square_color(
        &self,
        row: usize,
        col: usize,
        is_cursor: bool,
        is_selected: bool,
    ) -> Color {
        let light = (row + col) % 2 == 0;
        match (is_selected, is_cursor, light) {
            (true, _, _) => self.selected,
            (false, true, true) => self.cursor_light,
            (false, true, false) => self.cursor_dark,
            (false, false, true) => self.light_square,
            (false, false, false) => self.dark_square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xEFD9B5), Color::Rgb { r: 0xEF, g: 0xD9, b: 0xB5 });
    }

    #[test]
    fn test_square_colors() {
        let theme = Theme::default();
        // a8 is light
        assert_eq!(theme.square_color(0, 0, false, false), theme.light_square);
        assert_eq!(theme.square_color(0, 1, false, false), theme.dark_square);
        assert_eq!(theme.square_color(0, 1, true, false), theme.cursor_dark);
        assert_eq!(theme.square_color(0, 0, true, true), theme.selected);
    }
}
