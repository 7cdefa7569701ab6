pub mod board_layout;
pub mod components;
pub mod display;
pub mod prompt;
pub mod theme;
pub mod view_models;
pub mod views;

pub use board_layout::BoardLayout;
pub use theme::Theme;
