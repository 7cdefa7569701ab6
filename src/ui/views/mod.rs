mod board_view;
mod engine_pane;
mod move_list;

pub use board_view::render_frame;
pub use engine_pane::engine_lines;
pub use move_list::render_move_list;
