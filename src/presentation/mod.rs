// Presentation layer - Display board, renderers and startup chooser
pub mod app_state;
pub mod chooser;
pub mod console;
pub mod display_board;
pub mod handlers;
