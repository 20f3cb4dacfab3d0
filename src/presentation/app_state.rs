// Application state for HTTP handlers
use crate::domain::selection::Selection;
use crate::presentation::display_board::DisplayBoard;

#[derive(Clone)]
pub struct AppState {
    pub board: DisplayBoard,
    pub selection: Selection,
}
