use dioxus::prelude::*;
use std::future::Future;
use todos_client::{BoardUpdate, TodoBoard};

mod theme_toggle;
mod todo_card;
mod todo_form;
mod todo_grid;

pub use theme_toggle::ThemeToggle;
pub use todo_card::TodoCard;
pub use todo_form::TodoForm;
pub use todo_grid::TodoGrid;

/// Runs a board request in the background and folds its answer into the
/// board as it stands when the answer arrives.
pub fn spawn_board_update(
    mut board: Signal<TodoBoard>,
    request: impl Future<Output = Option<BoardUpdate>> + 'static,
) {
    spawn(async move {
        if let Some(update) = request.await {
            board.write().apply(update);
        }
    });
}
