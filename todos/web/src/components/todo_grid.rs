use dioxus::prelude::*;
use todos_client::TodoBoard;

use super::TodoCard;

/// Grid of every todo on the board.
#[component]
pub fn TodoGrid() -> Element {
    let board = use_context::<Signal<TodoBoard>>();
    let todos = board.read().todos().to_vec();

    rsx! {
        div { class: "todo-grid",
            div { class: "todo-grid__cards",
                for todo in todos {
                    TodoCard { key: "{todo.id}", todo }
                }
            }
        }
    }
}
