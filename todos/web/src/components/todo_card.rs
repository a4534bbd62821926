use dioxus::prelude::*;
use todos_client::board::{remove, toggle};
use todos_client::{HttpTodoApi, TodoBoard};
use todos_core::Todo;

use super::spawn_board_update;

/// A single todo: colored initials badge, text, and its actions.
///
/// Clicking the text starts editing unless the todo is completed. While the
/// todo is being edited the delete action becomes a cancel action.
#[component]
pub fn TodoCard(todo: Todo) -> Element {
    let mut board = use_context::<Signal<TodoBoard>>();
    let api = use_context::<HttpTodoApi>();
    let id = todo.id;

    let editing = board.read().is_editing(id);
    let card_class = if editing {
        "todo-card todo-card--editing"
    } else {
        "todo-card"
    };
    let toggle_class = if todo.is_marked {
        "todo-card__toggle todo-card__toggle--marked"
    } else {
        "todo-card__toggle"
    };
    let initials = todo.initials();
    let remove_api = api.clone();

    rsx! {
        div { class: "{card_class}",
            div { class: "todo-card__badge", style: "background: {todo.color}",
                h1 { "{initials}" }
            }
            div {
                class: "todo-card__text",
                onclick: move |_| board.write().begin_edit(id),
                h1 { "{todo.text}" }
            }
            div { class: "todo-card__actions",
                if editing && !todo.is_marked {
                    button {
                        class: "todo-card__cancel",
                        title: "Cancel edit",
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            board.write().cancel_edit();
                        },
                        "✕"
                    }
                } else {
                    button {
                        class: "todo-card__delete",
                        title: "Delete",
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            let api = remove_api.clone();
                            spawn_board_update(board, async move { remove(&api, id).await });
                        },
                        "🗑"
                    }
                }
                button {
                    class: "{toggle_class}",
                    title: "Toggle complete",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        let api = api.clone();
                        spawn_board_update(board, async move { toggle(&api, id).await });
                    },
                    "✔"
                }
            }
        }
    }
}
