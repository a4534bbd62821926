use dioxus::prelude::*;
use todos_client::board::submit;
use todos_client::{HttpTodoApi, TodoBoard};

use super::spawn_board_update;

/// Input form bound to the board's draft. Submitting creates a todo, or
/// saves the one being edited.
#[component]
pub fn TodoForm() -> Element {
    let mut board = use_context::<Signal<TodoBoard>>();
    let api = use_context::<HttpTodoApi>();

    let draft_text = board.read().draft_text().to_string();
    let draft_color = board.read().draft_color().to_string();

    rsx! {
        form {
            class: "todo-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let Some(submission) = board.write().take_submission() else {
                    return;
                };
                let api = api.clone();
                spawn_board_update(board, async move { submit(&api, submission).await });
            },
            input {
                class: "todo-form__color",
                r#type: "color",
                value: "{draft_color}",
                oninput: move |evt| board.write().set_draft_color(evt.value()),
            }
            input {
                class: "todo-form__text",
                r#type: "text",
                placeholder: "Enter task here",
                value: "{draft_text}",
                oninput: move |evt| board.write().set_draft_text(evt.value()),
            }
            button { class: "todo-form__submit", r#type: "submit", "Go" }
        }
    }
}
