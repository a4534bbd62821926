use dioxus::prelude::*;
use todos_client::board::load;
use todos_client::{HttpTodoApi, TodoBoard};

mod components;
mod theme;

use components::{ThemeToggle, TodoForm, TodoGrid};

/// Base URL of the todos REST API, overridable at build time.
const API_URL: &str = match option_env!("TODOS_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

static CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

/// Root component. Owns the board state and the API client and shares both
/// with the rest of the tree through context.
#[component]
fn App() -> Element {
    let api = use_context_provider(|| HttpTodoApi::new(API_URL));
    let board = use_context_provider(|| Signal::new(TodoBoard::new()));
    let mut dark_mode = theme::use_dark_mode();

    use_hook(move || components::spawn_board_update(board, async move { load(&api).await }));

    let root_class = if dark_mode.enabled() { "app dark" } else { "app" };

    rsx! {
        document::Stylesheet { href: CSS }

        div { class: "{root_class}",
            ThemeToggle {
                dark_mode: dark_mode.enabled(),
                on_toggle: move |_| dark_mode.toggle(),
            }

            div { class: "app__title",
                h1 { "Todo" }
            }

            TodoForm {}
            TodoGrid {}
        }
    }
}
