use dioxus::prelude::*;

/// Button switching between the light and dark themes.
#[component]
pub fn ThemeToggle(dark_mode: bool, on_toggle: EventHandler<()>) -> Element {
    let (label, icon) = if dark_mode {
        ("Dark Mode", "☾")
    } else {
        ("Light Mode", "☀")
    };

    rsx! {
        button {
            class: "theme-toggle",
            r#type: "button",
            onclick: move |_| on_toggle.call(()),
            "{label}"
            span { class: "theme-toggle__icon", "{icon}" }
        }
    }
}
