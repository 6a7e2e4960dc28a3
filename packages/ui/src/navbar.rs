use dioxus::prelude::*;

use crate::MAIN_CSS;

/// Top bar shared by every signed-in page. Links are passed as children.
#[component]
pub fn Navbar(
    #[props(default = "Grow Guides".to_string())] brand: String,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand", "{brand}" }
            div { class: "navbar-links", {children} }
        }
    }
}
