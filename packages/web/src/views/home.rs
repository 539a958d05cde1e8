//! Landing page: the post-sign-in redirect target.

use dioxus::prelude::*;
use ui::{routes, use_auth, Navbar};

/// Home page component.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let state = auth();
    let display = state
        .user
        .as_ref()
        .map(|user| user.display_name().to_string());
    let show_actions = state.user.is_none() && !state.loading;

    rsx! {
        Navbar {}
        section { class: "hero",
            h1 { class: "hero-title", "Every developer question has an answer" }
            p { class: "hero-subtitle", "Ask, answer, and learn with the DevFlow community." }
            if let Some(name) = display {
                p { class: "hero-signed-in", "Signed in as {name}" }
            }
            if show_actions {
                div { class: "hero-actions",
                    a { class: "btn btn-primary", href: routes::SIGN_UP, "Get started" }
                    a { class: "btn btn-secondary", href: routes::SIGN_IN, "Sign in" }
                }
            }
        }
    }
}
