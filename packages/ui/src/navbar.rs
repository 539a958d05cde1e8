//! Top navigation bar with the authentication state.

use dioxus::prelude::*;

use crate::auth::{use_auth, SignOutButton};
use crate::routes;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let state = auth();
    let display = state
        .user
        .as_ref()
        .map(|user| user.display_name().to_string());
    let show_links = state.user.is_none() && !state.loading;

    rsx! {
        nav { class: "navbar",
            a { class: "navbar-brand", href: routes::HOME, "DevFlow" }
            div { class: "navbar-auth",
                if let Some(name) = display {
                    span { class: "navbar-user", "{name}" }
                    SignOutButton { class: "navbar-link" }
                }
                if show_links {
                    a { class: "navbar-link", href: routes::SIGN_IN, "Sign in" }
                    a { class: "navbar-link", href: routes::SIGN_UP, "Sign up" }
                }
            }
        }
    }
}
