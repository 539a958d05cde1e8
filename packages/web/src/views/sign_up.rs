//! Sign-up page: the shared auth form in sign-up mode.

use dioxus::prelude::*;
use ui::{field_value, use_auth, AuthForm, AuthMode, SignInButton, SubmitHandler, SubmitResult};

use crate::validations::sign_up_schema;

/// Sign-up page component.
#[component]
pub fn SignUp() -> Element {
    let auth = use_auth();

    // If already signed in, redirect home
    if !auth().loading && auth().user.is_some() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/");
            }
        }
    }

    let on_submit = SubmitHandler::new(|values| async move {
        let email = field_value(&values, "email").unwrap_or_default().to_string();
        let password = field_value(&values, "password")
            .unwrap_or_default()
            .to_string();
        let name = field_value(&values, "name").unwrap_or_default().to_string();
        let username = field_value(&values, "username")
            .unwrap_or_default()
            .to_string();

        match api::sign_up(email, password, name, username).await {
            Ok(_) => SubmitResult::success(),
            Err(error) => SubmitResult::failure(error.to_string()),
        }
    });

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { class: "auth-title", "Create your account" }
                p { class: "auth-subtitle", "Join DevFlow to ask and answer questions" }

                AuthForm {
                    schema: sign_up_schema(),
                    default_values: vec![
                        ("email".to_string(), String::new()),
                        ("password".to_string(), String::new()),
                        ("name".to_string(), String::new()),
                        ("username".to_string(), String::new()),
                    ],
                    mode: AuthMode::SignUp,
                    on_submit,
                }

                div { class: "auth-divider", span { "or" } }

                div { class: "oauth-buttons",
                    SignInButton {
                        provider: "github",
                        label: "Continue with GitHub",
                        class: "github-btn",
                    }
                    SignInButton {
                        provider: "google",
                        label: "Continue with Google",
                        class: "google-btn",
                    }
                }
            }
        }
    }
}
