//! Authentication context and OAuth sign-in controls.

use api::UserInfo;
use dioxus::prelude::*;

use crate::routes;

/// Authentication state for the application.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that resolves the current user on mount.
/// Wrap the app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        let user = api::get_current_user().await.unwrap_or_default();
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that starts the OAuth flow for a provider.
#[component]
pub fn SignInButton(
    #[props(into)] provider: String,
    #[props(into, default = "Sign in".to_string())] label: String,
    #[props(into, default)] class: String,
) -> Element {
    let mut loading = use_signal(|| false);
    let provider_name = provider.clone();

    let onclick = move |_| {
        let provider = provider_name.clone();
        async move {
            loading.set(true);
            match api::get_sign_in_url(provider).await {
                Ok(url) => redirect(&url),
                Err(error) => {
                    tracing::error!("Failed to get sign-in URL: {}", error);
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "oauth-btn {class}",
            disabled: loading(),
            onclick: onclick,
            if loading() { "Redirecting..." } else { "{label}" }
        }
    }
}

/// Button that clears the current session.
#[component]
pub fn SignOutButton(
    #[props(into, default = "Sign out".to_string())] label: String,
    #[props(into, default)] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        if let Ok(()) = api::sign_out().await {
            auth_state.set(AuthState {
                user: None,
                loading: false,
            });
            redirect(routes::SIGN_IN);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Send the browser to a URL.
fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("redirect requested outside the browser: {}", url);
}
