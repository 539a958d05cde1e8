//! The shared authentication form.
//!
//! One component renders both flows: [`AuthMode`] selects the button labels,
//! success message, and cross-link from a fixed lookup table, and the ordered
//! default-value pairs decide which inputs render. Validation is delegated to
//! the schema the page supplies; the async submit callback decides success or
//! failure, and the form shows exactly one toast per attempt, navigating home
//! only on success.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Button, ButtonVariant, Input};
use crate::routes;
use crate::schema::{capitalize, FieldErrors, FieldValues, Validate};
use crate::toast::{show_toast, use_toast, ToastLevel};

/// Fallback body for an error notification without a message.
const GENERIC_ERROR: &str = "Something went wrong, please try again.";

/// Which flow the form renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Per-mode presentation strings.
struct ModeText {
    button: &'static str,
    busy: &'static str,
    success: &'static str,
    prompt: &'static str,
    link_label: &'static str,
    link_target: &'static str,
}

const SIGN_IN_TEXT: ModeText = ModeText {
    button: "Sign In",
    busy: "Signing In...",
    success: "Signed in successfully",
    prompt: "Don't have an account?",
    link_label: "Sign up",
    link_target: routes::SIGN_UP,
};

const SIGN_UP_TEXT: ModeText = ModeText {
    button: "Sign Up",
    busy: "Signing Up...",
    success: "Signed up successfully",
    prompt: "Already have an account?",
    link_label: "Sign in",
    link_target: routes::SIGN_IN,
};

impl AuthMode {
    fn text(self) -> &'static ModeText {
        match self {
            AuthMode::SignIn => &SIGN_IN_TEXT,
            AuthMode::SignUp => &SIGN_UP_TEXT,
        }
    }
}

/// Fixed label / input-type overrides. Fields not listed here get a
/// capitalized label and a plain text input.
const FIELD_PRESENTATION: &[(&str, &str, &str)] = &[
    ("email", "Email Address", "text"),
    ("password", "Password", "password"),
];

/// Display label for a field.
fn field_label(name: &str) -> String {
    FIELD_PRESENTATION
        .iter()
        .find(|(field, _, _)| *field == name)
        .map(|(_, label, _)| (*label).to_string())
        .unwrap_or_else(|| capitalize(name))
}

/// HTML input type for a field.
fn input_type(name: &str) -> &'static str {
    FIELD_PRESENTATION
        .iter()
        .find(|(field, _, _)| *field == name)
        .map(|(_, _, kind)| *kind)
        .unwrap_or("text")
}

/// Error detail carried by a failed [`SubmitResult`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitError {
    pub message: Option<String>,
}

/// Outcome reported by a submit callback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    pub status: Option<u16>,
    pub error: Option<SubmitError>,
}

impl SubmitResult {
    pub fn success() -> Self {
        Self {
            success: true,
            status: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            error: Some(SubmitError {
                message: Some(message.into()),
            }),
        }
    }

    pub fn failure_with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::failure(message)
        }
    }
}

/// Toast title and body for a failed submission.
fn failure_notice(result: &SubmitResult) -> (String, String) {
    let title = match result.status {
        Some(status) => format!("Error {}", status),
        None => "Error".to_string(),
    };
    let body = result
        .error
        .as_ref()
        .and_then(|error| error.message.clone())
        .unwrap_or_else(|| GENERIC_ERROR.to_string());
    (title, body)
}

type SubmitFuture = Pin<Box<dyn Future<Output = SubmitResult>>>;

/// Cloneable async submit callback carried as a component prop.
///
/// Callbacks always resolve to a [`SubmitResult`]; adapters around fallible
/// transports convert errors into failure results, so the form cannot stay
/// stuck in the submitting state.
#[derive(Clone)]
pub struct SubmitHandler(Rc<dyn Fn(FieldValues) -> SubmitFuture>);

impl SubmitHandler {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(FieldValues) -> Fut + 'static,
        Fut: Future<Output = SubmitResult> + 'static,
    {
        Self(Rc::new(move |values| Box::pin(handler(values))))
    }

    pub async fn call(&self, values: FieldValues) -> SubmitResult {
        (self.0)(values).await
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The shared sign-in / sign-up form.
#[component]
pub fn AuthForm<S: Validate + Clone + PartialEq + 'static>(
    schema: S,
    default_values: FieldValues,
    mode: AuthMode,
    on_submit: SubmitHandler,
) -> Element {
    let values = use_signal(|| default_values.clone());
    let mut field_errors = use_signal(FieldErrors::new);
    let mut submitting = use_signal(|| false);
    let mut toasts = use_toast();
    let text = mode.text();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let schema = schema.clone();
        let on_submit = on_submit.clone();
        spawn(async move {
            let validated = match schema.validate(&values()) {
                Ok(validated) => validated,
                Err(errors) => {
                    field_errors.set(errors);
                    return;
                }
            };
            field_errors.set(FieldErrors::new());

            submitting.set(true);
            let result = on_submit.call(validated).await;
            submitting.set(false);

            if result.success {
                show_toast(&mut toasts, ToastLevel::Success, "Success", text.success);
                navigate_home();
            } else {
                let (title, body) = failure_notice(&result);
                show_toast(&mut toasts, ToastLevel::Error, &title, &body);
            }
        });
    };

    let fields = values();
    let errors = field_errors();

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            for (index, (name, value)) in fields.into_iter().enumerate() {
                AuthFormField {
                    key: "{name}",
                    index,
                    name: name.clone(),
                    value,
                    error: errors.get(&name).cloned(),
                    values,
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                class: "auth-submit",
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "{text.busy}" } else { "{text.button}" }
            }

            p { class: "auth-switch",
                "{text.prompt} "
                a { href: text.link_target, "{text.link_label}" }
            }
        }
    }
}

/// One labeled input, wired back into the form's value list by index.
#[component]
fn AuthFormField(
    index: usize,
    name: String,
    value: String,
    error: Option<String>,
    values: Signal<FieldValues>,
) -> Element {
    let label = field_label(&name);
    let kind = input_type(&name);
    let mut values = values;

    rsx! {
        div { class: "auth-field",
            label { class: "auth-label", r#for: "{name}", "{label}" }
            Input {
                id: name.clone(),
                name: name.clone(),
                r#type: kind,
                class: "auth-input",
                required: true,
                value,
                oninput: move |evt: FormEvent| values.write()[index].1 = evt.value(),
            }
            if let Some(message) = error {
                p { class: "auth-field-error", "{message}" }
            }
        }
    }
}

/// Navigate to the home route after a successful submission.
fn navigate_home() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(routes::HOME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_field_renders_as_email_address() {
        assert_eq!(field_label("email"), "Email Address");
    }

    #[test]
    fn other_fields_get_capitalized_labels() {
        assert_eq!(field_label("username"), "Username");
        assert_eq!(field_label("name"), "Name");
        assert_eq!(field_label("password"), "Password");
    }

    #[test]
    fn only_the_password_field_is_masked() {
        assert_eq!(input_type("password"), "password");
        assert_eq!(input_type("email"), "text");
        assert_eq!(input_type("username"), "text");
    }

    #[test]
    fn mode_table_drives_button_labels() {
        assert_eq!(AuthMode::SignIn.text().button, "Sign In");
        assert_eq!(AuthMode::SignIn.text().busy, "Signing In...");
        assert_eq!(AuthMode::SignUp.text().button, "Sign Up");
        assert_eq!(AuthMode::SignUp.text().busy, "Signing Up...");
    }

    #[test]
    fn mode_table_drives_success_messages() {
        assert_eq!(AuthMode::SignIn.text().success, "Signed in successfully");
        assert_eq!(AuthMode::SignUp.text().success, "Signed up successfully");
    }

    #[test]
    fn cross_links_point_at_the_opposite_flow() {
        assert_eq!(AuthMode::SignIn.text().link_target, routes::SIGN_UP);
        assert_eq!(AuthMode::SignUp.text().link_target, routes::SIGN_IN);
    }

    #[test]
    fn failure_notice_includes_the_status_and_message() {
        let result = SubmitResult::failure_with_status(409, "Username taken");
        let (title, body) = failure_notice(&result);
        assert_eq!(title, "Error 409");
        assert_eq!(body, "Username taken");
    }

    #[test]
    fn failure_notice_falls_back_when_bare() {
        let result = SubmitResult {
            success: false,
            status: None,
            error: None,
        };
        let (title, body) = failure_notice(&result);
        assert_eq!(title, "Error");
        assert_eq!(body, GENERIC_ERROR);
    }

    #[test]
    fn submit_result_constructors() {
        assert!(SubmitResult::success().success);

        let failure = SubmitResult::failure("nope");
        assert!(!failure.success);
        assert_eq!(failure.status, None);
        assert_eq!(failure.error.unwrap().message.as_deref(), Some("nope"));
    }
}
