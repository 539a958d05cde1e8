//! Shared UI for the DevFlow workspace: the generic auth form and its
//! validation schema, toast notifications, the authentication context, and
//! the basic controls the views are built from.

pub mod components;
pub mod routes;

mod schema;
pub use schema::{field_value, FieldErrors, FieldRules, FieldValues, Schema, Validate};

mod form;
pub use form::{AuthForm, AuthMode, SubmitError, SubmitHandler, SubmitResult};

mod toast;
pub use toast::{show_toast, use_toast, Toast, ToastLevel, ToastProvider, Toasts};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, SignInButton, SignOutButton};

mod navbar;
pub use navbar::Navbar;
