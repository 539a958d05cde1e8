//! Toast notifications.
//!
//! A context-provided stack: [`ToastProvider`] owns the signal and renders
//! the entries, [`show_toast`] pushes one. Entries can be dismissed manually
//! and auto-dismiss after a few seconds in the browser.

use dioxus::prelude::*;

/// Severity of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast-success",
            ToastLevel::Error => "toast-error",
        }
    }
}

/// A single notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

/// The notification stack.
#[derive(Clone, Debug, Default)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    fn push(&mut self, level: ToastLevel, title: &str, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            title: title.to_string(),
            message: message.to_string(),
        });
        id
    }

    fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }

    /// Current entries, oldest first.
    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }
}

/// Get the toast stack from context.
pub fn use_toast() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show one notification.
pub fn show_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, title: &str, message: &str) {
    let id = toasts.write().push(level, title, message);

    #[cfg(target_arch = "wasm32")]
    {
        let mut toasts = *toasts;
        spawn(async move {
            gloo_timers::future::sleep(std::time::Duration::from_secs(5)).await;
            toasts.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

/// Provider component owning the stack. Wrap the app with it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Toasts::default()));

    rsx! {
        {children}
        Toaster {}
    }
}

#[component]
fn Toaster() -> Element {
    let mut toasts = use_toast();
    let entries: Vec<(u64, &'static str, String, String)> = toasts()
        .entries()
        .iter()
        .map(|toast| {
            (
                toast.id,
                toast.level.class(),
                toast.title.clone(),
                toast.message.clone(),
            )
        })
        .collect();

    rsx! {
        div { class: "toast-stack",
            for (id, level_class, title, message) in entries {
                div { key: "{id}", class: "toast {level_class}",
                    div { class: "toast-body",
                        p { class: "toast-title", "{title}" }
                        p { class: "toast-message", "{message}" }
                    }
                    button {
                        class: "toast-dismiss",
                        onclick: move |_| toasts.write().dismiss(id),
                        "Dismiss"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut toasts = Toasts::default();
        let first = toasts.push(ToastLevel::Success, "Success", "Signed in");
        let second = toasts.push(ToastLevel::Error, "Error", "Nope");

        assert!(second > first);
        assert_eq!(toasts.entries().len(), 2);
        assert_eq!(toasts.entries()[0].title, "Success");
    }

    #[test]
    fn dismiss_removes_only_the_matching_entry() {
        let mut toasts = Toasts::default();
        let first = toasts.push(ToastLevel::Success, "Success", "Signed in");
        let second = toasts.push(ToastLevel::Error, "Error", "Nope");

        toasts.dismiss(first);

        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].id, second);
    }
}
