//! Basic form controls shared by the views.

use dioxus::prelude::*;

/// Visual style of a [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
        }
    }
}

/// Styled button.
#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(into, default)] class: String,
    #[props(into, default = "button".to_string())] r#type: String,
    #[props(default = false)] disabled: bool,
    #[props(optional)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let button_type = r#type;

    rsx! {
        button {
            class: "btn {variant.class()} {class}",
            r#type: "{button_type}",
            disabled: disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

/// Styled text input.
#[component]
pub fn Input(
    #[props(into, default)] id: String,
    #[props(into, default)] name: String,
    #[props(into, default = "text".to_string())] r#type: String,
    #[props(into, default)] class: String,
    #[props(into, default)] placeholder: String,
    #[props(default = false)] required: bool,
    #[props(into)] value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let input_type = r#type;

    rsx! {
        input {
            id: "{id}",
            name: "{name}",
            class: "input {class}",
            r#type: "{input_type}",
            placeholder: "{placeholder}",
            required: required,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}
