use crate::flow::{use_reset_flow, DeepLinkNavigator};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLock;
use dioxus_free_icons::Icon;
use shared_types::{AppError, FlowConfig, FormState, Screen, MIN_PASSWORD_LENGTH};
use shared_ui::{
    use_toast, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Form, Input,
    ToastOptions,
};

/// Reset password page. Owns the flow controller and reports rejected
/// actions as toasts.
#[component]
pub fn ResetPassword() -> Element {
    let config = use_context::<FlowConfig>();
    let mut flow = use_reset_flow(&config);
    let toast = use_toast();
    let state = flow.state();

    let report = use_callback(move |err: AppError| {
        toast.error(err.friendly_message(), ToastOptions::new());
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./reset_password.css") }

        div { class: "reset-page",
            ResetCard {
                state: state(),
                on_password: move |value: String| flow.set_password(value),
                on_confirm: move |value: String| flow.set_confirm_password(value),
                on_submit: move |_| {
                    if let Err(err) = flow.submit() {
                        report.call(err);
                    }
                },
                on_redirect: move |_| {
                    if let Err(err) = flow.redirect(&DeepLinkNavigator) {
                        report.call(err);
                    }
                },
            }
        }
    }
}

/// Render surface for the reset flow: a pure function of `FormState`.
#[component]
pub fn ResetCard(
    state: FormState,
    #[props(default)] on_password: EventHandler<String>,
    #[props(default)] on_confirm: EventHandler<String>,
    #[props(default)] on_submit: EventHandler<()>,
    #[props(default)] on_redirect: EventHandler<()>,
) -> Element {
    match state.screen() {
        Screen::Form => {
            let feedback = state.feedback();
            let submitting = state.is_submitting();
            let can_submit = state.can_submit();

            rsx! {
                Card { class: "reset-card",
                    CardHeader {
                        CardTitle {
                            span { class: "reset-title-icon",
                                Icon::<LdLock> { icon: LdLock, width: 24, height: 24 }
                            }
                            "Reset Your Password"
                        }
                    }
                    CardContent {
                        Form {
                            busy: submitting,
                            onsubmit: move |_| on_submit.call(()),
                            Input {
                                id: "new_password",
                                input_type: "password",
                                placeholder: format!("Enter new password (min {MIN_PASSWORD_LENGTH} chars)"),
                                value: state.password().to_string(),
                                disabled: submitting,
                                invalid: feedback.password_too_short,
                                hint: format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
                                on_input: move |e: FormEvent| on_password.call(e.value()),
                            }
                            Input {
                                id: "confirm_password",
                                input_type: "password",
                                placeholder: "Confirm new password",
                                value: state.confirm_password().to_string(),
                                disabled: submitting,
                                invalid: feedback.mismatch,
                                on_input: move |e: FormEvent| on_confirm.call(e.value()),
                            }
                            Button {
                                button_type: "submit",
                                disabled: !can_submit,
                                if submitting { "Changing..." } else { "Change Password" }
                            }
                            if feedback.mismatch {
                                p { class: "reset-mismatch", "Passwords do not match." }
                            }
                        }
                    }
                }
            }
        }
        Screen::Success => rsx! {
            Card { class: "reset-card",
                div { class: "reset-success-icon", "✓" }
                CardHeader {
                    CardTitle { "Password Updated!" }
                    CardDescription {
                        "Your password has been securely updated. You can now return to the app."
                    }
                }
                CardContent {
                    Button { onclick: move |_| on_redirect.call(()), "Back to App" }
                }
            }
        },
    }
}
