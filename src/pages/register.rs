//! Registration page.
//!
//! The backend answers validation problems (taken username, weak password)
//! with HTTP 200 and `{ "success": false, "message": ... }`, so a transport
//! level success still has to be inspected before sending the user to login.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::net::types::Registration;
use crate::router::guard::LOGIN_PATH;
use crate::state::session::{REGISTER_FAILED_MESSAGE, RegisterOutcome};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 6;

const MISSING_FIELDS: &str = "Fill in every field.";
const INVALID_USERNAME: &str = "Username must be 3-20 letters, digits or underscores.";
const INVALID_EMAIL: &str = "Enter a valid e-mail address.";
const WEAK_PASSWORD: &str = "Password needs at least 6 characters with letters and digits.";
const PASSWORD_MISMATCH: &str = "Passwords do not match.";

fn valid_username(username: &str) -> bool {
    (USERNAME_MIN..=USERNAME_MAX).contains(&username.chars().count())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && !email.chars().any(char::is_whitespace)
}

fn strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Registration, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    if !valid_username(username) {
        return Err(INVALID_USERNAME);
    }
    if !valid_email(email) {
        return Err(INVALID_EMAIL);
    }
    if !strong_password(password) {
        return Err(WEAK_PASSWORD);
    }
    if password != confirm {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(Registration { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Interpret a register outcome, including in-band `success: false` bodies.
fn registration_result(outcome: &RegisterOutcome) -> Result<(), String> {
    match outcome {
        RegisterOutcome::Failed { error } => Err(error.clone()),
        RegisterOutcome::Succeeded { data } => {
            if data.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
                let message = data
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(REGISTER_FAILED_MESSAGE);
                return Err(message.to_owned());
            }
            Ok(())
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match validate_registration(&username.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(registration) => registration,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = session.register(&registration).await;
            busy.set(false);
            match registration_result(&outcome) {
                Ok(()) => navigate(LOGIN_PATH, NavigateOptions::default()),
                Err(msg) => error.set(msg),
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <A href=LOGIN_PATH>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
