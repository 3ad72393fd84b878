//! Chat landing page for signed-in users.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::net::types::User;
use crate::router::guard::LOGIN_PATH;

/// Name shown in the header: username, then e-mail, then a generic label
/// while the profile has not been fetched.
fn display_name(user: Option<&User>) -> String {
    user.and_then(|u| [u.username.as_str(), u.email.as_str()].into_iter().find(|s| !s.is_empty()))
        .unwrap_or("Signed in")
        .to_owned()
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let navigate = use_navigate();

    let name = display_name(session.user().as_ref());

    let on_logout = move |_| {
        session.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="chat-page">
            <header class="chat-header">
                <span class="chat-header__user">{name}</span>
                <button class="chat-header__logout" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <main class="chat-main"></main>
        </div>
    }
}
