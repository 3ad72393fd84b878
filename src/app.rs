//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Redirect, Route, Router, Routes};

use crate::config::ClientConfig;
use crate::net::http::{ApiClient, BrowserTransport};
use crate::pages::{chat::ChatPage, login::LoginPage, register::RegisterPage};
use crate::router::guard::{CHAT_PATH, LOGIN_PATH};
use crate::router::routes::{Navigation, REGISTER_PATH, ROOT_PATH, RouteTable, View};
use crate::state::session::SessionStore;
use crate::util::storage::BrowserStorage;

/// Session store wired to `localStorage` and `fetch`.
pub type AppSession = SessionStore<BrowserStorage, BrowserTransport>;

/// Root application component.
///
/// Builds the session store (hydrating it from `localStorage`), provides it
/// and the route table as context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionStore::new(ClientConfig::from_build_env(), BrowserStorage, ApiClient::new(BrowserTransport));
    provide_context(Arc::new(session));

    let routes = match RouteTable::app() {
        Ok(routes) => routes,
        Err(e) => {
            leptos::logging::error!("invalid route table: {e}");
            return view! { <p class="app-error">"Routing is misconfigured."</p> }.into_any();
        }
    };
    provide_context(Arc::new(routes));

    view! {
        <Title text="Chat"/>

        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=StaticSegment("") view=|| view! { <Guarded path=ROOT_PATH/> }/>
                <Route path=StaticSegment("login") view=|| view! { <Guarded path=LOGIN_PATH/> }/>
                <Route path=StaticSegment("register") view=|| view! { <Guarded path=REGISTER_PATH/> }/>
                <Route path=StaticSegment("chat") view=|| view! { <Guarded path=CHAT_PATH/> }/>
            </Routes>
        </Router>
    }
    .into_any()
}

/// Runs the navigation guard for `path` each time the route is entered and
/// either renders its page or redirects.
///
/// The authenticated flag is read from the session store at that moment,
/// never cached between navigations.
#[component]
pub fn Guarded(path: &'static str) -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let routes = expect_context::<Arc<RouteTable>>();

    match routes.navigate(path, session.check_auth()) {
        Navigation::Render { path: target, view } if target == path => render_view(view),
        Navigation::Render { path: target, .. } => view! { <Redirect path=target/> }.into_any(),
        Navigation::NotFound | Navigation::TooManyRedirects => view! { <NotFound/> }.into_any(),
    }
}

fn render_view(view: View) -> AnyView {
    match view {
        View::Login => view! { <LoginPage/> }.into_any(),
        View::Register => view! { <RegisterPage/> }.into_any(),
        View::Chat => view! { <ChatPage/> }.into_any(),
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found."</h1>
            <a href=CHAT_PATH>"Back to chat"</a>
        </div>
    }
}
