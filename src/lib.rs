//! # chat-client
//!
//! Leptos + WASM frontend shell for the chat application.
//!
//! This crate owns the browser-side authentication session (token + user
//! record persisted in `localStorage`, bearer header on outgoing API calls)
//! and the route table whose navigation guard keeps guests out of `/chat`
//! and signed-in users out of `/login` and `/register`.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// WASM entry point: installs panic/log hooks and mounts [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger not installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
