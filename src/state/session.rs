//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for the bearer token and user record. The route
//! guard reads [`SessionStore::check_auth`] on every navigation; pages call
//! `login`/`register`/`logout`. State is hydrated from storage when the store
//! is built and written back on every change.
//!
//! DESIGN
//! ======
//! Every path that changes the token (hydration, `set_token`, `logout`)
//! ends in [`apply_auth_header`], so the `Authorization` default header
//! always matches the stored token.
//!
//! ERROR HANDLING
//! ==============
//! Network operations never return `Err` or panic. Failures become
//! [`LoginOutcome`]/[`RegisterOutcome`] values carrying a display message.
//! A failed profile fetch after a good login is reported separately as
//! [`LoginOutcome::SucceededProfileFetchFailed`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use leptos::logging::warn;

use crate::config::ClientConfig;
use crate::net::api;
use crate::net::http::{AUTHORIZATION, ApiClient, ApiError, Transport, bearer};
use crate::net::types::{Credentials, Registration, User};
use crate::util::storage::KeyValueStore;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";

/// Literal stored under the user key when no user is present.
const NULL_USER: &str = "null";

/// In-memory auth session. An empty token means "signed out".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Succeeded,
    /// Token stored, but `/users/me` failed; the user record is unset.
    SucceededProfileFetchFailed { error: String },
    Failed { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::SucceededProfileFetchFailed { error } | Self::Failed { error } => Some(error),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegisterOutcome {
    Succeeded { data: serde_json::Value },
    Failed { error: String },
}

impl RegisterOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Persisted auth session plus the API client whose default headers follow it.
pub struct SessionStore<S, T> {
    config: ClientConfig,
    storage: S,
    client: ApiClient<T>,
    session: RwLock<Session>,
}

impl<S: KeyValueStore, T: Transport> SessionStore<S, T> {
    /// Build the store and hydrate it from `storage`.
    ///
    /// A restored token is applied to the client's default headers right
    /// away. A user record that fails to parse is dropped.
    pub fn new(config: ClientConfig, storage: S, client: ApiClient<T>) -> Self {
        let token = storage.get_item(&config.token_key).unwrap_or_default();
        let user = restore_user(storage.get_item(&config.user_key).as_deref());
        apply_auth_header(&client, &token);
        Self { config, storage, client, session: RwLock::new(Session { token, user }) }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.read().clone()
    }

    pub fn token(&self) -> String {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn check_auth(&self) -> bool {
        self.is_authenticated()
    }

    /// Identifier of the current user, or an empty string.
    pub fn current_user_id(&self) -> String {
        self.read().user.as_ref().map(|u| u.id.clone()).unwrap_or_default()
    }

    /// Store `token` in memory and storage and send it as the bearer header
    /// on all later requests. No format validation; an empty token signs out
    /// without clearing the user record.
    pub fn set_token(&self, token: &str) {
        self.write().token = token.to_owned();
        self.storage.set_item(&self.config.token_key, token);
        apply_auth_header(&self.client, token);
    }

    /// Store `user` in memory and a JSON copy in storage.
    pub fn set_user(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.set_item(&self.config.user_key, &raw),
            Err(e) => warn!("failed to persist user record: {e}"),
        }
        self.write().user = Some(user);
    }

    /// Log in with `credentials`.
    ///
    /// On a token response the token is stored; when the response also names
    /// a user the profile is fetched. The token is left untouched on failure.
    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let resp = match api::login(&self.client, &self.config, credentials).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Login failed: {e}");
                return LoginOutcome::Failed { error: e.user_message(LOGIN_FAILED_MESSAGE) };
            }
        };
        let Some(token) = resp.access_token.filter(|t| !t.is_empty()) else {
            warn!("Login failed: response carried no access token");
            return LoginOutcome::Failed { error: LOGIN_FAILED_MESSAGE.to_owned() };
        };
        self.set_token(&token);

        if resp.user_id.as_deref().is_some_and(|id| !id.is_empty()) {
            if let Err(e) = self.fetch_user_info().await {
                warn!("Failed to fetch user info: {e}");
                return LoginOutcome::SucceededProfileFetchFailed { error: e.to_string() };
            }
        }
        LoginOutcome::Succeeded
    }

    /// Fetch `/users/me` with the current token and store the result.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed request; the stored user is
    /// left as it was.
    pub async fn fetch_user_info(&self) -> Result<User, ApiError> {
        let user = api::fetch_current_user(&self.client, &self.config).await?;
        self.set_user(user.clone());
        Ok(user)
    }

    /// Register a new account. Does not sign in.
    pub async fn register(&self, registration: &Registration) -> RegisterOutcome {
        match api::register(&self.client, &self.config, registration).await {
            Ok(data) => RegisterOutcome::Succeeded { data },
            Err(e) => {
                warn!("Registration failed: {e}");
                RegisterOutcome::Failed { error: e.user_message(REGISTER_FAILED_MESSAGE) }
            }
        }
    }

    /// Clear token and user from memory and storage and drop the bearer
    /// header. Safe to call when already signed out.
    pub fn logout(&self) {
        {
            let mut session = self.write();
            session.token.clear();
            session.user = None;
        }
        self.storage.remove_item(&self.config.token_key);
        self.storage.remove_item(&self.config.user_key);
        apply_auth_header(&self.client, "");
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point the client's `Authorization` default at `token`; an empty token
/// removes the header.
pub fn apply_auth_header<T: Transport>(client: &ApiClient<T>, token: &str) {
    if token.is_empty() {
        client.remove_default_header(AUTHORIZATION);
    } else {
        client.set_default_header(AUTHORIZATION, &bearer(token));
    }
}

fn restore_user(raw: Option<&str>) -> Option<User> {
    let raw = raw?;
    if raw == NULL_USER {
        return None;
    }
    match serde_json::from_str::<Option<User>>(raw) {
        Ok(user) => user,
        Err(e) => {
            warn!("ignoring unreadable persisted user: {e}");
            None
        }
    }
}
