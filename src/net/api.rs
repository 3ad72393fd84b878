//! REST API helpers for the auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! These calls return raw [`ApiError`]s; the session store decides how each
//! failure is surfaced to the UI.

use super::http::{ApiClient, ApiError, Transport};
use super::types::{Credentials, LoginResponse, Registration, User};
use crate::config::ClientConfig;

/// Exchange credentials for a bearer token via `POST /api/login`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the server rejects it.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    config: &ClientConfig,
    credentials: &Credentials,
) -> Result<LoginResponse, ApiError> {
    client.post_json(&config.login_endpoint(), credentials).await
}

/// Create an account via `POST /api/register`. The payload is returned as-is.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the server rejects it.
pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    config: &ClientConfig,
    registration: &Registration,
) -> Result<serde_json::Value, ApiError> {
    client.post_json(&config.register_endpoint(), registration).await
}

/// Fetch the profile of the token holder via `GET /api/users/me`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the token is rejected, or
/// the body is not a user record.
pub async fn fetch_current_user<T: Transport>(client: &ApiClient<T>, config: &ClientConfig) -> Result<User, ApiError> {
    client.get_json(&config.current_user_endpoint()).await
}
