//! Pre-navigation access check.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

pub const LOGIN_PATH: &str = "/login";
pub const CHAT_PATH: &str = "/chat";

/// Who may visit a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    RequiresAuth,
    /// Login/register pages: signed-in users are sent to the chat.
    RequiresGuest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide a single navigation. Stateless; the caller passes the session's
/// current authenticated flag.
pub fn guard(access: Access, authenticated: bool) -> GuardDecision {
    match access {
        Access::RequiresAuth if !authenticated => GuardDecision::Redirect(LOGIN_PATH),
        Access::RequiresGuest if authenticated => GuardDecision::Redirect(CHAT_PATH),
        _ => GuardDecision::Allow,
    }
}
