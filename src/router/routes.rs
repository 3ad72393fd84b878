//! Static route table.
//!
//! DESIGN
//! ======
//! Route declarations use the raw `requires_auth`/`requires_guest` flags.
//! [`RouteTable::new`] turns them into a single [`Access`] and rejects
//! declarations that set both, so the guard never sees an ambiguous route.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use super::guard::{Access, CHAT_PATH, GuardDecision, LOGIN_PATH, guard};

pub const ROOT_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";

/// Upper bound on redirects followed by [`RouteTable::navigate`].
pub const MAX_REDIRECT_HOPS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteConfigError {
    #[error("route {path} is marked both requires_auth and requires_guest")]
    ConflictingAccess { path: &'static str },
    #[error("route {path} is declared more than once")]
    DuplicatePath { path: &'static str },
    #[error("route {path} redirects to undeclared path {target}")]
    UnknownRedirect { path: &'static str, target: &'static str },
}

/// Page component rendered for a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Chat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    /// Unconditional redirect, applied before any guard.
    Redirect(&'static str),
}

/// Access flags as written in a route declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
}

impl RouteMeta {
    pub const fn auth() -> Self {
        Self { requires_auth: true, requires_guest: false }
    }

    pub const fn guest() -> Self {
        Self { requires_auth: false, requires_guest: true }
    }
}

/// One route declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

/// A validated route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub access: Access,
}

impl TryFrom<RouteDef> for Route {
    type Error = RouteConfigError;

    fn try_from(def: RouteDef) -> Result<Self, Self::Error> {
        let access = match (def.meta.requires_auth, def.meta.requires_guest) {
            (true, true) => return Err(RouteConfigError::ConflictingAccess { path: def.path }),
            (true, false) => Access::RequiresAuth,
            (false, true) => Access::RequiresGuest,
            (false, false) => Access::Public,
        };
        Ok(Self { path: def.path, name: def.name, target: def.target, access })
    }
}

/// Where a navigation ends up after redirects and the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render { path: &'static str, view: View },
    NotFound,
    TooManyRedirects,
}

/// The application's routes:
/// `/` → `/chat`, `/login` and `/register` for guests, `/chat` for users.
pub fn app_routes() -> [RouteDef; 4] {
    [
        RouteDef { path: ROOT_PATH, name: None, target: RouteTarget::Redirect(CHAT_PATH), meta: RouteMeta::default() },
        RouteDef { path: LOGIN_PATH, name: Some("Login"), target: RouteTarget::View(View::Login), meta: RouteMeta::guest() },
        RouteDef {
            path: REGISTER_PATH,
            name: Some("Register"),
            target: RouteTarget::View(View::Register),
            meta: RouteMeta::guest(),
        },
        RouteDef { path: CHAT_PATH, name: Some("Chat"), target: RouteTarget::View(View::Chat), meta: RouteMeta::auth() },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Validate `defs` into a table.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteConfigError`] for conflicting access flags, repeated
    /// paths, or redirects to paths that are not declared.
    pub fn new(defs: impl IntoIterator<Item = RouteDef>) -> Result<Self, RouteConfigError> {
        let mut routes: Vec<Route> = Vec::new();
        for def in defs {
            let path = normalize_path(def.path);
            if routes.iter().any(|r| normalize_path(r.path) == path) {
                return Err(RouteConfigError::DuplicatePath { path: def.path });
            }
            routes.push(Route::try_from(def)?);
        }
        for route in &routes {
            if let RouteTarget::Redirect(target) = route.target {
                let target_path = normalize_path(target);
                if !routes.iter().any(|r| normalize_path(r.path) == target_path) {
                    return Err(RouteConfigError::UnknownRedirect { path: route.path, target });
                }
            }
        }
        Ok(Self { routes })
    }

    /// The table built from [`app_routes`].
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`RouteTable::new`].
    pub fn app() -> Result<Self, RouteConfigError> {
        Self::new(app_routes())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up the route for `path`, ignoring a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| normalize_path(r.path) == path)
    }

    /// Follow static redirects and the guard from `path` to the view that
    /// should render, reading `authenticated` once for the whole decision.
    pub fn navigate(&self, path: &str, authenticated: bool) -> Navigation {
        let mut current = match self.resolve(path) {
            Some(route) => route,
            None => return Navigation::NotFound,
        };
        for _ in 0..=MAX_REDIRECT_HOPS {
            let next = match current.target {
                RouteTarget::Redirect(target) => target,
                RouteTarget::View(view) => match guard(current.access, authenticated) {
                    GuardDecision::Allow => return Navigation::Render { path: current.path, view },
                    GuardDecision::Redirect(target) => target,
                },
            };
            current = match self.resolve(next) {
                Some(route) => route,
                None => return Navigation::NotFound,
            };
        }
        Navigation::TooManyRedirects
    }
}

/// Strip a trailing slash, keeping `/` itself.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
