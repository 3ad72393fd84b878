//! Route table and navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` declares which paths exist and who may visit them; `guard` turns
//! an access requirement plus the session's authenticated flag into an
//! allow/redirect decision. Neither module touches session state.

pub mod guard;
pub mod routes;
