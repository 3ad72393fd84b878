//! Routed pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page is rendered through the `Guarded` wrapper in `app`, so pages can
//! assume the access check for their route already passed.

pub mod chat;
pub mod login;
pub mod register;
