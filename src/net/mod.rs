//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the transport seam and default request headers, `api` maps
//! endpoints onto typed calls, and `types` defines the shared wire schema.

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
