//! HTTP handlers, one module per resource.

pub mod admin;
pub mod analysis;
pub mod apps;
pub mod auth;
pub mod payments;
