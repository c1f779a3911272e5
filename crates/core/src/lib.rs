//! Domain types and pure logic shared by every WebToApp crate.
//!
//! Nothing in here touches the database, the network, or the runtime.

pub mod analysis;
pub mod artifact;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
