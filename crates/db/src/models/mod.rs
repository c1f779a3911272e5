//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod ad_source;
pub mod admin_setting;
pub mod app;
pub mod event;
pub mod payment_method;
pub mod payment_receipt;
pub mod status;
pub mod user;
