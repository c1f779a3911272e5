//! Well-known role name constants.
//!
//! These must match the `role` column default and check constraint in
//! `20250101000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
