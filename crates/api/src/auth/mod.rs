//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`verification`] -- Short-lived email verification codes.

pub mod jwt;
pub mod password;
pub mod verification;
