//! # auth-adapters
//!
//! Implementations of the credential ports: Argon2 password hashing and, with
//! the `auth-jwt` feature, HS256 session tokens.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::Argon2PasswordHasher;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtSessionTokens;
