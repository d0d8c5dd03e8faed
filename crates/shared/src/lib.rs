//! Shared utilities and common types for the Matchday backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Access token generation and hashing helpers
//! - Password hashing with Argon2id
//! - JWT session tokens
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
