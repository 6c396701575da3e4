//! One-way password hashing.
//!
//! Bcrypt generates a random salt per call, so hashing the same
//! plaintext twice yields different strings. Verification recomputes
//! against the embedded salt; it never reverses the hash.

use anyhow::{Context, Result};

/// Hash a plaintext password with the given cost factor.
pub fn hash(plaintext: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plaintext, cost).context("Failed to hash password")
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a failed verification rather than
/// an error, so a corrupt record can never be logged into.
#[must_use]
pub fn verify(plaintext: &str, hashed: &str) -> bool {
    bcrypt::verify(plaintext, hashed).unwrap_or(false)
}
