// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with bcrypt.

use super::AuthError;

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AuthError::InternalError(e.to_string()))
}

/// Check a candidate password against a stored hash.
///
/// Any verification failure (including a corrupt hash) reads as a mismatch
/// so callers cannot distinguish a bad password from bad stored data.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
