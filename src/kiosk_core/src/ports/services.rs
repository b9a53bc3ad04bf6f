use async_trait::async_trait;

use crate::domain::password::{Password, PasswordHash};

#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHasherError(pub String);

/// Salted one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` for a mismatch; `Err` only when verification itself broke
    /// (e.g. a malformed stored hash).
    async fn verify(
        &self,
        password: Password,
        expected: PasswordHash,
    ) -> Result<bool, PasswordHasherError>;

    /// A well-formed hash that no password matches. Login verifies against it
    /// when the account does not exist, so both failure paths do the same work.
    fn decoy_hash(&self) -> PasswordHash;
}
