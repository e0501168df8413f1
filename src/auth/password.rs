//! Password hashing.
//!
//! bcrypt is CPU-bound, so every hash and verify runs on tokio's blocking
//! pool instead of the request's worker thread.

use tokio::sync::OnceCell;

use crate::error::PasswordError;

/// Plaintext hashed once to build the decoy used for unknown usernames.
const DECOY_PLAINTEXT: &str = "decoy-password-for-timing";

#[derive(Debug)]
pub struct PasswordHasher {
    cost: u32,
    decoy_hash: OnceCell<String>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Build a hasher whose decoy hash is computed up front, so the first
    /// unknown-user login costs one verify like every later one. Blocks for
    /// one bcrypt hash; call at startup.
    pub fn with_decoy(cost: u32) -> Result<Self, PasswordError> {
        let decoy = bcrypt::hash(DECOY_PLAINTEXT, cost)?;
        Ok(Self {
            cost,
            decoy_hash: OnceCell::new_with(Some(decoy)),
        })
    }

    #[cfg(test)]
    pub(crate) fn decoy_ready(&self) -> bool {
        self.decoy_hash.initialized()
    }

    /// Salted bcrypt hash of `plaintext`.
    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hashed =
            tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(hashed)
    }

    /// Check `plaintext` against a stored bcrypt hash.
    pub async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        let matched =
            tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
        Ok(matched)
    }

    /// Spend the same work as a real verify without a stored hash. Always
    /// reports a mismatch.
    pub async fn verify_decoy(&self, plaintext: &str) -> Result<bool, PasswordError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash(DECOY_PLAINTEXT))
            .await?;
        self.verify(plaintext, decoy).await?;
        Ok(false)
    }
}
