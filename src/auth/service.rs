//! Auth Service
//!
//! Orchestrates signup and login over the credential store, the password
//! hasher and the token issuer. Every lower-level failure is folded into
//! [`AuthError`] here.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::jwt::JwtService;
use crate::auth::models::{AuthSuccess, Credentials};
use crate::auth::password::PasswordHasher;
use crate::config::AuthConfig;
use crate::database::{CredentialStore, User};
use crate::error::AuthError;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: JwtService,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: JwtService,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Build the service from configuration. Computes the login decoy hash
    /// before returning.
    pub fn from_config(
        store: Arc<dyn CredentialStore>,
        config: &AuthConfig,
    ) -> Result<Self, AuthError> {
        Ok(Self::new(
            store,
            PasswordHasher::with_decoy(config.bcrypt_cost)?,
            JwtService::new(&config.jwt_secret, Duration::seconds(config.token_ttl_secs)),
        ))
    }

    pub fn tokens(&self) -> &JwtService {
        &self.tokens
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Register a new user and issue a token for it.
    pub async fn signup(&self, creds: Credentials) -> Result<AuthSuccess, AuthError> {
        let Credentials { username, password } = creds;

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(&password).await?;
        let user = User {
            username,
            password_hash,
        };

        // A concurrent signup may have inserted the same name since the lookup;
        // the store reports that as Duplicate, which maps to AlreadyExists.
        self.store.insert(&user).await?;

        let token = self.tokens.issue(&user.username).map_err(AuthError::Internal)?;
        tracing::info!(username = %user.username, "user signed up");

        Ok(AuthSuccess {
            username: user.username,
            token: token.token,
        })
    }

    /// Check credentials and issue a token. Unknown users and wrong passwords
    /// fail identically.
    pub async fn login(&self, creds: Credentials) -> Result<AuthSuccess, AuthError> {
        let Credentials { username, password } = creds;

        let matched = match self.store.find_by_username(&username).await? {
            Some(user) => self.hasher.verify(&password, &user.password_hash).await?,
            None => self.hasher.verify_decoy(&password).await?,
        };

        if !matched {
            tracing::warn!(username = %username, "rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&username).map_err(AuthError::Internal)?;
        tracing::info!(username = %username, "user logged in");

        Ok(AuthSuccess {
            username,
            token: token.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryCredentialStore;
    use crate::error::StoreError;
    use async_trait::async_trait;

    fn service_with(store: Arc<dyn CredentialStore>) -> AuthService {
        AuthService::new(
            store,
            PasswordHasher::new(4),
            JwtService::new("test_secret", Duration::hours(1)),
        )
    }

    fn service() -> AuthService {
        service_with(Arc::new(MemoryCredentialStore::new()))
    }

    #[tokio::test]
    async fn from_config_prepares_login_decoy() {
        let config = AuthConfig {
            jwt_secret: "test_secret".to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: 4,
        };
        let auth =
            AuthService::from_config(Arc::new(MemoryCredentialStore::new()), &config).unwrap();
        assert!(auth.hasher.decoy_ready());

        let err = auth.login(Credentials::new("nobody", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn signup_then_duplicate_signup() {
        let auth = service();

        let ok = auth.signup(Credentials::new("alice", "pw1")).await.unwrap();
        assert_eq!(ok.username, "alice");
        assert_eq!(auth.tokens().decode_claims(&ok.token).unwrap().sub, "alice");

        let err = auth.signup(Credentials::new("alice", "pw2")).await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[tokio::test]
    async fn signup_stores_a_hash_not_the_password() {
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = service_with(store.clone());
        auth.signup(Credentials::new("alice", "pw1")).await.unwrap();

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw1");
        assert!(stored.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn login_paths() {
        let auth = service();
        auth.signup(Credentials::new("alice", "pw1")).await.unwrap();

        let ok = auth.login(Credentials::new("alice", "pw1")).await.unwrap();
        assert_eq!(auth.tokens().decode_claims(&ok.token).unwrap().sub, "alice");

        let wrong = auth.login(Credentials::new("alice", "wrong")).await.unwrap_err();
        let unknown = auth.login(Credentials::new("bob", "x")).await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    /// Store that always claims the user is absent but rejects the insert,
    /// as when another request inserts between lookup and insert.
    struct RacingStore;

    #[async_trait]
    impl CredentialStore for RacingStore {
        async fn find_by_username(&self, _: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
        async fn insert(&self, _: &User) -> Result<(), StoreError> {
            Err(StoreError::Duplicate)
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn lost_insert_race_is_already_exists() {
        let auth = service_with(Arc::new(RacingStore));
        let err = auth.signup(Credentials::new("alice", "pw1")).await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    /// Store whose stored hash is corrupt.
    struct CorruptStore;

    #[async_trait]
    impl CredentialStore for CorruptStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
            Ok(Some(User {
                username: username.to_string(),
                password_hash: "garbage".to_string(),
            }))
        }
        async fn insert(&self, _: &User) -> Result<(), StoreError> {
            Ok(())
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_internal() {
        let auth = service_with(Arc::new(CorruptStore));
        let err = auth.login(Credentials::new("alice", "pw1")).await.unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
