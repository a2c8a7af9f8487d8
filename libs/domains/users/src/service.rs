use database::{ArgumentError, positive_id, require, require_email};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult, storage_failure};
use crate::models::{RegisterUser, User};
use crate::password::{Argon2Hasher, PasswordHasher, PasswordMatch};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository, H: PasswordHasher = Argon2Hasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: R, hasher: H) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
        }
    }

    /// Register a new user with a hashed password
    ///
    /// Email uniqueness is not checked here; call
    /// [`ensure_email_available`](Self::ensure_email_available) first. A
    /// duplicate that reaches the store surfaces as `OperationFailed`.
    #[instrument(skip(self, user))]
    pub async fn register(&self, user: Option<RegisterUser>) -> UserResult<User> {
        let input = require(user, "user")?;
        input
            .validate()
            .map_err(|e| ArgumentError::malformed("user", e.to_string()))?;

        let email = normalize_email(&input.email);
        let password_hash = self.hasher.hash(&input.password)?;

        let stored = self
            .repository
            .add(User::new(input.name, email.clone(), password_hash))
            .await
            .map_err(storage_failure("register", &email))?;
        self.repository
            .commit()
            .await
            .map_err(storage_failure("register", &email))?;

        tracing::info!(user_id = stored.id, "Registered user");
        Ok(stored)
    }

    /// Check credentials; any mismatch is `Ok(None)`
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<Option<User>> {
        let email = normalize_email(email);

        let Some(user) = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(storage_failure("authenticate", &email))?
        else {
            tracing::debug!("No user with this email");
            return Ok(None);
        };

        match self.hasher.verify(&user.password_hash, password)? {
            PasswordMatch::Matched => Ok(Some(user)),
            PasswordMatch::Mismatched => {
                tracing::info!(user_id = user.id, "Password did not match");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let id = positive_id(id, "id")?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_failure("find_by_id", &id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let email = normalize_email(require_email(email, "email")?);

        self.repository
            .find_by_email(&email)
            .await
            .map_err(storage_failure("find_by_email", &email))
    }

    /// Fails with `DuplicateEmail` when a user already owns `email`.
    pub async fn ensure_email_available(&self, email: &str) -> UserResult<()> {
        match self.find_by_email(email).await? {
            Some(existing) => Err(UserError::DuplicateEmail(existing.email)),
            None => Ok(()),
        }
    }
}
