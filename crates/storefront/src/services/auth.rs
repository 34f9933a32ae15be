//! Mock authentication service.
//!
//! There is no credential store: login and register validate their inputs,
//! wait out a simulated network delay, and fabricate a user record. The
//! fabricated user persists as the `moto-shop-user` document until logout.

use std::time::Duration;

use rand::distr::{Alphanumeric, SampleString};
use thiserror::Error;
use tokio::sync::RwLock;

use moto_shop_core::{Email, EmailError, User, UserId};

use crate::storage::{LocalStore, StorageError, keys};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of fabricated user ids.
const USER_ID_LENGTH: usize = 9;

/// Errors that can occur during mock authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Password confirmation does not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Mock authentication service.
///
/// Borrows the shared user slot and document store from the application
/// state; construct one per request via
/// [`crate::state::AppState::auth_service`].
pub struct AuthService<'a> {
    store: &'a LocalStore,
    user: &'a RwLock<Option<User>>,
    latency: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        store: &'a LocalStore,
        user: &'a RwLock<Option<User>>,
        latency: Duration,
    ) -> Self {
        Self {
            store,
            user,
            latency,
        }
    }

    /// The currently logged-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Mock login: any email/password pair is accepted.
    ///
    /// Fabricates a user named after the email's local part, persists it,
    /// and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error when a field is empty, the email is malformed, or
    /// the user document cannot be written.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        let email = Email::parse(email.trim())?;

        // Simulated backend round trip
        tokio::time::sleep(self.latency).await;

        let user = User {
            id: fabricate_user_id(),
            name: email.local_part().to_owned(),
            email,
        };
        self.set_user(user).await
    }

    /// Mock registration: creates a user with the provided name and email.
    ///
    /// # Errors
    ///
    /// Returns an error when a field is empty, the email is malformed, the
    /// password is shorter than [`MIN_PASSWORD_LENGTH`] or does not match
    /// its confirmation, or the user document cannot be written.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        let email = Email::parse(email.trim())?;
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        // Simulated backend round trip
        tokio::time::sleep(self.latency).await;

        let user = User {
            id: fabricate_user_id(),
            name: name.to_owned(),
            email,
        };
        self.set_user(user).await
    }

    /// Log out: clears the in-memory user and deletes the persisted document.
    ///
    /// # Errors
    ///
    /// Returns an error when the user document cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.user.write().await.take();
        self.store.remove(keys::USER)?;
        tracing::info!("user logged out");
        Ok(())
    }

    async fn set_user(&self, user: User) -> Result<User, AuthError> {
        self.store.write(keys::USER, &user)?;
        *self.user.write().await = Some(user.clone());
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}

/// Load the persisted user document, if any.
#[must_use]
pub fn load_user(store: &LocalStore) -> Option<User> {
    store.read::<User>(keys::USER)
}

/// Random 9-character lowercase alphanumeric id, the shape the original
/// client generated.
fn fabricate_user_id() -> UserId {
    let id = Alphanumeric
        .sample_string(&mut rand::rng(), USER_ID_LENGTH)
        .to_lowercase();
    UserId::new(id)
}
