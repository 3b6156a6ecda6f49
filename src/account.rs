//! Local accounts and the remembered login.
//!
//! Accounts live in the same key-value store as the progress data, one
//! record per email under `user-<email>`. The logged-in user is kept under a
//! single session key; logging out writes `null` there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{save_json, user_key, KeyValueStore, StoreError, SESSION_KEY};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Copy without the password, for the remembered session.
    fn public(&self) -> Self {
        Self {
            email: self.email.clone(),
            password: None,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Email and password are required.")]
    MissingCredentials,

    #[error("This email is already registered. Please log in.")]
    AlreadyRegistered,

    #[error("No account found with this email. Please sign up.")]
    UnknownEmail,

    #[error("Invalid email or password.")]
    WrongPassword,

    #[error("An error occurred. Please try again.")]
    Storage(#[from] StoreError),
}

pub struct Accounts<S> {
    store: S,
}

impl<S: KeyValueStore> Accounts<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up an account. A malformed record counts as no account, so the
    /// email can be registered again.
    fn find(&self, email: &str) -> Result<Option<User>, AuthError> {
        let Some(raw) = self.store.get(&user_key(email))? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("ignoring malformed account record for {email}: {e}");
                Ok(None)
            }
        }
    }

    /// Register a new account and log it in.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.find(email)?.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = User {
            email: email.to_string(),
            password: Some(password.to_string()),
        };
        save_json(&self.store, &user_key(email), &user)?;
        log::info!("registered account {email}");

        self.save_session(&user)?;
        Ok(user.public())
    }

    pub fn log_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self.find(email)?.ok_or(AuthError::UnknownEmail)?;
        if user.password.as_deref() != Some(password) {
            log::info!("rejected login for {email}");
            return Err(AuthError::WrongPassword);
        }

        self.save_session(&user)?;
        Ok(user.public())
    }

    pub fn save_session(&self, user: &User) -> Result<(), AuthError> {
        save_json(&self.store, SESSION_KEY, &Some(user.public()))?;
        Ok(())
    }

    /// The remembered user, if any. Unreadable sessions count as logged out.
    pub fn load_session(&self) -> Option<User> {
        crate::store::load_json::<Option<User>, _>(&self.store, SESSION_KEY).flatten()
    }

    pub fn log_out(&self) -> Result<(), AuthError> {
        save_json(&self.store, SESSION_KEY, &None::<User>)?;
        Ok(())
    }
}
