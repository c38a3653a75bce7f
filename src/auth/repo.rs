use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::AppError;

/// In-memory user store: username to password, plaintext. No hashing and no
/// normalization; usernames are case-sensitive.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user. The first registration wins: a taken username fails
    /// with `DuplicateUser` and the stored password stays unchanged.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let mut users = self.users.write().map_err(AppError::internal)?;
        if users.contains_key(username) {
            return Err(AppError::DuplicateUser);
        }
        users.insert(username.to_string(), password.to_string());
        Ok(())
    }

    /// Exact string comparison. An unknown username and a wrong password are
    /// indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AppError> {
        let users = self.users.read().map_err(AppError::internal)?;
        match users.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}
