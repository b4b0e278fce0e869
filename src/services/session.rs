//! Session service
//!
//! Authentication, registration, and the single current-user pointer.
//! The session lives on the service instance owned by the composition
//! root; it is never persisted across restarts.

use crate::error::CatalogResult;
use crate::models::{Role, User};
use crate::storage::Storage;

/// Service for authentication and the active session
pub struct SessionService<'a> {
    storage: &'a Storage,
    current: Option<User>,
}

impl<'a> SessionService<'a> {
    /// Create a new session service with no active session
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Look up a user by exact username/password match (first match wins)
    ///
    /// Does not touch the session; use [`SessionService::login`] for that.
    pub fn authenticate(&self, username: &str, password: &str) -> CatalogResult<Option<User>> {
        self.storage.users.find_by_credentials(username, password)
    }

    /// Authenticate and, on success, make the user the active session
    pub fn login(&mut self, username: &str, password: &str) -> CatalogResult<Option<User>> {
        let user = self.authenticate(username, password)?;
        if let Some(ref user) = user {
            self.current = Some(user.clone());
        }
        Ok(user)
    }

    /// Register a new regular user account
    ///
    /// Fails (returns false) when the username is already taken; the
    /// comparison is case-sensitive. On success the account is appended
    /// with role `user` and the store is persisted.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
        phone: &str,
    ) -> CatalogResult<bool> {
        if self.storage.users.username_exists(username)? {
            return Ok(false);
        }

        let user = User::new(username, password, Role::User, full_name, email, phone);
        self.storage.users.append(user)?;
        self.storage.persist();
        Ok(true)
    }

    /// Get the currently authenticated user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Make the given user the active session
    pub fn set_current_user(&mut self, user: User) {
        self.current = Some(user);
    }

    /// Clear the active session
    pub fn logout(&mut self) {
        self.current = None;
    }
}
