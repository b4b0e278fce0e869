//! User model
//!
//! Represents user accounts with role-based access levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Catalog management access
    Librarian,
    /// Regular borrower account
    User,
}

impl Role {
    /// Returns true if this role may manage the catalog (add/remove/update books)
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Librarian)
    }

    /// Parse a role from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "librarian" => Some(Self::Librarian),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Librarian => write!(f, "librarian"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A user account
///
/// The username is the unique key; accounts are created by registration or
/// seeding and never mutated afterwards. Passwords are stored in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique login name (case-sensitive)
    pub username: String,

    /// Plaintext password
    pub password: String,

    /// Access level
    pub role: Role,

    /// Display name
    pub full_name: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: String,
}

impl User {
    /// Create a new user account
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Check a username/password pair against this account (exact match on both)
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new(
            "alice",
            "pass1",
            Role::User,
            "Alice A",
            "a@x.com",
            "555",
        );
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.full_name, "Alice A");
    }

    #[test]
    fn test_credentials_match() {
        let user = User::new("alice", "pass1", Role::User, "Alice A", "", "");
        assert!(user.credentials_match("alice", "pass1"));
        assert!(!user.credentials_match("alice", "wrong"));
        // Username comparison is case-sensitive
        assert!(!user.credentials_match("Alice", "pass1"));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("LIBRARIAN"), Some(Role::Librarian));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn test_role_is_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Librarian.is_staff());
        assert!(!Role::User.is_staff());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Librarian).unwrap();
        assert_eq!(json, "\"librarian\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
