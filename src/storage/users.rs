//! User repository for JSON storage
//!
//! Manages loading and saving user accounts to users.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CatalogError;
use crate::models::User;

use super::file_io::{read_json_or_default, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
///
/// Accounts are kept in insertion order; the username is the unique key.
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<Vec<User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load users from disk
    ///
    /// A missing or corrupt snapshot loads as an empty collection.
    pub fn load(&self) -> Result<(), CatalogError> {
        let file_data: UserData = read_json_or_default(&self.path);

        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.users;

        Ok(())
    }

    /// Save the full user collection to disk
    pub fn save(&self) -> Result<(), CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = UserData {
            users: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all users in insertion order
    pub fn get_all(&self) -> Result<Vec<User>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get a user by username (case-sensitive exact match)
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|u| u.username == username).cloned())
    }

    /// Find the first user matching both username and password exactly
    pub fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .find(|u| u.credentials_match(username, password))
            .cloned())
    }

    /// Check if a username is already taken (case-sensitive)
    pub fn username_exists(&self, username: &str) -> Result<bool, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().any(|u| u.username == username))
    }

    /// Append a user to the collection
    pub fn append(&self, user: User) -> Result<(), CatalogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(user);
        Ok(())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.count()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let repo = UserRepository::new(path);
        (temp_dir, repo)
    }

    fn alice() -> User {
        User::new("alice", "pass1", Role::User, "Alice A", "a@x.com", "555")
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_append_and_find() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(alice()).unwrap();

        let found = repo.find_by_username("alice").unwrap().unwrap();
        assert_eq!(found.full_name, "Alice A");

        // Case-sensitive
        assert!(repo.find_by_username("Alice").unwrap().is_none());
    }

    #[test]
    fn test_find_by_credentials() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.append(alice()).unwrap();

        assert!(repo.find_by_credentials("alice", "pass1").unwrap().is_some());
        assert!(repo.find_by_credentials("alice", "wrong").unwrap().is_none());
        assert!(repo.find_by_credentials("bob", "pass1").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.load().unwrap();
        repo.append(alice()).unwrap();
        repo.save().unwrap();

        // Create new repo and load
        let path = temp_dir.path().join("users.json");
        let repo2 = UserRepository::new(path);
        repo2.load().unwrap();

        let retrieved = repo2.find_by_username("alice").unwrap().unwrap();
        assert_eq!(retrieved, alice());
    }

    #[test]
    fn test_username_exists() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.append(alice()).unwrap();

        assert!(repo.username_exists("alice").unwrap());
        assert!(!repo.username_exists("Alice").unwrap());
        assert!(!repo.username_exists("bob").unwrap());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(User::new("c", "p", Role::User, "C", "", "")).unwrap();
        repo.append(User::new("a", "p", Role::User, "A", "", "")).unwrap();
        repo.append(User::new("b", "p", Role::User, "B", "", "")).unwrap();

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
