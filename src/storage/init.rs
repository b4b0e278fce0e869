//! Storage initialization
//!
//! Handles first-run seeding of the default accounts and catalog.

use crate::error::CatalogError;
use crate::models::{Book, Role, User};

use super::Storage;

/// Seed the store with default data when either collection is empty
///
/// Seeding is all-or-nothing: if *either* the user collection or the
/// catalog loaded empty, both receive the full seed set and the store is
/// persisted once. Returns whether seeding happened.
pub fn seed_if_empty(storage: &Storage) -> Result<bool, CatalogError> {
    if !storage.users.is_empty()? && !storage.books.is_empty()? {
        return Ok(false);
    }

    for user in default_users() {
        storage.users.append(user)?;
    }
    for book in default_books() {
        storage.books.append(book)?;
    }

    storage.persist();
    Ok(true)
}

/// The three default accounts: an admin, a librarian, and a regular user
pub fn default_users() -> Vec<User> {
    vec![
        User::new(
            "admin",
            "admin123",
            Role::Admin,
            "System Administrator",
            "admin@library.com",
            "123-456-7890",
        ),
        User::new(
            "librarian",
            "lib123",
            Role::Librarian,
            "Jane Smith",
            "jane@library.com",
            "123-456-7891",
        ),
        User::new(
            "user",
            "user123",
            Role::User,
            "John Doe",
            "john@email.com",
            "123-456-7892",
        ),
    ]
}

/// The five default catalog entries
pub fn default_books() -> Vec<Book> {
    vec![
        Book::new(
            "978-0134685991",
            "Effective Java",
            "Joshua Bloch",
            "Programming",
            "Addison-Wesley",
            2018,
            5,
            "A comprehensive guide to Java programming best practices",
        ),
        Book::new(
            "978-0201633610",
            "Design Patterns",
            "Erich Gamma",
            "Computer Science",
            "Addison-Wesley",
            1994,
            3,
            "Elements of Reusable Object-Oriented Software",
        ),
        Book::new(
            "978-0596009205",
            "Head First Java",
            "Kathy Sierra",
            "Programming",
            "O'Reilly",
            2005,
            4,
            "A brain-friendly guide to Java programming",
        ),
        Book::new(
            "978-0061120084",
            "To Kill a Mockingbird",
            "Harper Lee",
            "Fiction",
            "J.B. Lippincott",
            1960,
            2,
            "A classic novel about racial inequality",
        ),
        Book::new(
            "978-0439023481",
            "The Hunger Games",
            "Suzanne Collins",
            "Science Fiction",
            "Scholastic",
            2008,
            3,
            "Dystopian novel set in a post-apocalyptic nation",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StacksPaths;
    use tempfile::TempDir;

    #[test]
    fn test_seed_from_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StacksPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(seed_if_empty(&storage).unwrap());

        assert_eq!(storage.users.count().unwrap(), 3);
        assert_eq!(storage.books.count().unwrap(), 5);

        let usernames: Vec<_> = storage
            .users
            .get_all()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(usernames, vec!["admin", "librarian", "user"]);

        let effective_java = storage.books.find_by_isbn("978-0134685991").unwrap().unwrap();
        assert_eq!(effective_java.title, "Effective Java");
        assert_eq!(effective_java.total_copies, 5);
        assert_eq!(effective_java.available_copies, 5);

        // Seeding persisted both snapshots
        assert!(storage.paths().users_file().exists());
        assert!(storage.paths().books_file().exists());
    }

    #[test]
    fn test_no_seed_when_both_populated() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StacksPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        seed_if_empty(&storage).unwrap();
        assert!(!seed_if_empty(&storage).unwrap());
        assert_eq!(storage.users.count().unwrap(), 3);
        assert_eq!(storage.books.count().unwrap(), 5);
    }

    #[test]
    fn test_either_empty_seeds_both() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StacksPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        // Users present, catalog empty: the user collection is re-seeded too
        storage
            .users
            .append(crate::models::User::new(
                "existing",
                "pw",
                crate::models::Role::User,
                "Existing",
                "",
                "",
            ))
            .unwrap();

        assert!(seed_if_empty(&storage).unwrap());
        assert_eq!(storage.users.count().unwrap(), 4);
        assert_eq!(storage.books.count().unwrap(), 5);
    }
}
