//! Book repository for JSON storage
//!
//! Manages loading and saving the catalog to books.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CatalogError;
use crate::models::Book;

use super::file_io::{read_json_or_default, write_json_atomic};

/// Serializable book data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BookData {
    books: Vec<Book>,
}

/// Repository for catalog persistence
///
/// Books are kept in insertion order; the ISBN is the unique key, though
/// uniqueness is enforced by callers rather than this repository.
pub struct BookRepository {
    path: PathBuf,
    data: RwLock<Vec<Book>>,
}

impl BookRepository {
    /// Create a new book repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load books from disk
    ///
    /// A missing or corrupt snapshot loads as an empty collection.
    pub fn load(&self) -> Result<(), CatalogError> {
        let file_data: BookData = read_json_or_default(&self.path);

        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data.books;

        Ok(())
    }

    /// Save the full catalog to disk
    pub fn save(&self) -> Result<(), CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = BookData {
            books: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a snapshot of all books in insertion order
    pub fn get_all(&self) -> Result<Vec<Book>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get a book by ISBN (first exact match)
    pub fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|b| b.isbn == isbn).cloned())
    }

    /// Search the catalog, preserving collection order
    ///
    /// See [`Book::matches_query`] for the field matching rules.
    pub fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .filter(|b| b.matches_query(query))
            .cloned()
            .collect())
    }

    /// Append a book to the catalog
    pub fn append(&self, book: Book) -> Result<(), CatalogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(book);
        Ok(())
    }

    /// Remove every book with the given ISBN
    ///
    /// Returns whether anything was removed.
    pub fn remove_by_isbn(&self, isbn: &str) -> Result<bool, CatalogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|b| b.isbn != isbn);
        Ok(data.len() != before)
    }

    /// Replace the stored record matching `book.isbn` wholesale, in place
    ///
    /// The record keeps its position in the collection. Returns whether a
    /// record was replaced; no match is a silent no-op.
    pub fn replace(&self, book: Book) -> Result<bool, CatalogError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|b| b.isbn == book.isbn) {
            Some(slot) => {
                *slot = book;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count books
    pub fn count(&self) -> Result<usize, CatalogError> {
        let data = self
            .data
            .read()
            .map_err(|e| CatalogError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.count()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BookRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.json");
        let repo = BookRepository::new(path);
        (temp_dir, repo)
    }

    fn sample(isbn: &str, title: &str) -> Book {
        Book::new(isbn, title, "Author", "Genre", "Publisher", 2000, 1, "")
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_append_and_find() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(sample("111", "First")).unwrap();

        let found = repo.find_by_isbn("111").unwrap().unwrap();
        assert_eq!(found.title, "First");
        assert!(repo.find_by_isbn("222").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.load().unwrap();
        repo.append(sample("111", "First")).unwrap();
        repo.append(sample("222", "Second")).unwrap();
        repo.save().unwrap();

        let repo2 = BookRepository::new(temp_dir.path().join("books.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get_all().unwrap(), repo.get_all().unwrap());
    }

    #[test]
    fn test_remove_all_matches() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(sample("111", "First")).unwrap();
        repo.append(sample("222", "Second")).unwrap();
        repo.append(sample("111", "Duplicate")).unwrap();

        assert!(repo.remove_by_isbn("111").unwrap());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get_all().unwrap()[0].isbn, "222");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.append(sample("111", "First")).unwrap();

        assert!(!repo.remove_by_isbn("999").unwrap());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_preserves_position() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(sample("111", "First")).unwrap();
        repo.append(sample("222", "Second")).unwrap();
        repo.append(sample("333", "Third")).unwrap();

        let mut replacement = sample("222", "Second Edition");
        replacement.total_copies = 7;
        replacement.available_copies = 7;
        assert!(repo.replace(replacement).unwrap());

        let all = repo.get_all().unwrap();
        assert_eq!(all[1].isbn, "222");
        assert_eq!(all[1].title, "Second Edition");
        assert_eq!(all[1].total_copies, 7);
    }

    #[test]
    fn test_replace_missing_is_silent_noop() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.append(sample("111", "First")).unwrap();

        assert!(!repo.replace(sample("999", "Ghost")).unwrap());
        assert_eq!(repo.get_all().unwrap()[0].title, "First");
    }

    #[test]
    fn test_search_order_and_fields() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.append(Book::new("111", "Rust in Action", "Tim McNamara", "Programming", "Manning", 2021, 2, "")).unwrap();
        repo.append(Book::new("222", "Dune", "Frank Herbert", "Science Fiction", "Chilton", 1965, 1, "")).unwrap();
        repo.append(Book::new("333", "The Rust Programming Language", "Steve Klabnik", "Programming", "No Starch", 2019, 3, "")).unwrap();

        let hits = repo.search("rust").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].isbn, "111");
        assert_eq!(hits[1].isbn, "333");

        assert!(repo.search("no such thing").unwrap().is_empty());
    }
}
