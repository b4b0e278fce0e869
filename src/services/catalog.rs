//! Catalog service
//!
//! Queries and mutations on the book collection. Every mutation persists
//! the full store synchronously before returning; reads hand out snapshot
//! copies that callers may mutate freely.

use crate::error::CatalogResult;
use crate::models::Book;
use crate::storage::Storage;

/// Service for catalog queries and mutations
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a snapshot of the catalog in insertion order
    pub fn list(&self) -> CatalogResult<Vec<Book>> {
        self.storage.books.get_all()
    }

    /// Search the catalog, preserving collection order
    pub fn search(&self, query: &str) -> CatalogResult<Vec<Book>> {
        self.storage.books.search(query)
    }

    /// Get a book by ISBN (first exact match)
    pub fn find(&self, isbn: &str) -> CatalogResult<Option<Book>> {
        self.storage.books.find_by_isbn(isbn)
    }

    /// Add a book to the catalog and persist
    ///
    /// No ISBN uniqueness check happens here; callers are expected to
    /// pre-check with [`CatalogService::find`].
    pub fn add(&self, book: Book) -> CatalogResult<()> {
        self.storage.books.append(book)?;
        self.storage.persist();
        Ok(())
    }

    /// Remove every book with the given ISBN
    ///
    /// Returns whether anything was removed; the store is persisted only
    /// in that case.
    pub fn remove(&self, isbn: &str) -> CatalogResult<bool> {
        let removed = self.storage.books.remove_by_isbn(isbn)?;
        if removed {
            self.storage.persist();
        }
        Ok(removed)
    }

    /// Replace the stored record matching `book.isbn` wholesale
    ///
    /// The record keeps its position. When no record has that ISBN this is
    /// a silent no-op and nothing is persisted.
    pub fn update(&self, book: Book) -> CatalogResult<()> {
        if self.storage.books.replace(book)? {
            self.storage.persist();
        }
        Ok(())
    }
}
