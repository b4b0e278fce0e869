//! Book model
//!
//! Represents catalog entries with copy counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog entry
///
/// The ISBN is the unique key. `available_copies` starts equal to
/// `total_copies` and only changes when a caller replaces the whole record
/// through an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier (e.g., "978-0134685991")
    pub isbn: String,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Genre (e.g., "Programming", "Fiction")
    pub genre: String,

    /// Publisher
    #[serde(default)]
    pub publisher: String,

    /// Year of publication
    pub publication_year: i32,

    /// Number of copies owned
    pub total_copies: u32,

    /// Number of copies currently on the shelf
    pub available_copies: u32,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Book {
    /// Create a new book with all copies available
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
        total_copies: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            publisher: publisher.into(),
            publication_year,
            total_copies,
            available_copies: total_copies,
            description: description.into(),
        }
    }

    /// Returns true if at least one copy is on the shelf
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Check this book against a free-text search query
    ///
    /// Title, author, genre, and publisher match case-insensitively; the
    /// ISBN matches case-sensitively. Any single field matching is enough.
    pub fn matches_query(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.title.to_lowercase().contains(&lower)
            || self.author.to_lowercase().contains(&lower)
            || self.genre.to_lowercase().contains(&lower)
            || self.isbn.contains(query)
            || self.publisher.to_lowercase().contains(&lower)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({})",
            self.title, self.author, self.publication_year
        )
    }
}
