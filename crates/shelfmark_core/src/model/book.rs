//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its insert shape.
//!
//! # Invariants
//! - `id` is storage-assigned and never reused for another book.
//! - `title`, `author` and `publication_year` are always present; there is
//!   no partial-update path that could blank them.

use serde::{Deserialize, Serialize};

/// Stable identifier for a persisted book.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Canonical persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned stable ID.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Author name, matched exactly by catalog filters.
    pub author: String,
    /// Publication year, matched exactly by catalog filters.
    pub publication_year: i32,
}

/// Insert shape for a book that has not been persisted yet.
///
/// The ID is assigned by storage on insert, so this shape carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub publication_year: i32,
}

impl NewBook {
    /// Creates an insert shape from the three required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>, publication_year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
        }
    }
}
