//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical review record and its insert shape.
//!
//! # Invariants
//! - `id` is storage-assigned and never reused for another review.
//! - A non-null `book_id` must reference an existing book.
//! - `rating` carries no enforced range; range policy belongs to callers.

use crate::model::book::BookId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a persisted review.
pub type ReviewId = i64;

/// Canonical persisted review record.
///
/// `book_id` stays `None` for reviews created through the public catalog
/// interface, which carries no book reference. The field exists so storage
/// keeps the one-to-many relationship intact for callers that do supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Storage-assigned stable ID.
    pub id: ReviewId,
    /// Review body text.
    pub text: String,
    /// Caller-supplied rating, stored as-is.
    pub rating: i32,
    /// Owning book, when one was supplied at creation time.
    pub book_id: Option<BookId>,
}

/// Insert shape for a review that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Review body text.
    pub text: String,
    /// Caller-supplied rating.
    pub rating: i32,
    /// Optional owning book reference.
    pub book_id: Option<BookId>,
}

impl NewReview {
    /// Creates a disconnected review insert shape (no book reference).
    pub fn new(text: impl Into<String>, rating: i32) -> Self {
        Self {
            text: text.into(),
            rating,
            book_id: None,
        }
    }

    /// Creates a review insert shape attached to an existing book.
    pub fn with_book(text: impl Into<String>, rating: i32, book_id: BookId) -> Self {
        Self {
            text: text.into(),
            rating,
            book_id: Some(book_id),
        }
    }
}
