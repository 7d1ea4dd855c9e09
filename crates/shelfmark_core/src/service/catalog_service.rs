//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide book create/list and review create/list APIs over storage.
//! - Queue one confirmation notification per created review.
//!
//! # Invariants
//! - Each operation acquires the storage connection once and releases it
//!   before returning.
//! - The review confirmation is enqueued only after the storage lock is
//!   released, and its delivery outcome never changes the operation result.
//! - Book and review listings are sorted by ascending ID.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::book::{Book, BookId, NewBook};
use crate::model::review::{NewReview, Review};
use crate::notify::NotificationDispatcher;
use crate::repo::book_repo::{BookFilter, BookRepository, RepoError};
use crate::repo::review_repo::ReviewRepository;
use crate::store::Storage;

/// Recipient of every review confirmation.
///
/// The catalog has no account system, so confirmations are addressed to a
/// single fixed identifier.
pub const CONFIRMATION_RECIPIENT: &str = "user@example.com";

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Referenced book does not exist.
    BookNotFound(BookId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(book_id) => write!(f, "book not found: {book_id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::BookNotFound(book_id) => Self::BookNotFound(book_id),
            other => Self::Repo(other),
        }
    }
}

/// Catalog service facade over shared storage and the dispatcher.
pub struct CatalogService {
    storage: Storage,
    dispatcher: NotificationDispatcher,
}

impl CatalogService {
    /// Creates a service using the provided storage handle and dispatcher.
    pub fn new(storage: Storage, dispatcher: NotificationDispatcher) -> Self {
        Self {
            storage,
            dispatcher,
        }
    }

    /// Creates one book and returns the stored row with its assigned ID.
    pub fn create_book(&self, book: NewBook) -> Result<Book, CatalogError> {
        let uow = self.storage.unit_of_work();
        let created = uow.books()?.create_book(&book)?;
        Ok(created)
    }

    /// Lists books matching every provided filter field.
    pub fn list_books(&self, filter: BookFilter) -> Result<Vec<Book>, CatalogError> {
        let uow = self.storage.unit_of_work();
        let books = uow.books()?.list_books(&filter)?;
        Ok(books)
    }

    /// Creates one free-standing review and queues its confirmation.
    ///
    /// The public review surface carries no book reference, so the stored
    /// row has an empty `book_id`. The confirmation is best effort: the
    /// review is returned even if delivery later fails.
    pub fn create_review(
        &self,
        text: impl Into<String>,
        rating: i32,
    ) -> Result<Review, CatalogError> {
        let review = {
            let uow = self.storage.unit_of_work();
            uow.reviews()?.create_review(&NewReview::new(text, rating))?
        };
        // The storage lock is released above; delivery work never extends
        // the connection's critical section.
        self.dispatcher.enqueue(review.id, CONFIRMATION_RECIPIENT);
        Ok(review)
    }

    /// Lists reviews attached to one existing book.
    ///
    /// Fails with [`CatalogError::BookNotFound`] when the book does not
    /// exist; a reviewless existing book yields an empty list.
    pub fn list_reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>, CatalogError> {
        let uow = self.storage.unit_of_work();
        if uow.books()?.get_book(book_id)?.is_none() {
            return Err(CatalogError::BookNotFound(book_id));
        }
        let reviews = uow.reviews()?.list_reviews_for_book(book_id)?;
        Ok(reviews)
    }
}
